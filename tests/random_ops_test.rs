//! Randomized call sequences, driven by the deterministic `SimpleRng`.

use std::collections::HashSet;

use stone_grid::core::{BoardConfig, RandomSource, SimpleRng, StoneBoard, StoneError};
use stone_grid::types::RotateMode;

const NX: u32 = 5;
const NY: u32 = 4;

fn random_op(board: &mut StoneBoard, rng: &mut SimpleRng) -> Result<(), StoneError> {
    // Coordinates overshoot the board by one so some calls fail validation.
    let x = rng.next_range(NX + 1) as i32;
    let y = rng.next_range(NY + 1) as i32;
    match rng.next_range(6) {
        0 | 1 => {
            let pixels = match rng.next_range(3) {
                0 => None,
                1 => Some(-1.0),
                _ => Some(rng.next_range(200) as f32),
            };
            board.generate(x, y, rng.next_range(4), pixels).map(|_| ())
        }
        2 => board.remove(x, y),
        3 => board.fall_to(x, y, rng.next_range(NY + 1) as i32),
        4 => board.swap_stone(
            x,
            y,
            rng.next_range(NX + 1) as i32,
            rng.next_range(NY + 1) as i32,
        ),
        _ => {
            let mode = RotateMode::try_from(rng.next_range(5) as i32)?;
            board.set_rotate(x, y, mode)
        }
    }
}

fn run_sequence(seed: u32, ops: usize) -> StoneBoard {
    let config = BoardConfig::default().with_seed(seed);
    let mut board = StoneBoard::with_size(config, NX as usize, NY as usize).unwrap();
    let mut rng = SimpleRng::new(seed.wrapping_mul(31).wrapping_add(7));

    for _ in 0..ops {
        let _ = random_op(&mut board, &mut rng);
        for _ in 0..rng.next_range(4) {
            board.update();
        }
    }

    let mut ticks = 0;
    while board.is_playing_animation() {
        board.update();
        ticks += 1;
        assert!(ticks < 100_000, "seed {}: queue never drained", seed);
    }
    board
}

#[test]
fn random_sequences_drain_to_agreeing_grids() {
    for seed in 1..=40 {
        let board = run_sequence(seed, 120);
        let geometry = *board.geometry().unwrap();

        let mut seen = HashSet::new();
        for y in 0..NY as i32 {
            for x in 0..NX as i32 {
                let committed = board.committed_at(x, y);
                assert_eq!(
                    board.presented_at(x, y),
                    committed,
                    "seed {}: grids disagree at ({}, {})",
                    seed,
                    x,
                    y
                );
                let Some(id) = committed else {
                    continue;
                };
                assert!(seen.insert(id), "seed {}: {} appears twice", seed, id);

                let stone = board.stone(id).unwrap();
                assert_eq!((stone.x(), stone.y()), (geometry.column_x(x), geometry.row_y(y)));
                assert!(!stone.is_falling() && !stone.is_swapping());
            }
        }
        assert!(!board.snapshot().unwrap().swap_in_progress);
    }
}

#[test]
fn identical_seeds_give_identical_boards() {
    for seed in [1, 9, 1234] {
        let a = run_sequence(seed, 80).snapshot().unwrap();
        let b = run_sequence(seed, 80).snapshot().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}

#[test]
fn injected_random_source_controls_fall_speed() {
    struct Fixed(u32);
    impl RandomSource for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    let mut board = StoneBoard::with_rng(BoardConfig::default(), Fixed(9));
    board.init(1, 1).unwrap();
    let id = board.generate(0, 0, 0, None).unwrap();
    assert_eq!(board.stone(id).unwrap().falling().unwrap().speed, 19.0 / 2.5);

    let mut board = StoneBoard::with_rng(BoardConfig::default(), Fixed(20));
    board.init(1, 1).unwrap();
    let id = board.generate(0, 0, 0, None).unwrap();
    assert_eq!(board.stone(id).unwrap().falling().unwrap().speed, 4.0);
}
