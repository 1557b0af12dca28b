//! Director: a scripted player that keeps the board busy.
//!
//! It never looks for matches; it only drives the board API the way a game
//! would. Whenever the board is idle it picks the next move:
//!
//! - holes anywhere → drop the stones above each hole (`fall_to`); a column
//!   with nothing left to drop gets new stones generated into its top cells,
//!   stacked above the board
//! - otherwise alternate between swapping a random neighbor pair and spinning
//!   up then removing a random stone together with one neighbor

use arrayvec::ArrayVec;

use crate::core::{RandomSource, RotateMode, SimpleRng, StoneBoard, StoneError, StoneKind};

/// What [`Director::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Animations are still playing; nothing was issued.
    Wait,
    Refill { falls: u32, spawned: u32 },
    Swap { from: (i32, i32), to: (i32, i32) },
    Clear { cells: u32 },
}

#[derive(Debug, Clone)]
pub struct Director {
    rng: SimpleRng,
    kinds: u32,
    turn: u64,
}

/// Orthogonal in-bounds neighbors of `(x, y)`.
pub fn neighbors(x: i32, y: i32, nx: usize, ny: usize) -> ArrayVec<(i32, i32), 4> {
    let mut out = ArrayVec::new();
    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let (px, py) = (x + dx, y + dy);
        if px >= 0 && py >= 0 && (px as usize) < nx && (py as usize) < ny {
            out.push((px, py));
        }
    }
    out
}

impl Director {
    /// `kinds` is the number of stone kinds to draw from (at least 1).
    pub fn new(seed: u32, kinds: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            kinds: kinds.max(1),
            turn: 0,
        }
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn step<R: RandomSource>(&mut self, board: &mut StoneBoard<R>) -> Result<Move, StoneError> {
        let (nx, ny) = board.dimensions().ok_or(StoneError::NotInitialized)?;
        if board.is_playing_animation() {
            return Ok(Move::Wait);
        }

        let has_hole = (0..ny as i32)
            .any(|y| (0..nx as i32).any(|x| board.committed_at(x, y).is_none()));
        let mv = if has_hole {
            self.refill(board, nx, ny)?
        } else if self.turn % 2 == 0 {
            self.swap(board, nx, ny)?
        } else {
            self.clear(board, nx, ny)?
        };
        self.turn += 1;
        Ok(mv)
    }

    fn refill<R: RandomSource>(
        &mut self,
        board: &mut StoneBoard<R>,
        nx: usize,
        ny: usize,
    ) -> Result<Move, StoneError> {
        let cell_size = board.config().cell_size;
        let (mut falls, mut spawned) = (0, 0);

        for x in 0..nx as i32 {
            // Compact the column downwards.
            let mut floor = ny as i32 - 1;
            let mut column_falls = 0;
            for y in (0..ny as i32).rev() {
                if board.committed_at(x, y).is_none() {
                    continue;
                }
                if y != floor {
                    board.fall_to(x, y, floor)?;
                    column_falls += 1;
                }
                floor -= 1;
            }
            falls += column_falls;

            // Spawn once the column has settled, so new stones never cover a
            // stone that is still falling out of the top rows.
            if column_falls > 0 {
                continue;
            }
            let missing = floor + 1;
            for y in 0..missing {
                let kind = self.next_kind();
                board.generate(x, y, kind, Some(missing as f32 * cell_size))?;
                spawned += 1;
            }
        }
        Ok(Move::Refill { falls, spawned })
    }

    fn swap<R: RandomSource>(
        &mut self,
        board: &mut StoneBoard<R>,
        nx: usize,
        ny: usize,
    ) -> Result<Move, StoneError> {
        let from = self.random_cell(nx, ny);
        let around = neighbors(from.0, from.1, nx, ny);
        if around.is_empty() {
            return Ok(Move::Wait);
        }
        let to = around[self.rng.next_range(around.len() as u32) as usize];
        board.swap_stone(from.0, from.1, to.0, to.1)?;
        Ok(Move::Swap { from, to })
    }

    fn clear<R: RandomSource>(
        &mut self,
        board: &mut StoneBoard<R>,
        nx: usize,
        ny: usize,
    ) -> Result<Move, StoneError> {
        let first = self.random_cell(nx, ny);
        let mut cells: ArrayVec<(i32, i32), 2> = ArrayVec::new();
        cells.push(first);
        let around = neighbors(first.0, first.1, nx, ny);
        if !around.is_empty() {
            cells.push(around[self.rng.next_range(around.len() as u32) as usize]);
        }

        for &(x, y) in &cells {
            board.set_rotate(x, y, RotateMode::RotateFast)?;
            board.remove(x, y)?;
        }
        Ok(Move::Clear {
            cells: cells.len() as u32,
        })
    }

    fn random_cell(&mut self, nx: usize, ny: usize) -> (i32, i32) {
        let x = self.rng.next_range(nx as u32) as i32;
        let y = self.rng.next_range(ny as u32) as i32;
        (x, y)
    }

    fn next_kind(&mut self) -> StoneKind {
        self.rng.next_range(self.kinds)
    }
}
