//! Board controller - validates board-logic calls and runs the animation loop
//!
//! Every mutating call is applied to the *committed* grid at once and queues
//! the matching animation. [`StoneBoard::update`] then walks the queue one head
//! entry per tick and only mutates the *presented* grid when that entry's
//! motion has finished. Once the queue drains the two grids are equal.

use crate::animation::{AnimationEntry, AnimationQueue, Landing};
use crate::config::BoardConfig;
use crate::geometry::Geometry;
use crate::grid::{GridStore, StoneGrid};
use crate::piece::Stone;
use crate::render::{AssetCatalog, RenderTarget, StoneTransform};
use crate::rng::{spawn_fall_speed, RandomSource, SimpleRng};
use crate::snapshot::{BoardSnapshot, StoneSnapshot};
use crate::types::{cell_raw, RotateMode, StoneError, StoneId, StoneKind};

macro_rules! board_log {
    ($cfg:expr, $($arg:tt)*) => {
        if $cfg.debug {
            eprintln!("[StoneBoard] {}", format_args!($($arg)*));
        }
    };
}

/// Live state of an initialized board.
#[derive(Debug, Clone)]
struct BoardState {
    geometry: Geometry,
    store: GridStore,
    queue: AnimationQueue,
    /// The head `Swap` entry has started its motion.
    swap_in_progress: bool,
}

/// The stone board: committed grid, presented grid, stone table and
/// animation queue behind one owned value.
#[derive(Debug, Clone)]
pub struct StoneBoard<R = SimpleRng> {
    config: BoardConfig,
    rng: R,
    state: Option<BoardState>,
}

impl StoneBoard<SimpleRng> {
    /// Uninitialized board using a [`SimpleRng`] seeded from the config.
    pub fn new(config: BoardConfig) -> Self {
        let rng = SimpleRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Construct and initialize in one step.
    pub fn with_size(config: BoardConfig, nx: usize, ny: usize) -> Result<Self, StoneError> {
        let mut board = Self::new(config);
        board.init(nx, ny)?;
        Ok(board)
    }
}

impl Default for StoneBoard<SimpleRng> {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

/// Resolve `(x, y)` to the stone it holds.
fn occupied(grid: &StoneGrid, x: i32, y: i32) -> Result<StoneId, StoneError> {
    match grid.get(x, y) {
        None => Err(StoneError::ArgumentError),
        Some(None) => Err(StoneError::Empty),
        Some(Some(id)) => Ok(id),
    }
}

impl<R: RandomSource> StoneBoard<R> {
    /// Uninitialized board drawing fall speeds from `rng`.
    pub fn with_rng(config: BoardConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            state: None,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Allocate empty `nx × ny` grids and reset the table and queue.
    pub fn init(&mut self, nx: usize, ny: usize) -> Result<(), StoneError> {
        if self.state.is_some() {
            return Err(StoneError::AlreadyInitialized);
        }
        if nx == 0 || ny == 0 {
            return Err(StoneError::ArgumentError);
        }

        self.state = Some(BoardState {
            geometry: Geometry::new(nx, ny, self.config.cell_size),
            store: GridStore::new(nx, ny),
            queue: AnimationQueue::new(),
            swap_in_progress: false,
        });
        board_log!(self.config, "init {}x{}", nx, ny);
        Ok(())
    }

    /// Drop all board state; `init` may be called again afterwards.
    pub fn teardown(&mut self) {
        if self.state.take().is_some() {
            board_log!(self.config, "teardown");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// `(nx, ny)` once initialized.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.state
            .as_ref()
            .map(|s| (s.geometry.nx(), s.geometry.ny()))
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.state.as_ref().map(|s| &s.geometry)
    }

    /// Place a new stone of `kind` at `(x, y)`.
    ///
    /// The stone starts `fallen_pixel` above its cell, or one row above the
    /// board when `fallen_pixel` is `None` or negative, and falls into place
    /// at a randomized speed. A NaN or infinite offset is an `ArgumentError`.
    /// Unlike every other operation this writes the
    /// presented grid immediately: the cell is logically taken even while the
    /// stone is still on its way down.
    pub fn generate(
        &mut self,
        x: i32,
        y: i32,
        kind: StoneKind,
        fallen_pixel: Option<f32>,
    ) -> Result<StoneId, StoneError> {
        let state = self.state.as_mut().ok_or(StoneError::NotInitialized)?;
        match state.store.committed.get(x, y) {
            None => return Err(StoneError::ArgumentError),
            Some(Some(_)) => return Err(StoneError::Occupied),
            Some(None) => {}
        }
        if fallen_pixel.is_some_and(|pixels| !pixels.is_finite()) {
            return Err(StoneError::ArgumentError);
        }

        let geometry = state.geometry;
        let target_y = geometry.row_y(y);
        let start_y = match fallen_pixel {
            Some(pixels) if pixels >= 0.0 => target_y + pixels,
            _ => geometry.row_y(-1),
        };

        let mut stone = Stone::new(geometry.column_x(x), start_y, 0.0, kind);
        stone.set_rotating_speed(self.config.rotating_speed);
        stone.set_falling(spawn_fall_speed(&mut self.rng), target_y);
        let id = state.store.stones.push(stone);

        state.queue.push(AnimationEntry::FallingBatch(None));
        state.store.committed.set(x, y, Some(id));
        state.store.presented.set(x, y, Some(id));

        board_log!(self.config, "generate {} kind={} at ({}, {})", id, kind, x, y);
        Ok(id)
    }

    /// Take the stone at `(x, y)` off the committed grid and queue its
    /// destruction.
    pub fn remove(&mut self, x: i32, y: i32) -> Result<(), StoneError> {
        let state = self.state.as_mut().ok_or(StoneError::NotInitialized)?;
        let stone = occupied(&state.store.committed, x, y)?;

        state.store.committed.set(x, y, None);
        state.queue.push(AnimationEntry::Destroy { x, y, stone });

        board_log!(self.config, "remove {} at ({}, {})", stone, x, y);
        Ok(())
    }

    /// Change how the stone at `(x, y)` spins. Takes effect on the next tick.
    pub fn set_rotate(&mut self, x: i32, y: i32, mode: RotateMode) -> Result<(), StoneError> {
        let state = self.state.as_mut().ok_or(StoneError::NotInitialized)?;
        let id = occupied(&state.store.committed, x, y)?;

        let speed = mode.speed(self.config.rotating_speed, self.config.rotating_speed_fast);
        if let Some(stone) = state.store.stones.get_mut(id) {
            stone.set_rotating_speed(speed);
        }
        Ok(())
    }

    /// Move the stone at `(x, y)` to row `tar_y` of the same column.
    pub fn fall_to(&mut self, x: i32, y: i32, tar_y: i32) -> Result<(), StoneError> {
        let state = self.state.as_mut().ok_or(StoneError::NotInitialized)?;
        let committed = &state.store.committed;
        let (Some(source), Some(target)) = (committed.get(x, y), committed.get(x, tar_y)) else {
            return Err(StoneError::ArgumentError);
        };
        let id = source.ok_or(StoneError::Empty)?;
        if target.is_some() {
            return Err(StoneError::Occupied);
        }

        state.store.committed.set(x, y, None);
        state.store.committed.set(x, tar_y, Some(id));
        let target_y = state.geometry.row_y(tar_y);
        if let Some(stone) = state.store.stones.get_mut(id) {
            stone.set_falling(self.config.falling_speed, target_y);
        }
        state.queue.push(AnimationEntry::FallingBatch(Some(Landing {
            stone: id,
            x,
            y: tar_y,
        })));

        board_log!(self.config, "fall {} ({}, {}) -> ({}, {})", id, x, y, x, tar_y);
        Ok(())
    }

    /// Exchange the stones at `(x1, y1)` and `(x2, y2)`.
    pub fn swap_stone(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), StoneError> {
        let state = self.state.as_mut().ok_or(StoneError::NotInitialized)?;
        let committed = &state.store.committed;
        let (Some(first), Some(second)) = (committed.get(x1, y1), committed.get(x2, y2)) else {
            return Err(StoneError::ArgumentError);
        };
        let (Some(a), Some(b)) = (first, second) else {
            return Err(StoneError::Empty);
        };

        state.store.committed.swap((x1, y1), (x2, y2));
        state.queue.push(AnimationEntry::Swap { a, b });

        board_log!(
            self.config,
            "swap {} ({}, {}) <-> {} ({}, {})",
            a,
            x1,
            y1,
            b,
            x2,
            y2
        );
        Ok(())
    }

    /// True while any animation is queued.
    pub fn is_playing_animation(&self) -> bool {
        self.state.as_ref().is_some_and(|s| !s.queue.is_empty())
    }

    /// Advance one tick: spin every visible stone, then service the queue head.
    pub fn update(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let cfg = &self.config;

        state.store.for_each_presented_mut(Stone::update_rotating);

        let had_work = !state.queue.is_empty();
        match state.queue.front().copied() {
            None => {}
            Some(AnimationEntry::FallingBatch(_)) => state.service_falling(cfg),
            Some(AnimationEntry::Swap { a, b }) => state.service_swap(a, b, cfg),
            Some(AnimationEntry::Destroy { x, y, stone }) => {
                state.service_destroy(x, y, stone, cfg)
            }
        }

        if had_work && state.queue.is_empty() {
            state.reconcile(cfg);
        }
    }

    /// Submit every presented stone to `target`.
    pub fn draw<C, T>(&self, catalog: &C, target: &mut T)
    where
        C: AssetCatalog,
        T: RenderTarget<C::Asset>,
    {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        for (_, _, id) in state.store.presented.occupied() {
            let Some(stone) = state.store.stones.get(id) else {
                continue;
            };
            let Some(asset) = catalog.asset(stone.kind()) else {
                continue;
            };
            let transform = StoneTransform {
                translation: [stone.x(), stone.y(), stone.z()],
                angle_deg: stone.angle(),
                scale: self.config.model_scale,
            };
            target.submit(asset, &transform);
        }
    }

    /// Stone on the committed grid at `(x, y)`.
    pub fn committed_at(&self, x: i32, y: i32) -> Option<StoneId> {
        self.state
            .as_ref()
            .and_then(|s| s.store.committed.stone_at(x, y))
    }

    /// Stone on the presented grid at `(x, y)`.
    pub fn presented_at(&self, x: i32, y: i32) -> Option<StoneId> {
        self.state
            .as_ref()
            .and_then(|s| s.store.presented.stone_at(x, y))
    }

    pub fn stone(&self, id: StoneId) -> Option<&Stone> {
        self.state.as_ref().and_then(|s| s.store.stones.get(id))
    }

    /// Number of stones ever generated since `init`.
    pub fn stone_count(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.store.stones.len())
    }

    pub fn pending_animations(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.queue.len())
    }

    /// Queued animations, head first.
    pub fn animations(&self) -> impl Iterator<Item = &AnimationEntry> + '_ {
        self.state.iter().flat_map(|s| s.queue.iter())
    }

    pub fn snapshot(&self) -> Option<BoardSnapshot> {
        let state = self.state.as_ref()?;
        let raw = |grid: &StoneGrid| -> Vec<u32> { grid.cells().iter().map(|c| cell_raw(*c)).collect() };
        Some(BoardSnapshot {
            nx: state.geometry.nx(),
            ny: state.geometry.ny(),
            committed: raw(&state.store.committed),
            presented: raw(&state.store.presented),
            animations: state.queue.iter().copied().collect(),
            swap_in_progress: state.swap_in_progress,
            stones: state
                .store
                .stones
                .iter()
                .map(|(id, stone)| StoneSnapshot::new(id, stone))
                .collect(),
        })
    }
}

impl BoardState {
    fn service_falling(&mut self, cfg: &BoardConfig) {
        let mut any_falling = false;
        self.store.for_each_presented_mut(|stone| {
            if stone.is_falling() {
                stone.update_falling();
                any_falling = true;
            }
        });
        if any_falling {
            return;
        }

        let BoardState {
            geometry,
            store,
            queue,
            ..
        } = self;
        let popped = queue.drain_falling_run(|landing| land(store, geometry, landing));
        board_log!(cfg, "falling settled ({} entries)", popped);
    }

    fn service_swap(&mut self, a: StoneId, b: StoneId, cfg: &BoardConfig) {
        let stones = &mut self.store.stones;
        if !self.swap_in_progress {
            let (Some(pa), Some(pb)) = (
                stones.get(a).map(|s| (s.x(), s.y())),
                stones.get(b).map(|s| (s.x(), s.y())),
            ) else {
                self.queue.pop();
                board_log!(cfg, "swap {} <-> {} dropped: unknown stone", a, b);
                return;
            };
            if let Some(stone) = stones.get_mut(a) {
                stone.set_swapping(pb.0, pb.1, cfg.swapping_speed);
            }
            if let Some(stone) = stones.get_mut(b) {
                stone.set_swapping(pa.0, pa.1, cfg.swapping_speed);
            }
            self.swap_in_progress = true;
            return;
        }

        let moving = [a, b]
            .iter()
            .any(|id| stones.get(*id).is_some_and(Stone::is_swapping));
        if moving {
            for id in [a, b] {
                if let Some(stone) = stones.get_mut(id) {
                    stone.update_swapping();
                }
            }
            return;
        }

        self.queue.pop();
        self.swap_in_progress = false;
        let presented = &mut self.store.presented;
        match (presented.position_of(a), presented.position_of(b)) {
            (Some(pa), Some(pb)) if a != b => {
                presented.swap(pa, pb);
                board_log!(cfg, "swap {} <-> {} done", a, b);
            }
            _ => board_log!(cfg, "swap {} <-> {} done, nothing to exchange", a, b),
        }
    }

    fn service_destroy(&mut self, x: i32, y: i32, stone: StoneId, cfg: &BoardConfig) {
        self.queue.pop();
        let presented = &mut self.store.presented;
        let cell = if presented.stone_at(x, y) == Some(stone) {
            Some((x, y))
        } else {
            presented.position_of(stone)
        };
        if let Some((cx, cy)) = cell {
            presented.set(cx, cy, None);
        }
        board_log!(cfg, "destroy {} at ({}, {})", stone, x, y);
    }

    /// Copy the committed grid onto the presented grid and rest every stone
    /// on its cell center.
    fn reconcile(&mut self, cfg: &BoardConfig) {
        let store = &mut self.store;
        let nx = self.geometry.nx() as i32;
        for (i, cell) in store.committed.cells().iter().enumerate() {
            let (x, y) = (i as i32 % nx, i as i32 / nx);
            if store.presented.stone_at(x, y) != *cell {
                board_log!(cfg, "reconcile ({}, {}) -> {}", x, y, cell_raw(*cell));
                store.presented.set(x, y, *cell);
            }
        }

        for (x, y, id) in store.committed.occupied() {
            let Some(stone) = store.stones.get_mut(id) else {
                continue;
            };
            let (cx, cy) = (self.geometry.column_x(x), self.geometry.row_y(y));
            if stone.x() != cx || stone.y() != cy || stone.is_falling() || stone.is_swapping() {
                board_log!(cfg, "reconcile {} resting at ({}, {})", id, x, y);
                stone.settle_at(cx, cy);
            }
        }
    }
}

/// Move a settled `fall_to` stone to its landing cell on the presented grid.
fn land(store: &mut GridStore, geometry: &Geometry, landing: Landing) {
    if let Some((x, y)) = store.presented.position_of(landing.stone) {
        store.presented.set(x, y, None);
    }
    if let Some(stone) = store.stones.get_mut(landing.stone) {
        stone.settle_at(geometry.column_x(landing.x), geometry.row_y(landing.y));
    }
    store.presented.set(landing.x, landing.y, Some(landing.stone));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(nx: usize, ny: usize) -> StoneBoard {
        StoneBoard::with_size(BoardConfig::default(), nx, ny).unwrap()
    }

    fn settle(board: &mut StoneBoard) -> usize {
        let mut ticks = 0;
        while board.is_playing_animation() {
            board.update();
            ticks += 1;
            assert!(ticks < 10_000, "animation queue never drained");
        }
        ticks
    }

    #[test]
    fn init_twice_fails() {
        let mut b = StoneBoard::default();
        assert_eq!(b.init(3, 3), Ok(()));
        assert_eq!(b.init(3, 3), Err(StoneError::AlreadyInitialized));
        b.teardown();
        assert_eq!(b.init(4, 2), Ok(()));
        assert_eq!(b.dimensions(), Some((4, 2)));
    }

    #[test]
    fn init_rejects_zero_size() {
        let mut b = StoneBoard::default();
        assert_eq!(b.init(0, 3), Err(StoneError::ArgumentError));
        assert!(!b.is_initialized());
    }

    #[test]
    fn operations_before_init_fail() {
        let mut b = StoneBoard::default();
        assert_eq!(b.generate(0, 0, 1, None), Err(StoneError::NotInitialized));
        assert_eq!(b.remove(0, 0), Err(StoneError::NotInitialized));
        assert_eq!(
            b.set_rotate(0, 0, RotateMode::Static),
            Err(StoneError::NotInitialized)
        );
        assert_eq!(b.fall_to(0, 0, 1), Err(StoneError::NotInitialized));
        assert_eq!(b.swap_stone(0, 0, 1, 0), Err(StoneError::NotInitialized));
        b.update();
        assert!(!b.is_playing_animation());
        assert!(b.snapshot().is_none());
    }

    #[test]
    fn generate_starts_one_row_above_by_default() {
        let mut b = board(3, 3);
        let id = b.generate(1, 2, 7, None).unwrap();
        let geometry = *b.geometry().unwrap();
        let stone = b.stone(id).unwrap();
        assert_eq!(stone.x(), geometry.column_x(1));
        assert_eq!(stone.y(), geometry.row_y(-1));
        assert_eq!(stone.kind(), 7);
        assert_eq!(stone.rotating_speed(), b.config().rotating_speed);
        let fall = stone.falling().unwrap();
        assert_eq!(fall.target_y, geometry.row_y(2));
        assert!((4.0..=7.6).contains(&fall.speed));
    }

    #[test]
    fn generate_with_fallen_pixel_starts_above_target() {
        let mut b = board(3, 3);
        let id = b.generate(0, 1, 0, Some(10.0)).unwrap();
        let target = b.geometry().unwrap().row_y(1);
        assert_eq!(b.stone(id).unwrap().y(), target + 10.0);

        let id = b.generate(0, 2, 0, Some(-5.0)).unwrap();
        assert_eq!(b.stone(id).unwrap().y(), b.geometry().unwrap().row_y(-1));
    }

    #[test]
    fn fall_to_validates_before_mutating() {
        let mut b = board(2, 4);
        b.generate(0, 0, 1, None).unwrap();
        b.generate(0, 3, 1, None).unwrap();
        settle(&mut b);

        assert_eq!(b.fall_to(0, 0, 4), Err(StoneError::ArgumentError));
        assert_eq!(b.fall_to(0, -1, 2), Err(StoneError::ArgumentError));
        assert_eq!(b.fall_to(1, 0, 2), Err(StoneError::Empty));
        assert_eq!(b.fall_to(0, 0, 3), Err(StoneError::Occupied));
        assert!(!b.is_playing_animation());
    }

    #[test]
    fn fall_to_moves_presented_cell_after_settling() {
        let mut b = board(1, 4);
        let id = b.generate(0, 0, 1, None).unwrap();
        settle(&mut b);

        b.fall_to(0, 0, 3).unwrap();
        assert_eq!(b.committed_at(0, 3), Some(id));
        assert_eq!(b.committed_at(0, 0), None);
        assert_eq!(b.presented_at(0, 0), Some(id));

        settle(&mut b);
        assert_eq!(b.presented_at(0, 3), Some(id));
        assert_eq!(b.presented_at(0, 0), None);
        assert_eq!(b.stone(id).unwrap().y(), b.geometry().unwrap().row_y(3));
    }

    #[test]
    fn swap_runs_in_two_phases() {
        let mut b = board(2, 1);
        let a = b.generate(0, 0, 1, None).unwrap();
        let c = b.generate(1, 0, 2, None).unwrap();
        settle(&mut b);

        b.swap_stone(0, 0, 1, 0).unwrap();
        assert_eq!(b.committed_at(0, 0), Some(c));
        assert_eq!(b.presented_at(0, 0), Some(a));

        // First visit only starts the motion.
        b.update();
        assert!(b.stone(a).unwrap().is_swapping());
        assert_eq!(b.stone(a).unwrap().x(), b.geometry().unwrap().column_x(0));
        assert!(b.snapshot().unwrap().swap_in_progress);

        settle(&mut b);
        assert_eq!(b.presented_at(0, 0), Some(c));
        assert_eq!(b.presented_at(1, 0), Some(a));
        assert_eq!(b.stone(a).unwrap().x(), b.geometry().unwrap().column_x(1));
        assert!(!b.snapshot().unwrap().swap_in_progress);
    }

    #[test]
    fn destroy_is_serviced_in_one_tick() {
        let mut b = board(2, 2);
        b.generate(0, 0, 1, None).unwrap();
        settle(&mut b);

        b.remove(0, 0).unwrap();
        assert!(b.presented_at(0, 0).is_some());
        b.update();
        assert_eq!(b.presented_at(0, 0), None);
        assert!(!b.is_playing_animation());
    }

    #[test]
    fn destroy_spares_a_stone_generated_into_the_same_cell() {
        let mut b = board(1, 1);
        b.generate(0, 0, 1, None).unwrap();
        settle(&mut b);

        b.remove(0, 0).unwrap();
        let fresh = b.generate(0, 0, 2, None).unwrap();
        assert_eq!(b.presented_at(0, 0), Some(fresh));

        settle(&mut b);
        assert_eq!(b.presented_at(0, 0), Some(fresh));
        assert_eq!(b.committed_at(0, 0), Some(fresh));
    }

    #[test]
    fn set_rotate_applies_mode_speeds() {
        let mut b = board(1, 1);
        let id = b.generate(0, 0, 1, None).unwrap();
        let cfg = b.config().clone();
        for (mode, expected) in [
            (RotateMode::Static, 0.0),
            (RotateMode::Rotate, cfg.rotating_speed),
            (RotateMode::RotateFast, cfg.rotating_speed_fast),
            (RotateMode::RotateInverse, -cfg.rotating_speed),
            (RotateMode::RotateFastInverse, -cfg.rotating_speed_fast),
        ] {
            b.set_rotate(0, 0, mode).unwrap();
            assert_eq!(b.stone(id).unwrap().rotating_speed(), expected);
        }
        assert_eq!(
            b.set_rotate(1, 0, RotateMode::Rotate),
            Err(StoneError::ArgumentError)
        );
    }
}
