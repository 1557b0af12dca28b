//! Grid index store - stone table plus the committed and presented grids
//!
//! Both grids are flat row-major arrays (`y * nx + x`) of `Option<StoneId>`.
//! Coordinates are `i32` at this boundary so callers can pass unchecked input:
//! `get`/`set` report out-of-bounds instead of panicking.

use crate::piece::Stone;
use crate::types::StoneId;

/// A grid cell: `None` is empty.
pub type Cell = Option<StoneId>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoneGrid {
    nx: usize,
    ny: usize,
    cells: Vec<Cell>,
}

impl StoneGrid {
    /// Create an empty grid.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            cells: vec![None; nx * ny],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.nx || y as usize >= self.ny {
            return None;
        }
        Some((y as usize) * self.nx + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.nx
    }

    pub fn height(&self) -> usize {
        self.ny
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Stone at (x, y); None when empty or out of bounds.
    pub fn stone_at(&self, x: i32, y: i32) -> Option<StoneId> {
        self.get(x, y).flatten()
    }

    /// Swap two in-bounds cells. Returns false if either is out of bounds.
    pub fn swap(&mut self, a: (i32, i32), b: (i32, i32)) -> bool {
        match (self.index(a.0, a.1), self.index(b.0, b.1)) {
            (Some(i), Some(j)) => {
                self.cells.swap(i, j);
                true
            }
            _ => false,
        }
    }

    /// Find the cell holding `id` by scanning the grid.
    pub fn position_of(&self, id: StoneId) -> Option<(i32, i32)> {
        self.cells
            .iter()
            .position(|c| *c == Some(id))
            .map(|i| ((i % self.nx) as i32, (i / self.nx) as i32))
    }

    /// Occupied cells as `(x, y, id)` in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, StoneId)> + '_ {
        let nx = self.nx;
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            c.map(|id| ((i % nx) as i32, (i / nx) as i32, id))
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// Append-only stone arena. Slot 0 holds a placeholder so that no real stone
/// ever has the raw handle 0.
#[derive(Debug, Clone, PartialEq)]
pub struct StoneTable {
    stones: Vec<Stone>,
}

impl StoneTable {
    pub fn new() -> Self {
        Self {
            stones: vec![Stone::placeholder()],
        }
    }

    pub fn push(&mut self, stone: Stone) -> StoneId {
        self.stones.push(stone);
        // The placeholder keeps every pushed slot >= 1.
        StoneId::from_raw(self.stones.len() as u32 - 1)
            .unwrap_or_else(|| unreachable!("stone table slot 0 is reserved"))
    }

    pub fn get(&self, id: StoneId) -> Option<&Stone> {
        self.stones.get(id.slot())
    }

    pub fn get_mut(&mut self, id: StoneId) -> Option<&mut Stone> {
        self.stones.get_mut(id.slot())
    }

    /// Number of real stones ever generated (the placeholder is not counted).
    pub fn len(&self) -> usize {
        self.stones.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Real stones with their handles, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (StoneId, &Stone)> + '_ {
        self.stones
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(i, s)| StoneId::from_raw(i as u32).map(|id| (id, s)))
    }
}

impl Default for StoneTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The two grids and the stone table they index into.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GridStore {
    pub(crate) committed: StoneGrid,
    pub(crate) presented: StoneGrid,
    pub(crate) stones: StoneTable,
}

impl GridStore {
    pub(crate) fn new(nx: usize, ny: usize) -> Self {
        Self {
            committed: StoneGrid::new(nx, ny),
            presented: StoneGrid::new(nx, ny),
            stones: StoneTable::new(),
        }
    }

    /// Apply `f` to every stone currently visible on the presented grid.
    pub(crate) fn for_each_presented_mut(&mut self, mut f: impl FnMut(&mut Stone)) {
        let stones = &mut self.stones;
        for id in self.presented.cells().iter().flatten() {
            if let Some(stone) = stones.get_mut(*id) {
                f(stone);
            }
        }
    }
}
