//! Mapping between grid cells and screen coordinates.
//!
//! The board is centered on the origin with +Y pointing up, so row 0 (the top
//! row) has the largest y and row `-1` sits one cell above the board.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    nx: usize,
    ny: usize,
    cell_size: f32,
}

impl Geometry {
    pub fn new(nx: usize, ny: usize, cell_size: f32) -> Self {
        Self { nx, ny, cell_size }
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Screen x of a column center. Accepts columns outside the board.
    pub fn column_x(&self, column: i32) -> f32 {
        (column as f32 - self.half_span_x()) * self.cell_size
    }

    /// Screen y of a row center. Accepts rows outside the board.
    pub fn row_y(&self, row: i32) -> f32 {
        (self.half_span_y() - row as f32) * self.cell_size
    }

    /// Fractional column under a screen x.
    pub fn column_at(&self, x: f32) -> f32 {
        x / self.cell_size + self.half_span_x()
    }

    /// Fractional row under a screen y.
    pub fn row_at(&self, y: f32) -> f32 {
        self.half_span_y() - y / self.cell_size
    }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.nx && (y as usize) < self.ny
    }

    fn half_span_x(&self) -> f32 {
        (self.nx as f32 - 1.0) / 2.0
    }

    fn half_span_y(&self) -> f32 {
        (self.ny as f32 - 1.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_descend_and_row_minus_one_is_above() {
        let g = Geometry::new(3, 3, 64.0);
        assert_eq!(g.row_y(1), 0.0);
        assert_eq!(g.row_y(0), 64.0);
        assert_eq!(g.row_y(-1), 128.0);
        assert_eq!(g.row_y(2), -64.0);
    }

    #[test]
    fn columns_are_centered() {
        let g = Geometry::new(4, 2, 10.0);
        assert_eq!(g.column_x(0), -15.0);
        assert_eq!(g.column_x(3), 15.0);
    }

    #[test]
    fn inverse_mapping_recovers_cells() {
        let g = Geometry::new(7, 5, 32.0);
        for col in 0..7 {
            assert_eq!(g.column_at(g.column_x(col)), col as f32);
        }
        for row in -1..5 {
            assert_eq!(g.row_at(g.row_y(row)), row as f32);
        }
    }

    #[test]
    fn contains_rejects_negative_and_overflow() {
        let g = Geometry::new(2, 3, 1.0);
        assert!(g.contains(0, 0));
        assert!(g.contains(1, 2));
        assert!(!g.contains(-1, 0));
        assert!(!g.contains(2, 0));
        assert!(!g.contains(0, 3));
    }
}
