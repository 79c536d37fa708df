use digraph_core::Point;
use serde::{Deserialize, Serialize};

/// Tiling placement for nodes created without explicit coordinates.
///
/// Slot `n` lands in column `n % columns` and row `(n / columns) % rows`, so
/// consecutive nodes fill a row left to right and wrap back to the top after
/// `rows` rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub origin_x: f64,
    pub origin_y: f64,
    pub column_spacing: f64,
    pub row_spacing: f64,
    pub columns: u32,
    pub rows: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin_x: 80.0,
            origin_y: 80.0,
            column_spacing: 100.0,
            row_spacing: 50.0,
            columns: 5,
            rows: 7,
        }
    }
}

impl GridLayout {
    /// `(column, row)` for a sequence number.
    pub fn cell(&self, sequence: i64) -> (i64, i64) {
        let columns = i64::from(self.columns.max(1));
        let rows = i64::from(self.rows.max(1));
        let sequence = sequence.max(0);
        (sequence % columns, (sequence / columns) % rows)
    }

    pub fn position(&self, sequence: i64) -> Point {
        let (column, row) = self.cell(sequence);
        Point::new(
            self.origin_x + self.column_spacing * column as f64,
            self.origin_y + self.row_spacing * row as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_positions() {
        let grid = GridLayout::default();
        assert_eq!(grid.position(0), Point::new(80.0, 80.0));
        assert_eq!(grid.position(4), Point::new(480.0, 80.0));
        assert_eq!(grid.position(5), Point::new(80.0, 130.0));
    }

    #[test]
    fn test_grid_wraps_after_last_row() {
        let grid = GridLayout::default();
        assert_eq!(grid.cell(34), (4, 6));
        assert_eq!(grid.cell(35), (0, 0));
        assert_eq!(grid.position(35), grid.position(0));
    }

    #[test]
    fn test_degenerate_grid_does_not_divide_by_zero() {
        let grid = GridLayout {
            columns: 0,
            rows: 0,
            ..GridLayout::default()
        };
        assert_eq!(grid.cell(12), (0, 0));
    }
}
