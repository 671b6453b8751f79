use serde::{Deserialize, Serialize};

/// Width of the play area in pixels.
pub const CANVAS_WIDTH: i32 = 200;
/// Height of the play area in pixels.
pub const CANVAS_HEIGHT: i32 = 400;
/// Edge length of one grid cell in pixels. All cell positions are multiples
/// of this.
pub const CELL_SIZE: i32 = 20;

/// Number of columns in the grid.
pub const GRID_WIDTH: usize = (CANVAS_WIDTH / CELL_SIZE) as usize;
/// Number of rows in the grid.
pub const GRID_HEIGHT: usize = (CANVAS_HEIGHT / CELL_SIZE) as usize;

/// Movement axis addressed by a move action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Deserialize, Serialize,
)]
pub enum Axis {
    #[display("x")]
    X,
    #[display("y")]
    Y,
}

/// Pixel-aligned position of one cell (its top-left corner).
///
/// `y` may be negative while a piece still hangs above the visible area;
/// there is no upper wall.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by `distance` along `axis`, the other
    /// axis untouched.
    #[must_use]
    pub const fn translated(self, distance: i32, axis: Axis) -> Self {
        match axis {
            Axis::X => Self::new(self.x + distance, self.y),
            Axis::Y => Self::new(self.x, self.y + distance),
        }
    }

    /// Whether the cell at this position lies inside the play area along the
    /// given axis.
    ///
    /// The x axis is walled on both sides; the y axis only has a floor, so
    /// cells above the top row still count as inside.
    #[must_use]
    pub const fn is_inside(self, axis: Axis) -> bool {
        match axis {
            Axis::X => 0 <= self.x && self.x <= CANVAS_WIDTH - CELL_SIZE,
            Axis::Y => self.y <= CANVAS_HEIGHT - CELL_SIZE,
        }
    }

    /// Row index for occupancy counting, or `None` for cells above the
    /// visible area.
    #[must_use]
    pub fn row(self) -> Option<usize> {
        if self.y < 0 {
            return None;
        }
        Some((self.y / CELL_SIZE) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(GRID_WIDTH, 10);
        assert_eq!(GRID_HEIGHT, 20);
    }

    #[test]
    fn test_translated_shifts_single_axis() {
        let p = Position::new(100, 40);
        assert_eq!(p.translated(20, Axis::X), Position::new(120, 40));
        assert_eq!(p.translated(-20, Axis::X), Position::new(80, 40));
        assert_eq!(p.translated(20, Axis::Y), Position::new(100, 60));
    }

    #[test]
    fn test_x_bounds_cover_all_columns() {
        assert!(Position::new(0, 0).is_inside(Axis::X));
        assert!(Position::new(CANVAS_WIDTH - CELL_SIZE, 0).is_inside(Axis::X));
        assert!(!Position::new(-CELL_SIZE, 0).is_inside(Axis::X));
        assert!(!Position::new(CANVAS_WIDTH, 0).is_inside(Axis::X));
    }

    #[test]
    fn test_y_bounds_floor_only() {
        assert!(Position::new(0, CANVAS_HEIGHT - CELL_SIZE).is_inside(Axis::Y));
        assert!(!Position::new(0, CANVAS_HEIGHT).is_inside(Axis::Y));
        // Above the top row is legal: pieces spawn there.
        assert!(Position::new(0, -2 * CELL_SIZE).is_inside(Axis::Y));
    }

    #[test]
    fn test_row_index() {
        assert_eq!(Position::new(0, 0).row(), Some(0));
        assert_eq!(Position::new(0, 380).row(), Some(19));
        assert_eq!(Position::new(0, -20).row(), None);
    }

    #[test]
    fn test_axis_display() {
        assert_eq!(Axis::X.to_string(), "x");
        assert_eq!(Axis::Y.to_string(), "y");
    }
}
