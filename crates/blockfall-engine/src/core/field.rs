use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    grid::{Axis, CELL_SIZE, GRID_HEIGHT, GRID_WIDTH, Position},
    piece::{Piece, Shape},
};

/// The settled field: every cell that has locked in place.
///
/// Cells are stored individually, keyed by position. A locked piece
/// dissolves into four independent cells, so clearing a row never leaves a
/// "partial piece" behind - surviving cells simply drop on their own.
///
/// The lock step is the only writer; it never inserts a cell on top of
/// another one, so distinct settled cells never share a position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    cells: BTreeMap<Position, Shape>,
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        // Format: one string per cell, "shape@x,y" (e.g., "T@100,380")
        let mut seq = serializer.serialize_seq(Some(self.cells.len()))?;
        for (pos, shape) in &self.cells {
            seq.serialize_element(&format!("{}@{},{}", shape.as_char(), pos.x, pos.y))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<String>::deserialize(deserializer)?;
        let mut cells = BTreeMap::new();
        for entry in entries {
            let (shape_str, pos_str) = entry.split_once('@').ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "expected format 'shape@x,y', got '{entry}'"
                ))
            })?;
            let mut shape_chars = shape_str.chars();
            let (Some(c), None) = (shape_chars.next(), shape_chars.next()) else {
                return Err(serde::de::Error::custom(format!(
                    "shape must be a single character, got '{shape_str}'"
                )));
            };
            let shape =
                Shape::try_from(c).map_err(|e| serde::de::Error::custom(e.to_string()))?;
            let (x_str, y_str) = pos_str.split_once(',').ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "missing ',' in format 'shape@x,y', got '{entry}'"
                ))
            })?;
            let x = x_str.parse::<i32>().map_err(|e| {
                serde::de::Error::custom(format!("invalid x position: {x_str} ({e})"))
            })?;
            let y = y_str.parse::<i32>().map_err(|e| {
                serde::de::Error::custom(format!("invalid y position: {y_str} ({e})"))
            })?;
            cells.insert(Position::new(x, y), shape);
        }
        Ok(Self { cells })
    }
}

impl Field {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn occupied(&self, position: Position) -> bool {
        self.cells.contains_key(&position)
    }

    #[must_use]
    pub fn shape_at(&self, position: Position) -> Option<Shape> {
        self.cells.get(&position).copied()
    }

    /// Iterates over all settled cells, in position order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Shape)> + '_ {
        self.cells.iter().map(|(&pos, &shape)| (pos, shape))
    }

    /// Locks a piece's cells into the field.
    pub fn insert_piece(&mut self, piece: &Piece) {
        for pos in piece.positions() {
            self.cells.insert(pos, piece.shape());
        }
    }

    /// Whether shifting `piece` by `distance` along `axis` would run it into
    /// settled cells.
    ///
    /// The tolerance is axis-specific: descending, any settled cell in the
    /// same column within one cell height of the shifted position blocks the
    /// move; sideways, the target column blocks when a settled cell's y lies
    /// within one cell height of the moving cell's.
    #[must_use]
    pub fn move_collides(&self, piece: &Piece, distance: i32, axis: Axis) -> bool {
        match axis {
            Axis::Y => piece.positions().iter().any(|c| {
                let shifted_y = c.y + distance;
                self.cells
                    .keys()
                    .any(|s| c.x == s.x && shifted_y + CELL_SIZE >= s.y)
            }),
            Axis::X => piece.positions().iter().any(|c| {
                let shifted_x = c.x + distance;
                self.cells.keys().any(|s| {
                    shifted_x == s.x && c.y + CELL_SIZE >= s.y && c.y - CELL_SIZE <= s.y
                })
            }),
        }
    }

    /// Whether `piece` rests directly on settled cells: some cell sits
    /// exactly one cell height above a settled cell in the same column.
    #[must_use]
    pub fn is_touching(&self, piece: &Piece) -> bool {
        piece
            .positions()
            .iter()
            .any(|c| self.occupied(Position::new(c.x, c.y + CELL_SIZE)))
    }

    /// Whether any cell of `piece` coincides with a settled cell. Signals the
    /// field has filled up to the spawn point.
    #[must_use]
    pub fn overlaps(&self, piece: &Piece) -> bool {
        piece.positions().iter().any(|&pos| self.occupied(pos))
    }

    /// Number of settled cells per visible row. Cells above the top row are
    /// not counted.
    #[must_use]
    pub fn row_counts(&self) -> [usize; GRID_HEIGHT] {
        let mut counts = [0; GRID_HEIGHT];
        for pos in self.cells.keys() {
            if let Some(row) = pos.row() {
                counts[row] += 1;
            }
        }
        counts
    }

    /// Removes every fully occupied row and drops the cells above, one cell
    /// height per cleared row below them. Returns the number of rows cleared.
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn clear_full_rows(&mut self) -> usize {
        let counts = self.row_counts();
        let full: ArrayVec<usize, GRID_HEIGHT> = (0..GRID_HEIGHT)
            .filter(|&row| counts[row] == GRID_WIDTH)
            .collect();
        if full.is_empty() {
            return 0;
        }

        let old = std::mem::take(&mut self.cells);
        for (pos, shape) in old {
            if pos.row().is_some_and(|row| full.contains(&row)) {
                continue;
            }
            let cleared_below = full
                .iter()
                .filter(|&&row| (row as i32) * CELL_SIZE > pos.y)
                .count();
            let dropped = pos.translated(cleared_below as i32 * CELL_SIZE, Axis::Y);
            self.cells.insert(dropped, shape);
        }
        full.len()
    }

    /// Creates a `Field` from ASCII art, as a test fixture.
    ///
    /// Each non-blank line is one row, top row first; `.` is empty, a shape
    /// letter settles a cell of that shape, and `#` settles a fallback-shape
    /// cell. Rows must be exactly [`GRID_WIDTH`] characters wide.
    ///
    /// # Panics
    ///
    /// Panics on malformed art; this is a fixture builder, not a parser.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn from_ascii(art: &str) -> Self {
        let mut field = Self::new();
        let lines = art.lines().map(str::trim).filter(|line| !line.is_empty());
        for (y, line) in lines.enumerate() {
            let chars: Vec<char> = line.chars().collect();
            assert_eq!(
                chars.len(),
                GRID_WIDTH,
                "each row must have exactly {GRID_WIDTH} cells, got {} at row {y}",
                chars.len(),
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '.' {
                    continue;
                }
                let shape = if ch == '#' {
                    Shape::FALLBACK
                } else {
                    Shape::from_char(ch)
                        .unwrap_or_else(|| panic!("unknown cell character '{ch}'"))
                };
                let pos =
                    Position::new(x as i32 * CELL_SIZE, y as i32 * CELL_SIZE);
                field.cells.insert(pos, shape);
            }
        }
        field
    }
}
