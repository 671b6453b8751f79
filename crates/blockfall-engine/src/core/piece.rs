use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::grid::{Axis, CELL_SIZE, Position};

/// A falling tetromino: four grid-aligned cells moving as one unit.
///
/// Pieces are immutable - movement and rotation return new `Piece` values.
/// All four cells always share the piece's shape and orientation; the first
/// cell is the pivot that rotations revolve around.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Axis, CELL_SIZE, Piece, Shape};
///
/// let piece = Piece::spawn(Shape::T);
/// let moved = piece.translated(-CELL_SIZE, Axis::X);
/// let rotated = moved.rotated();
/// assert_eq!(rotated.shape(), Shape::T);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Piece {
    shape: Shape,
    orientation: Orientation,
    cells: [Position; 4],
}

impl Piece {
    /// Horizontal spawn column and top row, shared by every shape's pivot.
    pub const SPAWN_POSITION: Position = Position::new(100, 0);

    /// Creates a piece in its canonical spawn layout.
    #[must_use]
    pub fn spawn(shape: Shape) -> Self {
        Self::from_pivot(shape, Orientation::default(), Self::SPAWN_POSITION)
    }

    fn from_pivot(shape: Shape, orientation: Orientation, pivot: Position) -> Self {
        let offsets = shape.offsets(orientation);
        let cells = offsets.map(|(dx, dy)| {
            Position::new(pivot.x + dx * CELL_SIZE, pivot.y + dy * CELL_SIZE)
        });
        Self {
            shape,
            orientation,
            cells,
        }
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The cell rotations revolve around.
    #[must_use]
    pub fn pivot(&self) -> Position {
        self.cells[0]
    }

    #[must_use]
    pub fn positions(&self) -> [Position; 4] {
        self.cells
    }

    /// Per-cell views carrying the shape and orientation tags, for renderers.
    #[must_use]
    pub fn cells(&self) -> [Cell; 4] {
        self.cells.map(|position| Cell {
            position,
            shape: self.shape,
            orientation: self.orientation,
        })
    }

    /// Returns the piece shifted by `distance` along `axis`.
    #[must_use]
    pub fn translated(&self, distance: i32, axis: Axis) -> Self {
        Self {
            shape: self.shape,
            orientation: self.orientation,
            cells: self.cells.map(|c| c.translated(distance, axis)),
        }
    }

    /// Returns the piece stepped to the next orientation in its shape's
    /// rotation cycle, cells recomputed around the pivot.
    ///
    /// No validity check happens here; callers decide whether the rotated
    /// piece may be adopted.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let orientation = self.orientation.next(self.shape.orientation_states());
        Self::from_pivot(self.shape, orientation, self.pivot())
    }

    /// Whether every cell, hypothetically shifted by `distance` along `axis`,
    /// stays inside the play area on that axis.
    #[must_use]
    pub fn is_inside(&self, distance: i32, axis: Axis) -> bool {
        self.cells
            .iter()
            .all(|c| c.translated(distance, axis).is_inside(axis))
    }
}

/// One unit square of a piece: position plus the tags a renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Cell {
    pub position: Position,
    pub shape: Shape,
    pub orientation: Orientation,
}

impl Cell {
    #[must_use]
    pub fn color(&self) -> Color {
        self.shape.color()
    }
}

/// Rotation state of a piece: an index into its shape's rotation cycle.
///
/// The cycle length is shape-dependent (see [`Shape::orientation_states`]);
/// stepping wraps around modulo that length.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Orientation(u8);

impl Orientation {
    #[must_use]
    pub fn next(self, states: u8) -> Self {
        Self((self.0 + 1) % states)
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Display color of a shape, by CSS color name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Deserialize, Serialize,
)]
pub enum Color {
    #[display("red")]
    Red,
    #[display("blue")]
    Blue,
    #[display("green")]
    Green,
    #[display("yellow")]
    Yellow,
    #[display("lightblue")]
    LightBlue,
    #[display("purple")]
    Purple,
    #[display("orange")]
    Orange,
}

/// Error returned when a character is not a shape tag.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown shape tag '{found}'")]
pub struct ParseShapeError {
    pub found: char,
}

/// Enum representing the seven canonical tetromino shapes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Deserialize, Serialize,
)]
#[repr(u8)]
pub enum Shape {
    I = 0,
    O = 1,
    T = 2,
    J = 3,
    L = 4,
    S = 5,
    Z = 6,
}

impl Distribution<Shape> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        match rng.random_range(0..=6) {
            0 => Shape::I,
            1 => Shape::O,
            2 => Shape::T,
            3 => Shape::J,
            4 => Shape::L,
            5 => Shape::S,
            _ => Shape::Z,
        }
    }
}

impl Shape {
    /// Number of shapes (7).
    pub const LEN: usize = 7;

    /// Shape chosen when a selector value falls outside the catalog range.
    pub const FALLBACK: Self = Shape::O;

    const ORDER: [Self; Self::LEN] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::J,
        Shape::L,
        Shape::S,
        Shape::Z,
    ];

    /// Maps a value in `[-1, 1]` to a shape.
    ///
    /// The range is partitioned into [`Shape::LEN`] contiguous half-open
    /// intervals of width 2/7, in catalog order. The upper boundary value
    /// (and anything outside the range, including non-finite values) maps to
    /// [`Shape::FALLBACK`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unit(value: f64) -> Self {
        let scaled = (value + 1.0) / 2.0 * Self::LEN as f64;
        if scaled.is_finite() && (0.0..Self::LEN as f64).contains(&scaled) {
            Self::ORDER[scaled as usize]
        } else {
            Self::FALLBACK
        }
    }

    /// Fixed display color of the shape.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Shape::I => Color::LightBlue,
            Shape::O => Color::Yellow,
            Shape::T => Color::Purple,
            Shape::J => Color::Blue,
            Shape::L => Color::Orange,
            Shape::S => Color::Green,
            Shape::Z => Color::Red,
        }
    }

    /// Length of the shape's rotation cycle.
    ///
    /// The I piece alternates between two layouts, the O piece never changes,
    /// every other shape walks four quarter turns.
    #[must_use]
    pub const fn orientation_states(self) -> u8 {
        match self {
            Shape::I => 2,
            Shape::O => 1,
            _ => 4,
        }
    }

    /// Returns the single character representation of this shape.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Shape::I => 'I',
            Shape::O => 'O',
            Shape::T => 'T',
            Shape::J => 'J',
            Shape::L => 'L',
            Shape::S => 'S',
            Shape::Z => 'Z',
        }
    }

    /// Parses a shape from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Shape::I),
            'O' => Some(Shape::O),
            'T' => Some(Shape::T),
            'J' => Some(Shape::J),
            'L' => Some(Shape::L),
            'S' => Some(Shape::S),
            'Z' => Some(Shape::Z),
            _ => None,
        }
    }

    /// Cell offsets (in cell units, relative to the pivot) for the given
    /// orientation.
    fn offsets(self, orientation: Orientation) -> OffsetRow {
        ROTATION_OFFSETS[self as usize][orientation.as_usize()]
    }
}

impl TryFrom<char> for Shape {
    type Error = ParseShapeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(ParseShapeError { found: c })
    }
}

/// Cell offsets of one orientation, pivot first (always `(0, 0)`).
type OffsetRow = [(i32, i32); 4];

/// Generates all 4 orientation states of a shape by rotating the spawn
/// offsets 90° clockwise around the pivot.
///
/// Shapes with shorter cycles simply never index past their cycle length.
const fn offset_rotations(base: OffsetRow) -> [OffsetRow; 4] {
    let mut table = [base; 4];
    let mut i = 1;
    while i < 4 {
        let mut row = [(0, 0); 4];
        let mut j = 0;
        while j < 4 {
            let (dx, dy) = table[i - 1][j];
            row[j] = (-dy, dx);
            j += 1;
        }
        table[i] = row;
        i += 1;
    }
    table
}

const ROTATION_OFFSETS: [[OffsetRow; 4]; Shape::LEN] = [
    // I-piece: horizontal bar, pivot third from the left
    offset_rotations([(0, 0), (-1, 0), (1, 0), (-2, 0)]),
    // O-piece: 2x2 square
    offset_rotations([(0, 0), (-1, 0), (0, 1), (-1, 1)]),
    // T-piece: stem below the pivot
    offset_rotations([(0, 0), (-1, 0), (1, 0), (0, 1)]),
    // J-piece
    offset_rotations([(0, 0), (1, 0), (2, 0), (2, 1)]),
    // L-piece
    offset_rotations([(0, 0), (-1, 0), (-2, 0), (-2, 1)]),
    // S-piece
    offset_rotations([(0, 0), (1, 0), (0, 1), (-1, 1)]),
    // Z-piece
    offset_rotations([(0, 0), (-1, 0), (0, 1), (1, 1)]),
];

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use crate::engine::rng::Lcg;

    use super::*;

    #[test]
    fn test_spawn_layout() {
        for shape in Shape::ORDER {
            let piece = Piece::spawn(shape);
            assert_eq!(piece.pivot(), Piece::SPAWN_POSITION);
            assert_eq!(piece.shape(), shape);
            assert_eq!(piece.orientation(), Orientation::default());
            for cell in piece.cells() {
                assert_eq!(cell.shape, shape);
                assert_eq!(cell.orientation, Orientation::default());
                assert_eq!(cell.position.x % CELL_SIZE, 0);
                assert_eq!(cell.position.y % CELL_SIZE, 0);
            }
            // Four distinct cells.
            let mut positions = piece.positions().to_vec();
            positions.sort_unstable();
            positions.dedup();
            assert_eq!(positions.len(), 4, "{shape} has overlapping cells");
        }
    }

    #[test]
    fn test_pivot_offset_is_zero_everywhere() {
        for table in &ROTATION_OFFSETS {
            for row in table {
                assert_eq!(row[0], (0, 0));
            }
        }
    }

    #[test]
    fn test_rotation_cycle_lengths() {
        let i = Piece::spawn(Shape::I);
        assert_ne!(i.rotated(), i);
        assert_eq!(i.rotated().rotated(), i);

        let o = Piece::spawn(Shape::O);
        assert_eq!(o.rotated(), o);

        let t = Piece::spawn(Shape::T);
        assert_ne!(t.rotated().rotated(), t);
        assert_eq!(t.rotated().rotated().rotated().rotated(), t);
    }

    #[test]
    fn test_rotation_keeps_pivot_and_shape() {
        for shape in Shape::ORDER {
            let piece = Piece::spawn(shape).translated(3 * CELL_SIZE, Axis::Y);
            let rotated = piece.rotated();
            assert_eq!(rotated.pivot(), piece.pivot());
            assert_eq!(rotated.shape(), shape);
        }
    }

    #[test]
    fn test_vertical_i_layout() {
        let piece = Piece::spawn(Shape::I).rotated();
        let pivot = piece.pivot();
        let expected = [
            pivot,
            Position::new(pivot.x, pivot.y - CELL_SIZE),
            Position::new(pivot.x, pivot.y + CELL_SIZE),
            Position::new(pivot.x, pivot.y - 2 * CELL_SIZE),
        ];
        assert_eq!(piece.positions(), expected);
    }

    #[test]
    fn test_from_unit_partitions_range() {
        assert_eq!(Shape::from_unit(-1.0), Shape::I);
        assert_eq!(Shape::from_unit(-0.8), Shape::I);
        assert_eq!(Shape::from_unit(-0.7), Shape::O);
        assert_eq!(Shape::from_unit(0.0), Shape::J);
        assert_eq!(Shape::from_unit(0.99), Shape::Z);
    }

    #[test]
    fn test_from_unit_fallback() {
        assert_eq!(Shape::from_unit(1.0), Shape::FALLBACK);
        assert_eq!(Shape::from_unit(1.5), Shape::FALLBACK);
        assert_eq!(Shape::from_unit(-1.01), Shape::FALLBACK);
        assert_eq!(Shape::from_unit(f64::NAN), Shape::FALLBACK);
    }

    #[test]
    fn test_char_round_trip() {
        for shape in Shape::ORDER {
            assert_eq!(Shape::from_char(shape.as_char()), Some(shape));
            assert_eq!(Shape::try_from(shape.as_char()).unwrap(), shape);
        }
        assert!(Shape::from_char('X').is_none());
        let err = Shape::try_from('x').unwrap_err();
        assert_eq!(err.to_string(), "unknown shape tag 'x'");
    }

    #[test]
    fn test_sample_is_deterministic_per_seed() {
        let mut a = Lcg::seed_from_u64(7);
        let mut b = Lcg::seed_from_u64(7);
        for _ in 0..32 {
            let sa: Shape = a.sample(StandardUniform);
            let sb: Shape = b.sample(StandardUniform);
            assert_eq!(sa, sb);
        }
    }

    #[test]
    fn test_colors_are_unique() {
        let mut colors: Vec<_> = Shape::ORDER.iter().map(|s| s.color()).collect();
        colors.sort_by_key(|c| c.to_string());
        colors.dedup();
        assert_eq!(colors.len(), Shape::LEN);
    }
}
