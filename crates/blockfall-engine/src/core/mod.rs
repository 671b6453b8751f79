pub use self::{field::*, grid::*, piece::*};

pub(crate) mod field;
pub(crate) mod grid;
pub(crate) mod piece;
