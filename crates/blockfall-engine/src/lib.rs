//! Deterministic state-transition core of a falling-block puzzle game.
//!
//! Everything here is plain values and pure functions: a driver feeds
//! [`Action`]s into [`Action::apply`] one at a time, each producing the next
//! [`GameState`]. Rendering, input binding, and timers live outside this
//! crate and only ever observe states.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
