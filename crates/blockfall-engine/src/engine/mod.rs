//! Action-driven game state machine.
//!
//! This module provides the reducer layer on top of the core data
//! structures:
//!
//! - [`GameState`] - the single authoritative state value
//! - [`Action`] - time ticks, moves, rotation, look-ahead feed, reset
//! - [`Lcg`] - the seeded generator behind deterministic piece selection
//!
//! # Game flow
//!
//! An external driver merges its input sources (a fixed-rate timer, user
//! input, a periodic seed feed) into one ordered action stream and folds it:
//!
//! 1. Start from [`GameState::new`]
//! 2. Apply each arriving action with [`Action::apply`] (or fold with
//!    [`reduce`])
//! 3. Hand every resulting state to the renderer
//! 4. Stop delivering gameplay actions once [`GameState::is_over`] reports
//!    the terminal state; `Action::Reset` starts a fresh game
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Action, Axis, CELL_SIZE, GameState, Lcg, reduce};
//!
//! let mut lcg = Lcg::new(7);
//! let actions = [
//!     Action::Tick,
//!     Action::Move { distance: -CELL_SIZE, axis: Axis::X },
//!     Action::Generate { value: lcg.unit() },
//!     Action::Rotate,
//! ];
//! let state = actions.iter().fold(GameState::new(), |s, &a| reduce(&s, a));
//! assert!(!state.is_over());
//! ```

use std::time::Duration;

pub use self::{action::*, rng::*, state::*};

mod action;
pub(crate) mod rng;
mod state;

/// Fixed period of the driver's tick source.
pub const TICK_PERIOD: Duration = Duration::from_millis(20);

/// Period of the look-ahead seed source feeding [`Action::Generate`].
/// Independent of the tick cadence so a fresh piece is ready before a lock
/// needs it.
pub const PIECE_FEED_PERIOD: Duration = Duration::from_millis(100);
