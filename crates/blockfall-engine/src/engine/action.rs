use serde::{Deserialize, Serialize};

use crate::core::{Axis, CELL_SIZE, Piece, Shape};

use super::state::GameState;

/// Points awarded per cleared row.
const SCORE_PER_ROW: usize = 1000;

/// One discrete game input, applied to a state by the reducer.
///
/// Actions arrive serialized from the driver's merged sources (timer, user
/// input, look-ahead feed); each is a pure function from state to state.
/// Folding a recorded action log over the initial state replays a game
/// exactly.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Action, GameState};
///
/// let state = GameState::new();
/// let next = Action::Tick.apply(&state);
/// assert_eq!(next, Action::Tick.apply(&state));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum Action {
    /// Advance one time step: descend one cell or lock.
    Tick,
    /// Shift the falling piece by `distance` pixels along `axis`.
    Move { distance: i32, axis: Axis },
    /// Step the falling piece to its next orientation, if the rotated layout
    /// is legal.
    Rotate,
    /// Replace the look-ahead piece, selecting its shape from a value in
    /// `[-1, 1]` produced by the driver's seed source.
    Generate { value: f64 },
    /// Return to the canonical initial state, carrying the high score over.
    Reset,
}

/// Folds one action over one state. Convenience form of [`Action::apply`]
/// for use with iterator folds.
#[must_use]
pub fn reduce(state: &GameState, action: Action) -> GameState {
    action.apply(state)
}

impl Action {
    /// Applies the action, producing the next state.
    ///
    /// Total and pure: every `(state, action)` pair yields a valid state,
    /// identical inputs yield identical outputs. A terminal state absorbs
    /// everything except [`Action::Reset`].
    #[must_use]
    pub fn apply(&self, state: &GameState) -> GameState {
        if state.game_end && !matches!(self, Self::Reset) {
            return state.clone();
        }
        match *self {
            Self::Tick => clear_rows(check_game_over(detect_resting(step_down(state)))),
            Self::Move { distance, axis } => {
                clear_rows(check_game_over(move_piece(state, distance, axis)))
            }
            Self::Rotate => rotate_piece(state),
            Self::Generate { value } => generate_next(state, value),
            Self::Reset => reset(state),
        }
    }
}

/// Locks the falling piece into the field and promotes the look-ahead piece.
///
/// The look-ahead slot keeps its value until the next `Generate` overwrites
/// it; the feed runs on its own cadence so a fresh piece is normally ready
/// before it is needed.
fn lock_current(state: &mut GameState) {
    state.field.insert_piece(&state.current);
    state.current = state.next;
}

/// Tick descent: one cell down while the floor allows it, otherwise lock.
fn step_down(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.current.is_inside(CELL_SIZE, Axis::Y) {
        next.current = next.current.translated(CELL_SIZE, Axis::Y);
    } else {
        lock_current(&mut next);
    }
    next
}

/// Catches a piece that descended onto the stack without leaving the field:
/// resting directly on settled cells locks it just like reaching the floor.
fn detect_resting(mut state: GameState) -> GameState {
    if state.field.is_touching(&state.current) {
        lock_current(&mut state);
    }
    state
}

fn check_game_over(mut state: GameState) -> GameState {
    if state.field.overlaps(&state.current) {
        state.game_end = true;
    }
    state
}

fn clear_rows(mut state: GameState) -> GameState {
    let cleared = state.field.clear_full_rows();
    state.rows_cleared = cleared;
    if cleared > 0 {
        state.score += cleared * SCORE_PER_ROW;
        state.high_score = state.high_score.max(state.score);
    }
    state
}

/// User move: adopt the shifted piece when it stays inside the field and
/// clear of the stack; lock when a descent has run out of field; otherwise
/// (blocked sideways) leave the state as it is.
fn move_piece(state: &GameState, distance: i32, axis: Axis) -> GameState {
    let mut next = state.clone();
    if next.current.is_inside(distance, axis)
        && !next.field.move_collides(&next.current, distance, axis)
    {
        next.current = next.current.translated(distance, axis);
    } else if axis == Axis::Y && !next.current.is_inside(distance, axis) {
        lock_current(&mut next);
    }
    next
}

/// Rotation commits only when every rotated cell stays inside the side walls
/// and the floor and lands on no settled cell. No wall kicks: an illegal
/// rotation is a no-op.
fn rotate_piece(state: &GameState) -> GameState {
    let mut next = state.clone();
    let candidate = next.current.rotated();
    if candidate.is_inside(0, Axis::X)
        && candidate.is_inside(0, Axis::Y)
        && !next.field.overlaps(&candidate)
    {
        next.current = candidate;
    }
    next
}

fn generate_next(state: &GameState, value: f64) -> GameState {
    let mut next = state.clone();
    next.next = Piece::spawn(Shape::from_unit(value));
    next
}

fn reset(state: &GameState) -> GameState {
    let mut next = GameState::new();
    next.high_score = state.high_score;
    next
}
