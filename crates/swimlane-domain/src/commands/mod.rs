use swimlane_core::SwimlaneResult;

use crate::board::BoardState;

pub mod task_commands;
pub mod transition_commands;

pub use task_commands::*;
pub use transition_commands::*;

/// A single mutation of the board.
///
/// Commands run against a scratch copy of the state (see
/// [`crate::store::reduce`]); returning an error discards every change the
/// command made, so a half-applied command is never observable.
pub trait Command: Send + Sync {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}
