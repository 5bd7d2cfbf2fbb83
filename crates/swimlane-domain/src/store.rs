//! Unidirectional state container for the board.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use swimlane_core::SwimlaneResult;
use uuid::Uuid;

use crate::board::BoardState;
use crate::clock::{Clock, SystemClock};
use crate::commands::Command;

/// Pure transition: apply `command` to a copy of `state`.
pub fn reduce(state: &BoardState, command: &dyn Command) -> SwimlaneResult<BoardState> {
    let mut next = state.clone();
    command.execute(&mut next)?;
    Ok(next)
}

/// Holds the current [`BoardState`] and swaps it for the reduced state on
/// every successful command. Failed commands leave it untouched.
#[derive(Debug)]
pub struct BoardStore {
    state: BoardState,
    revision: u64,
    instance_id: Uuid,
    clock: Arc<dyn Clock>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: BoardState::new(),
            revision: 0,
            instance_id: Uuid::new_v4(),
            clock,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Bumped once per applied command.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn dispatch(&mut self, command: &dyn Command) -> SwimlaneResult<()> {
        let description = command.description();
        match reduce(&self.state, command) {
            Ok(next) => {
                self.state = next;
                self.revision += 1;
                tracing::debug!(
                    instance = %self.instance_id,
                    revision = self.revision,
                    "Executed: {}",
                    description
                );
                Ok(())
            }
            Err(e) => {
                tracing::debug!(instance = %self.instance_id, "Rejected: {} ({})", description, e);
                Err(e)
            }
        }
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}
