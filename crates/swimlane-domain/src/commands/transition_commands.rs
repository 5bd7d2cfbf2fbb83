use chrono::{DateTime, Utc};

use super::Command;
use crate::board::BoardState;
use crate::history::HistoryEntry;
use crate::status::Status;
use crate::task::TaskId;
use crate::transition::{DraggedTask, DropPlan, PendingTransition};
use swimlane_core::{SwimlaneError, SwimlaneResult};

/// Append a history entry and apply its status change in one step.
///
/// The entry's `task` field is rewritten to the task's current title.
pub struct RecordTransition {
    pub task_id: TaskId,
    pub entry: HistoryEntry,
}

impl RecordTransition {
    pub fn new(transition: &PendingTransition, at: DateTime<Utc>, info: Option<String>) -> Self {
        Self {
            task_id: transition.task_id.clone(),
            entry: HistoryEntry::new(
                transition.title.clone(),
                transition.from,
                transition.to,
                at,
                info,
            ),
        }
    }
}

impl Command for RecordTransition {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        let task = state.task_mut(&self.task_id)?;
        if task.status != self.entry.from {
            return Err(SwimlaneError::Validation(format!(
                "task {} is in {}, not {}",
                task.id, task.status, self.entry.from
            )));
        }
        task.update_status(self.entry.to, self.entry.additional_info.clone());
        let mut entry = self.entry.clone();
        entry.task = task.title.clone();

        state.history.append(entry);
        state.release_task(&self.task_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Move task {} from {} to {}",
            self.task_id, self.entry.from, self.entry.to
        )
    }
}

/// Pick a task up from its column.
pub struct StartDrag {
    pub task_id: TaskId,
}

impl Command for StartDrag {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        if state.pending.is_some() {
            return Err(SwimlaneError::Validation(
                "a drop is waiting for additional info".to_string(),
            ));
        }
        let task = state.require_task(&self.task_id)?;
        state.drag = Some(DraggedTask {
            task_id: task.id.clone(),
            original_status: task.status,
        });
        Ok(())
    }

    fn description(&self) -> String {
        format!("Drag task {}", self.task_id)
    }
}

/// Drop the dragged task on a column. Direct moves commit immediately;
/// others park as a pending transition until [`SubmitInfo`].
pub struct DropTask {
    pub target: Status,
    pub at: DateTime<Utc>,
}

impl Command for DropTask {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        match state.plan_drop(self.target)? {
            DropPlan::Direct(transition) => {
                RecordTransition::new(&transition, self.at, None).execute(state)
            }
            DropPlan::RequiresInfo(transition) => {
                state.pending = Some(transition);
                Ok(())
            }
        }
    }

    fn description(&self) -> String {
        format!("Drop on {}", self.target)
    }
}

/// Commit the pending transition with the user's context.
pub struct SubmitInfo {
    pub info: String,
    pub at: DateTime<Utc>,
}

impl SubmitInfo {
    /// Blank input is recorded as no info.
    pub fn normalized_info(&self) -> Option<String> {
        let trimmed = self.info.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl Command for SubmitInfo {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        let transition = state.pending.clone().ok_or_else(|| {
            SwimlaneError::Validation("no drop is waiting for additional info".to_string())
        })?;
        RecordTransition::new(&transition, self.at, self.normalized_info()).execute(state)
    }

    fn description(&self) -> String {
        "Submit additional info".to_string()
    }
}

/// Abandon the current drag and any pending transition.
pub struct CancelDrop;

impl Command for CancelDrop {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        state.drag = None;
        state.pending = None;
        Ok(())
    }

    fn description(&self) -> String {
        "Cancel drop".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{DeleteTask, LoadTasks};
    use crate::store::reduce;
    use crate::task::Task;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
    }

    fn board() -> BoardState {
        reduce(
            &BoardState::new(),
            &LoadTasks {
                tasks: vec![Task::new("1", "Write docs"), Task::new("2", "Other")],
            },
        )
        .unwrap()
    }

    fn drag(state: &BoardState, id: &str) -> BoardState {
        reduce(state, &StartDrag { task_id: id.into() }).unwrap()
    }

    #[test]
    fn test_direct_drop_commits_one_entry() {
        let state = drag(&board(), "1");
        let state = reduce(
            &state,
            &DropTask {
                target: Status::InProgress,
                at: at(0),
            },
        )
        .unwrap();

        assert_eq!(state.task("1").unwrap().status, Status::InProgress);
        let entries: Vec<_> = state.history_for("Write docs").collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].from, Status::Todo);
        assert_eq!(entries[0].to, Status::InProgress);
        assert_eq!(entries[0].date, at(0));
        assert!(state.drag().is_none());
        assert!(state.pending().is_none());
    }

    #[test]
    fn test_skip_waits_for_info() {
        let state = drag(&board(), "1");
        let state = reduce(
            &state,
            &DropTask {
                target: Status::Done,
                at: at(0),
            },
        )
        .unwrap();

        assert_eq!(state.task("1").unwrap().status, Status::Todo);
        assert!(state.history().is_empty());
        assert!(state.is_awaiting_info());

        let state = reduce(
            &state,
            &SubmitInfo {
                info: "trivial change".into(),
                at: at(1),
            },
        )
        .unwrap();
        let task = state.task("1").unwrap();
        assert_eq!(task.status, Status::Done);
        assert_eq!(task.additional_info.as_deref(), Some("trivial change"));
        let entries: Vec<_> = state.history_for("Write docs").collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].to, Status::Done);
        assert_eq!(entries[0].additional_info.as_deref(), Some("trivial change"));
        assert!(!state.is_awaiting_info());
    }

    #[test]
    fn test_same_column_drop_requires_info() {
        let state = drag(&board(), "1");
        let state = reduce(
            &state,
            &DropTask {
                target: Status::Todo,
                at: at(0),
            },
        )
        .unwrap();
        assert!(state.is_awaiting_info());
    }

    #[test]
    fn test_cancel_commits_nothing() {
        let state = drag(&board(), "1");
        let state = reduce(
            &state,
            &DropTask {
                target: Status::Done,
                at: at(0),
            },
        )
        .unwrap();
        let state = reduce(&state, &CancelDrop).unwrap();
        assert_eq!(state.task("1").unwrap().status, Status::Todo);
        assert!(state.history().is_empty());
        assert!(state.drag().is_none());
        assert!(!state.is_awaiting_info());
    }

    #[test]
    fn test_drop_without_drag_is_rejected() {
        let result = reduce(
            &board(),
            &DropTask {
                target: Status::InProgress,
                at: at(0),
            },
        );
        assert!(matches!(result, Err(SwimlaneError::Validation(_))));
    }

    #[test]
    fn test_submit_without_pending_is_rejected() {
        let result = reduce(
            &board(),
            &SubmitInfo {
                info: "x".into(),
                at: at(0),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cannot_start_drag_while_awaiting_info() {
        let state = drag(&board(), "1");
        let state = reduce(
            &state,
            &DropTask {
                target: Status::Done,
                at: at(0),
            },
        )
        .unwrap();
        assert!(reduce(&state, &StartDrag { task_id: "2".into() }).is_err());
    }

    #[test]
    fn test_record_transition_checks_source_status() {
        let cmd = RecordTransition {
            task_id: "1".into(),
            entry: HistoryEntry::new("Write docs", Status::InProgress, Status::Done, at(0), None),
        };
        let result = reduce(&board(), &cmd);
        assert!(matches!(result, Err(SwimlaneError::Validation(_))));
    }

    #[test]
    fn test_history_for_three_transitions() {
        let mut state = board();
        for (minute, target, info) in [
            (0, Status::InProgress, None),
            (1, Status::Done, None),
            (2, Status::Todo, Some("reopened")),
        ] {
            state = drag(&state, "1");
            state = reduce(&state, &DropTask { target, at: at(minute) }).unwrap();
            if let Some(info) = info {
                state = reduce(
                    &state,
                    &SubmitInfo {
                        info: info.into(),
                        at: at(minute),
                    },
                )
                .unwrap();
            }
        }

        let entries: Vec<_> = state.history_for("Write docs").collect();
        assert_eq!(entries.len(), 3);
        let dates: Vec<_> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![at(0), at(1), at(2)]);
        assert_eq!(state.history_for("Other").count(), 0);
    }

    #[test]
    fn test_delete_keeps_history() {
        let state = drag(&board(), "1");
        let state = reduce(
            &state,
            &DropTask {
                target: Status::InProgress,
                at: at(0),
            },
        )
        .unwrap();
        let before = state.history().clone();
        let state = reduce(&state, &DeleteTask { task_id: "1".into() }).unwrap();

        assert!(state.task("1").is_none());
        assert_eq!(state.history(), &before);
        assert_eq!(state.history_for("Write docs").count(), 1);
    }

    #[test]
    fn test_delete_clears_drag_of_that_task() {
        let state = drag(&board(), "1");
        let state = reduce(&state, &DeleteTask { task_id: "1".into() }).unwrap();
        assert!(state.drag().is_none());
    }
}
