//! Transition gatekeeper.
//!
//! Decides whether dropping a task into a column can be committed as is,
//! or whether the user must first supply some free-text context. The
//! policy is a fixed table over the three statuses.

use serde::{Deserialize, Serialize};

use crate::status::Status;
use crate::task::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDecision {
    Direct,
    RequiresInfo,
}

/// Forward moves one column at a time are direct; everything else,
/// including same-column drops and anything leaving `done`, needs info.
pub fn evaluate(from: Status, to: Status) -> TransitionDecision {
    match (from, to) {
        (Status::Todo, Status::InProgress) | (Status::InProgress, Status::Done) => {
            TransitionDecision::Direct
        }
        _ => TransitionDecision::RequiresInfo,
    }
}

pub fn allowed_targets(from: Status) -> &'static [Status] {
    match from {
        Status::Todo => &[Status::InProgress],
        Status::InProgress => &[Status::Done],
        Status::Done => &[],
    }
}

pub fn is_terminal(status: Status) -> bool {
    allowed_targets(status).is_empty()
}

/// A task picked up from its column, not yet dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggedTask {
    pub task_id: TaskId,
    pub original_status: Status,
}

/// A drop that has been evaluated but not committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub task_id: TaskId,
    pub title: String,
    pub from: Status,
    pub to: Status,
}

/// Outcome of evaluating a drop against the gatekeeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    Direct(PendingTransition),
    RequiresInfo(PendingTransition),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table_is_exhaustive() {
        use Status::*;
        use TransitionDecision::*;

        let expected = [
            (Todo, Todo, RequiresInfo),
            (Todo, InProgress, Direct),
            (Todo, Done, RequiresInfo),
            (InProgress, Todo, RequiresInfo),
            (InProgress, InProgress, RequiresInfo),
            (InProgress, Done, Direct),
            (Done, Todo, RequiresInfo),
            (Done, InProgress, RequiresInfo),
            (Done, Done, RequiresInfo),
        ];

        for (from, to, decision) in expected {
            assert_eq!(evaluate(from, to), decision, "{} -> {}", from, to);
        }
    }

    #[test]
    fn test_allowed_targets_agree_with_evaluate() {
        for from in Status::ALL {
            for to in Status::ALL {
                let listed = allowed_targets(from).contains(&to);
                assert_eq!(listed, evaluate(from, to) == TransitionDecision::Direct);
            }
        }
    }

    #[test]
    fn test_done_is_terminal() {
        assert!(is_terminal(Status::Done));
        assert!(!is_terminal(Status::Todo));
        assert!(!is_terminal(Status::InProgress));
    }
}
