//! Board state: the single source of truth the front ends render from.
//!
//! Fields are only mutated by [`crate::commands`]; everything here is a
//! read-only view.

use swimlane_core::{SwimlaneError, SwimlaneResult};

use crate::filter::TaskFilter;
use crate::history::{HistoryEntry, HistoryLog};
use crate::status::Status;
use crate::task::Task;
use crate::transition::{evaluate, DraggedTask, DropPlan, PendingTransition, TransitionDecision};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub(crate) tasks: Vec<Task>,
    pub(crate) filter_text: String,
    pub(crate) filter: TaskFilter,
    pub(crate) history: HistoryLog,
    pub(crate) drag: Option<DraggedTask>,
    pub(crate) pending: Option<PendingTransition>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn task_mut(&mut self, id: &str) -> SwimlaneResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SwimlaneError::NotFound(format!("task {}", id)))
    }

    pub fn require_task(&self, id: &str) -> SwimlaneResult<&Task> {
        self.task(id)
            .ok_or_else(|| SwimlaneError::NotFound(format!("task {}", id)))
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Tasks passing the current filter, in board order.
    pub fn filtered_tasks(&self) -> impl Iterator<Item = &Task> {
        self.filter.apply(&self.tasks)
    }

    /// One column of the filtered view.
    pub fn column(&self, status: Status) -> Vec<&Task> {
        self.filtered_tasks()
            .filter(|t| t.status == status)
            .collect()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn history_for<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a HistoryEntry> + 'a {
        self.history.for_title(title)
    }

    pub fn drag(&self) -> Option<&DraggedTask> {
        self.drag.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub fn is_awaiting_info(&self) -> bool {
        self.pending.is_some()
    }

    /// Evaluate dropping the dragged task on `target` without changing
    /// anything.
    pub fn plan_drop(&self, target: Status) -> SwimlaneResult<DropPlan> {
        let drag = self
            .drag
            .as_ref()
            .ok_or_else(|| SwimlaneError::Validation("no task is being dragged".to_string()))?;
        let task = self.require_task(&drag.task_id)?;
        let transition = PendingTransition {
            task_id: task.id.clone(),
            title: task.title.clone(),
            from: drag.original_status,
            to: target,
        };
        Ok(match evaluate(drag.original_status, target) {
            TransitionDecision::Direct => DropPlan::Direct(transition),
            TransitionDecision::RequiresInfo => DropPlan::RequiresInfo(transition),
        })
    }

    pub(crate) fn refresh_filter(&mut self) {
        self.filter = TaskFilter::new(&self.filter_text);
    }

    /// Forget drag and pending state that points at `task_id`.
    pub(crate) fn release_task(&mut self, task_id: &str) {
        if self.drag.as_ref().is_some_and(|d| d.task_id == task_id) {
            self.drag = None;
        }
        if self.pending.as_ref().is_some_and(|p| p.task_id == task_id) {
            self.pending = None;
        }
    }
}
