use super::Command;
use crate::board::BoardState;
use crate::status::Status;
use crate::task::{validate_title, Task, TaskId};
use swimlane_core::{SwimlaneError, SwimlaneResult};

/// Replace the whole task set, e.g. after fetching from the backend.
pub struct LoadTasks {
    pub tasks: Vec<Task>,
}

impl Command for LoadTasks {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        state.tasks = self.tasks.clone();
        // Drag state is stale once its task is gone or has moved.
        let stale_drag = state.drag.as_ref().is_some_and(|d| {
            state
                .task(&d.task_id)
                .map_or(true, |t| t.status != d.original_status)
        });
        if stale_drag {
            state.drag = None;
        }
        let stale_pending = state.pending.as_ref().is_some_and(|p| {
            state
                .task(&p.task_id)
                .map_or(true, |t| t.status != p.from)
        });
        if stale_pending {
            state.pending = None;
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Load {} tasks", self.tasks.len())
    }
}

/// Append a new task. `id` and `status` come from whoever allocated it
/// (the backend, or the offline store); new tasks are normally `to-do`.
pub struct AddTask {
    pub id: TaskId,
    pub title: String,
    pub status: Status,
}

impl Command for AddTask {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        let title = validate_title(&self.title)?;
        if state.task(&self.id).is_some() {
            return Err(SwimlaneError::Validation(format!(
                "task {} already exists",
                self.id
            )));
        }
        state
            .tasks
            .push(Task::new(self.id.clone(), title).with_status(self.status));
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add task: '{}'", self.title)
    }
}

/// Change a task's title. Status is untouched.
pub struct EditTask {
    pub task_id: TaskId,
    pub title: String,
}

impl Command for EditTask {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        let title = validate_title(&self.title)?;
        state.task_mut(&self.task_id)?.update_title(title.clone());
        if let Some(pending) = state.pending.as_mut() {
            if pending.task_id == self.task_id {
                pending.title = title;
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Rename task {} to '{}'", self.task_id, self.title)
    }
}

/// Remove a task. History entries for its title are kept.
pub struct DeleteTask {
    pub task_id: TaskId,
}

impl Command for DeleteTask {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        let pos = state
            .tasks
            .iter()
            .position(|t| t.id == self.task_id)
            .ok_or_else(|| SwimlaneError::NotFound(format!("task {}", self.task_id)))?;
        state.tasks.remove(pos);
        state.release_task(&self.task_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete task {}", self.task_id)
    }
}

pub struct ApplyFilter {
    pub text: String,
}

impl Command for ApplyFilter {
    fn execute(&self, state: &mut BoardState) -> SwimlaneResult<()> {
        state.filter_text = self.text.clone();
        state.refresh_filter();
        Ok(())
    }

    fn description(&self) -> String {
        format!("Filter by '{}'", self.text)
    }
}
