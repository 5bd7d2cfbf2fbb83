use async_trait::async_trait;
use swimlane_core::SwimlaneResult;
use swimlane_domain::{HistoryEntry, NewTask, Task};

/// Operations the task backend exposes.
/// Implementations: HTTP ([`crate::HttpTaskApi`]) and in-memory
/// ([`crate::InMemoryTaskApi`]).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /api/tasks`
    async fn list_tasks(&self) -> SwimlaneResult<Vec<Task>>;

    /// `POST /api/tasks`
    async fn create_task(&self, task: &NewTask) -> SwimlaneResult<Task>;

    /// `PUT /api/tasks/{id}` with the full task
    async fn update_task(&self, task: &Task) -> SwimlaneResult<Task>;

    /// `DELETE /api/tasks/{id}`
    async fn delete_task(&self, id: &str) -> SwimlaneResult<()>;

    /// `GET /api/task-history/{title}`
    async fn list_history(&self, title: &str) -> SwimlaneResult<Vec<HistoryEntry>>;

    /// `POST /api/task-history`
    async fn append_history(&self, entry: &HistoryEntry) -> SwimlaneResult<HistoryEntry>;
}
