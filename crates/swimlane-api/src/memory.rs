use async_trait::async_trait;
use swimlane_core::{SwimlaneError, SwimlaneResult};
use swimlane_domain::{HistoryEntry, NewTask, Status, Task};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::traits::TaskApi;

#[derive(Debug, Default)]
struct MemoryState {
    tasks: Vec<Task>,
    history: Vec<HistoryEntry>,
    next_id: u64,
}

/// Offline backend: keeps tasks and history in process memory.
///
/// Task ids are sequential integers rendered as strings.
#[derive(Debug, Default)]
pub struct InMemoryTaskApi {
    inner: Mutex<MemoryState>,
}

impl InMemoryTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks
            .iter()
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            inner: Mutex::new(MemoryState {
                tasks,
                history: Vec::new(),
                next_id,
            }),
        }
    }

    /// The fixed task set the board starts with when no backend is configured.
    pub fn seeded() -> Self {
        Self::with_tasks(seed_tasks())
    }
}

pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task::new("1", "Set up project repository").with_status(Status::Done),
        Task::new("2", "Design column layout").with_status(Status::InProgress),
        Task::new("3", "Implement drag and drop"),
        Task::new("4", "Add task filter"),
        Task::new("5", "Write task history view"),
    ]
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list_tasks(&self) -> SwimlaneResult<Vec<Task>> {
        Ok(self.inner.lock().await.tasks.clone())
    }

    async fn create_task(&self, task: &NewTask) -> SwimlaneResult<Task> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let created = Task::new(inner.next_id.to_string(), task.title.clone())
            .with_status(task.status);
        inner.tasks.push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, task: &Task) -> SwimlaneResult<Task> {
        let mut inner = self.inner.lock().await;
        let slot = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| SwimlaneError::NotFound(format!("task {}", task.id)))?;
        *slot = task.clone();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &str) -> SwimlaneResult<()> {
        let mut inner = self.inner.lock().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(SwimlaneError::NotFound(format!("task {}", id)));
        }
        Ok(())
    }

    async fn list_history(&self, title: &str) -> SwimlaneResult<Vec<HistoryEntry>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .history
            .iter()
            .filter(|e| e.task == title)
            .cloned()
            .collect())
    }

    async fn append_history(&self, entry: &HistoryEntry) -> SwimlaneResult<HistoryEntry> {
        let mut stored = entry.clone();
        stored.id = Some(Uuid::new_v4().to_string());
        self.inner.lock().await.history.push(stored.clone());
        Ok(stored)
    }
}
