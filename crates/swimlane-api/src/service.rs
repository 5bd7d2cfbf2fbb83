//! Board service: sequences backend calls and local state commits.
//!
//! Every mutating operation awaits the backend first and only dispatches
//! the matching command once the call succeeded. A failed call therefore
//! leaves the local board exactly as it was; nothing needs rolling back.

use std::sync::Arc;

use swimlane_core::{SwimlaneError, SwimlaneResult};
use swimlane_domain::commands::{
    AddTask, ApplyFilter, CancelDrop, DeleteTask, DropTask, EditTask, LoadTasks,
    RecordTransition, StartDrag,
};
use swimlane_domain::{
    validate_title, BoardState, BoardStore, DropPlan, HistoryEntry, NewTask, PendingTransition,
    Status, Task,
};

use crate::traits::TaskApi;

/// What happened to a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The transition was stored and applied.
    Committed(HistoryEntry),
    /// The transition waits for [`BoardService::submit_info`].
    NeedsInfo(PendingTransition),
}

pub struct BoardService {
    api: Arc<dyn TaskApi>,
    store: BoardStore,
}

impl BoardService {
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self::with_store(api, BoardStore::new())
    }

    pub fn with_store(api: Arc<dyn TaskApi>, store: BoardStore) -> Self {
        Self { api, store }
    }

    pub fn state(&self) -> &BoardState {
        self.store.state()
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub async fn load_tasks(&mut self) -> SwimlaneResult<usize> {
        let tasks = self.api.list_tasks().await?;
        let count = tasks.len();
        self.store.dispatch(&LoadTasks { tasks })?;
        tracing::info!("Loaded {} tasks", count);
        Ok(count)
    }

    pub async fn add_task(&mut self, title: &str) -> SwimlaneResult<Task> {
        let new_task = NewTask::new(title)?;
        let created = self.api.create_task(&new_task).await?;
        if created.status != new_task.status {
            tracing::warn!(
                "Backend created task {} in {}, not {}",
                created.id,
                created.status,
                new_task.status
            );
        }
        self.store.dispatch(&AddTask {
            id: created.id.clone(),
            title: created.title.clone(),
            status: created.status,
        })?;
        tracing::info!("Created task {} '{}'", created.id, created.title);
        self.current(&created.id)
    }

    pub async fn edit_task(&mut self, task_id: &str, title: &str) -> SwimlaneResult<Task> {
        let title = validate_title(title)?;
        let mut updated = self.state().require_task(task_id)?.clone();
        updated.update_title(title.clone());

        self.api.update_task(&updated).await?;
        self.store.dispatch(&EditTask {
            task_id: task_id.to_string(),
            title,
        })?;
        tracing::info!("Renamed task {}", task_id);
        self.current(task_id)
    }

    pub async fn delete_task(&mut self, task_id: &str) -> SwimlaneResult<Task> {
        let task = self.state().require_task(task_id)?.clone();
        self.api.delete_task(task_id).await?;
        self.store.dispatch(&DeleteTask {
            task_id: task_id.to_string(),
        })?;
        tracing::info!("Deleted task {} '{}'", task.id, task.title);
        Ok(task)
    }

    pub fn apply_filter(&mut self, text: &str) {
        // ApplyFilter cannot fail.
        let _ = self.store.dispatch(&ApplyFilter {
            text: text.to_string(),
        });
    }

    pub fn start_drag(&mut self, task_id: &str) -> SwimlaneResult<()> {
        self.store.dispatch(&StartDrag {
            task_id: task_id.to_string(),
        })
    }

    pub fn cancel_drop(&mut self) {
        let _ = self.store.dispatch(&CancelDrop);
    }

    /// Drop the dragged task on `target`.
    pub async fn drop_on(&mut self, target: Status) -> SwimlaneResult<DropOutcome> {
        let plan = self.state().plan_drop(target)?;
        match plan {
            DropPlan::Direct(transition) => {
                let entry = self.persist_transition(&transition, None).await?;
                Ok(DropOutcome::Committed(entry))
            }
            DropPlan::RequiresInfo(transition) => {
                let at = self.store.now();
                self.store.dispatch(&DropTask { target, at })?;
                tracing::debug!(
                    "Move of task {} from {} to {} needs additional info",
                    transition.task_id,
                    transition.from,
                    transition.to
                );
                Ok(DropOutcome::NeedsInfo(transition))
            }
        }
    }

    /// Commit the pending transition with `info` attached.
    pub async fn submit_info(&mut self, info: &str) -> SwimlaneResult<HistoryEntry> {
        let transition = self.state().pending().cloned().ok_or_else(|| {
            SwimlaneError::Validation("no drop is waiting for additional info".to_string())
        })?;
        let info = Some(info.trim().to_string()).filter(|i| !i.is_empty());
        self.persist_transition(&transition, info).await
    }

    /// Drag-and-drop in one call, for scripted use. `info` is recorded with
    /// the move when given. A move that needs info is committed only when
    /// `info` is given, otherwise abandoned and reported as
    /// [`DropOutcome::NeedsInfo`].
    pub async fn move_task(
        &mut self,
        task_id: &str,
        target: Status,
        info: Option<&str>,
    ) -> SwimlaneResult<DropOutcome> {
        self.start_drag(task_id)?;
        let outcome = self.move_dragged(target, info).await;
        if !matches!(outcome, Ok(DropOutcome::Committed(_))) {
            self.cancel_drop();
        }
        outcome
    }

    async fn move_dragged(
        &mut self,
        target: Status,
        info: Option<&str>,
    ) -> SwimlaneResult<DropOutcome> {
        let plan = self.state().plan_drop(target)?;
        match plan {
            DropPlan::Direct(transition) => {
                let info = info
                    .map(str::trim)
                    .filter(|i| !i.is_empty())
                    .map(str::to_string);
                let entry = self.persist_transition(&transition, info).await?;
                Ok(DropOutcome::Committed(entry))
            }
            DropPlan::RequiresInfo(transition) => match info {
                Some(info) => {
                    self.drop_on(target).await?;
                    let entry = self.submit_info(info).await?;
                    Ok(DropOutcome::Committed(entry))
                }
                None => Ok(DropOutcome::NeedsInfo(transition)),
            },
        }
    }

    /// History for a title as the backend reports it. Failures are logged
    /// and yield an empty list.
    pub async fn fetch_history(&self, title: &str) -> Vec<HistoryEntry> {
        match self.api.list_history(title).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to fetch history for '{}': {}", title, e);
                Vec::new()
            }
        }
    }

    async fn persist_transition(
        &mut self,
        transition: &PendingTransition,
        info: Option<String>,
    ) -> SwimlaneResult<HistoryEntry> {
        let mut updated = self.state().require_task(&transition.task_id)?.clone();
        if updated.status != transition.from {
            return Err(SwimlaneError::Validation(format!(
                "task {} is in {}, not {}",
                updated.id, updated.status, transition.from
            )));
        }
        updated.update_status(transition.to, info.clone());
        let entry = HistoryEntry::new(
            transition.title.clone(),
            transition.from,
            transition.to,
            self.store.now(),
            info,
        );

        self.api.update_task(&updated).await?;
        let stored = self.api.append_history(&entry).await?;

        self.store.dispatch(&RecordTransition {
            task_id: transition.task_id.clone(),
            entry: stored.clone(),
        })?;
        tracing::info!(
            "Moved task {} from {} to {}",
            transition.task_id,
            transition.from,
            transition.to
        );
        Ok(stored)
    }

    fn current(&self, task_id: &str) -> SwimlaneResult<Task> {
        self.state().require_task(task_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryTaskApi;
    use crate::traits::MockTaskApi;
    use chrono::{TimeZone, Utc};
    use swimlane_domain::FixedClock;

    fn fixed_store() -> BoardStore {
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();
        BoardStore::with_clock(Arc::new(FixedClock(at)))
    }

    async fn offline() -> (BoardService, Arc<InMemoryTaskApi>) {
        let api = Arc::new(InMemoryTaskApi::with_tasks(vec![
            Task::new("1", "Write docs"),
            Task::new("2", "Review docs").with_status(Status::InProgress),
        ]));
        let mut service = BoardService::with_store(api.clone(), fixed_store());
        service.load_tasks().await.unwrap();
        (service, api)
    }

    fn connection_error() -> SwimlaneError {
        SwimlaneError::Connection("connection refused".into())
    }

    #[tokio::test]
    async fn test_direct_drop_persists_and_commits() {
        let (mut service, api) = offline().await;
        service.start_drag("1").unwrap();

        let outcome = service.drop_on(Status::InProgress).await.unwrap();
        let DropOutcome::Committed(entry) = outcome else {
            panic!("expected a committed drop");
        };
        assert_eq!(entry.from, Status::Todo);
        assert_eq!(entry.to, Status::InProgress);

        assert_eq!(service.state().task("1").unwrap().status, Status::InProgress);
        assert_eq!(service.state().history_for("Write docs").count(), 1);

        let remote = api.list_tasks().await.unwrap();
        assert_eq!(remote[0].status, Status::InProgress);
        assert_eq!(api.list_history("Write docs").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_skip_waits_for_info_then_commits() {
        let (mut service, api) = offline().await;
        service.start_drag("1").unwrap();

        let outcome = service.drop_on(Status::Done).await.unwrap();
        assert!(matches!(outcome, DropOutcome::NeedsInfo(ref t) if t.to == Status::Done));
        assert_eq!(service.state().task("1").unwrap().status, Status::Todo);
        assert!(api.list_history("Write docs").await.unwrap().is_empty());

        let entry = service.submit_info("hotfix").await.unwrap();
        assert_eq!(entry.to, Status::Done);
        assert_eq!(entry.additional_info.as_deref(), Some("hotfix"));
        assert_eq!(service.state().task("1").unwrap().status, Status::Done);
        assert!(service.state().pending().is_none());
        assert_eq!(service.fetch_history("Write docs").await.len(), 1);
    }

    #[tokio::test]
    async fn test_move_task_without_info_is_abandoned() {
        let (mut service, _api) = offline().await;
        let outcome = service.move_task("2", Status::Todo, None).await.unwrap();
        assert!(matches!(outcome, DropOutcome::NeedsInfo(_)));
        assert_eq!(service.state().task("2").unwrap().status, Status::InProgress);
        assert!(service.state().drag().is_none());
        assert!(service.state().pending().is_none());

        let outcome = service
            .move_task("2", Status::Todo, Some("blocked upstream"))
            .await
            .unwrap();
        assert!(matches!(outcome, DropOutcome::Committed(_)));
        assert_eq!(service.state().task("2").unwrap().status, Status::Todo);
    }

    #[tokio::test]
    async fn test_add_edit_delete_round_trip() {
        let (mut service, api) = offline().await;
        let before: Vec<_> = service.state().tasks().to_vec();

        let created = service.add_task("Write docs").await.unwrap();
        assert_eq!(created.status, Status::Todo);
        let renamed = service.edit_task(&created.id, "Write docs v2").await.unwrap();
        assert_eq!(renamed.title, "Write docs v2");
        service.delete_task(&created.id).await.unwrap();

        assert_eq!(service.state().tasks(), before.as_slice());
        assert_eq!(api.list_tasks().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_blank_title_never_reaches_backend() {
        let mut mock = MockTaskApi::new();
        mock.expect_create_task().never();
        let mut service = BoardService::new(Arc::new(mock));

        let result = service.add_task("   ").await;
        assert!(matches!(result, Err(SwimlaneError::Validation(_))));
        assert!(service.state().tasks().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_tasks() {
        let mut mock = MockTaskApi::new();
        let mut calls = 0;
        mock.expect_list_tasks().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![Task::new("1", "Write docs")])
            } else {
                Err(connection_error())
            }
        });
        let mut service = BoardService::new(Arc::new(mock));

        service.load_tasks().await.unwrap();
        assert!(service.load_tasks().await.is_err());
        assert_eq!(service.state().tasks().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_status_and_history_alone() {
        let mut mock = MockTaskApi::new();
        mock.expect_list_tasks()
            .returning(|| Ok(vec![Task::new("1", "Write docs")]));
        mock.expect_update_task()
            .returning(|_| Err(connection_error()));
        mock.expect_append_history().never();

        let mut service = BoardService::with_store(Arc::new(mock), fixed_store());
        service.load_tasks().await.unwrap();
        service.start_drag("1").unwrap();

        assert!(service.drop_on(Status::InProgress).await.is_err());
        assert_eq!(service.state().task("1").unwrap().status, Status::Todo);
        assert!(service.state().history().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_task() {
        let mut mock = MockTaskApi::new();
        mock.expect_list_tasks()
            .returning(|| Ok(vec![Task::new("1", "Write docs")]));
        mock.expect_delete_task().returning(|_| {
            Err(SwimlaneError::Api {
                status: 500,
                message: "boom".into(),
            })
        });

        let mut service = BoardService::new(Arc::new(mock));
        service.load_tasks().await.unwrap();
        assert!(service.delete_task("1").await.is_err());
        assert!(service.state().task("1").is_some());
    }

    #[tokio::test]
    async fn test_history_fetch_failure_is_empty() {
        let mut mock = MockTaskApi::new();
        mock.expect_list_history()
            .returning(|_| Err(connection_error()));
        let service = BoardService::new(Arc::new(mock));

        assert!(service.fetch_history("Write docs").await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_keeps_history_entries() {
        let (mut service, api) = offline().await;
        service.move_task("1", Status::InProgress, None).await.unwrap();
        service.delete_task("1").await.unwrap();

        assert_eq!(service.state().history_for("Write docs").count(), 1);
        assert_eq!(api.list_history("Write docs").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reload_abandons_drag_of_task_moved_elsewhere() {
        let (mut service, api) = offline().await;
        service.start_drag("1").unwrap();

        // Another client finishes the task while it is being dragged here.
        api.update_task(&Task::new("1", "Write docs").with_status(Status::Done))
            .await
            .unwrap();
        service.load_tasks().await.unwrap();
        assert!(service.state().drag().is_none());

        let result = service.drop_on(Status::InProgress).await;
        assert!(matches!(result, Err(SwimlaneError::Validation(_))));
        assert_eq!(service.state().task("1").unwrap().status, Status::Done);
        assert!(service.state().history().is_empty());
        assert_eq!(api.list_tasks().await.unwrap()[0].status, Status::Done);
        assert!(api.list_history("Write docs").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transition_from_wrong_status_never_reaches_backend() {
        let mut mock = MockTaskApi::new();
        mock.expect_list_tasks()
            .returning(|| Ok(vec![Task::new("1", "Write docs").with_status(Status::Done)]));
        mock.expect_update_task().never();
        mock.expect_append_history().never();

        let mut service = BoardService::with_store(Arc::new(mock), fixed_store());
        service.load_tasks().await.unwrap();
        let transition = PendingTransition {
            task_id: "1".into(),
            title: "Write docs".into(),
            from: Status::Todo,
            to: Status::InProgress,
        };

        let result = service.persist_transition(&transition, None).await;
        assert!(matches!(result, Err(SwimlaneError::Validation(_))));
        assert_eq!(service.state().task("1").unwrap().status, Status::Done);
        assert!(service.state().history().is_empty());
    }

    #[tokio::test]
    async fn test_failed_history_append_keeps_pending_drop() {
        let mut mock = MockTaskApi::new();
        mock.expect_list_tasks()
            .returning(|| Ok(vec![Task::new("1", "Write docs")]));
        mock.expect_update_task()
            .times(1)
            .returning(|task| Ok(task.clone()));
        mock.expect_append_history()
            .times(1)
            .returning(|_| Err(connection_error()));

        let mut service = BoardService::with_store(Arc::new(mock), fixed_store());
        service.load_tasks().await.unwrap();
        service.start_drag("1").unwrap();
        let outcome = service.drop_on(Status::Done).await.unwrap();
        assert!(matches!(outcome, DropOutcome::NeedsInfo(_)));

        let result = service.submit_info("hotfix").await;
        assert!(matches!(result, Err(SwimlaneError::Connection(_))));
        assert_eq!(service.state().task("1").unwrap().status, Status::Todo);
        assert!(service.state().history().is_empty());
        let pending = service.state().pending().unwrap();
        assert_eq!(pending.task_id, "1");
        assert_eq!(pending.to, Status::Done);
    }

    #[tokio::test]
    async fn test_created_task_keeps_backend_status() {
        let mut mock = MockTaskApi::new();
        mock.expect_create_task()
            .returning(|_| Ok(Task::new("42", "Ship").with_status(Status::InProgress)));

        let mut service = BoardService::new(Arc::new(mock));
        let created = service.add_task("Ship").await.unwrap();
        assert_eq!(created.id, "42");
        assert_eq!(created.status, Status::InProgress);
        assert_eq!(service.state().column(Status::InProgress).len(), 1);
        assert!(service.state().column(Status::Todo).is_empty());
    }

    #[tokio::test]
    async fn test_direct_move_records_info() {
        let (mut service, api) = offline().await;
        let outcome = service
            .move_task("1", Status::InProgress, Some(" pairing with Sam "))
            .await
            .unwrap();
        let DropOutcome::Committed(entry) = outcome else {
            panic!("expected a committed move");
        };
        assert_eq!(entry.additional_info.as_deref(), Some("pairing with Sam"));

        let task = service.state().task("1").unwrap();
        assert_eq!(task.additional_info.as_deref(), Some("pairing with Sam"));
        let remote = api.list_history("Write docs").await.unwrap();
        assert_eq!(remote[0].additional_info.as_deref(), Some("pairing with Sam"));
    }

    #[tokio::test]
    async fn test_failed_move_clears_drag() {
        let mut mock = MockTaskApi::new();
        mock.expect_list_tasks()
            .returning(|| Ok(vec![Task::new("1", "Write docs")]));
        mock.expect_update_task()
            .returning(|_| Err(connection_error()));

        let mut service = BoardService::with_store(Arc::new(mock), fixed_store());
        service.load_tasks().await.unwrap();
        assert!(service
            .move_task("1", Status::InProgress, Some("note"))
            .await
            .is_err());
        assert!(service.state().drag().is_none());
        assert_eq!(service.state().task("1").unwrap().status, Status::Todo);
    }
}
