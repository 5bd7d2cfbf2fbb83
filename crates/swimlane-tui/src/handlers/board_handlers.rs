use crate::app::{App, AppMode};
use swimlane_api::DropOutcome;
use swimlane_domain::Status;

impl App {
    pub fn begin_create_task(&mut self) {
        self.input.clear();
        self.mode = AppMode::CreateTask;
    }

    pub fn begin_edit_task(&mut self) {
        if let Some(task) = self.selected_task() {
            let (id, title) = (task.id.clone(), task.title.clone());
            self.input.set(title);
            self.mode = AppMode::EditTask(id);
        }
    }

    pub fn begin_delete_task(&mut self) {
        if let Some(task) = self.selected_task() {
            self.mode = AppMode::ConfirmDelete(task.id.clone());
        }
    }

    pub fn begin_filter(&mut self) {
        self.input.set(self.service.state().filter_text().to_string());
        self.mode = AppMode::Filter;
    }

    pub async fn reload(&mut self) {
        match self.service.load_tasks().await {
            Ok(_) => self.status_message = None,
            Err(e) => self.report(e),
        }
        self.clamp_selections();
    }

    pub async fn create_task(&mut self, title: &str) {
        match self.service.add_task(title).await {
            Ok(task) => self.select_task(&task.id),
            Err(e) => self.report(e),
        }
    }

    pub async fn rename_task(&mut self, task_id: &str, title: &str) {
        match self.service.edit_task(task_id, title).await {
            Ok(task) => self.select_task(&task.id),
            Err(e) => self.report(e),
        }
    }

    pub async fn delete_task(&mut self, task_id: &str) {
        if let Err(e) = self.service.delete_task(task_id).await {
            self.report(e);
        }
    }

    /// Space: pick up the selected task, or drop the one in hand on the
    /// focused column.
    pub async fn pick_up_or_drop(&mut self) {
        if self.service.state().drag().is_none() {
            let Some(task_id) = self.selected_task().map(|t| t.id.clone()) else {
                return;
            };
            if let Err(e) = self.service.start_drag(&task_id) {
                self.report(e);
            }
            return;
        }

        self.drop_on(self.focused_column).await;
    }

    pub async fn drop_on(&mut self, target: Status) {
        let task_id = self.service.state().drag().map(|d| d.task_id.clone());
        match self.service.drop_on(target).await {
            Ok(DropOutcome::Committed(_)) => {
                if let Some(task_id) = task_id {
                    self.select_task(&task_id);
                }
            }
            Ok(DropOutcome::NeedsInfo(_)) => {
                self.input.clear();
                self.mode = AppMode::AdditionalInfo;
            }
            Err(e) => self.report(e),
        }
    }

    /// Fetch and show the history of the selected task.
    pub async fn open_history(&mut self) {
        let Some(title) = self.selected_task().map(|t| t.title.clone()) else {
            return;
        };
        self.history = self.service.fetch_history(&title).await;
        self.history_title = title;
        self.history_scroll = 0;
        self.mode = AppMode::History;
    }
}
