use crate::app::App;
use swimlane_domain::Status;

impl App {
    pub fn focus_prev_column(&mut self) {
        if let Some(prev) = self
            .focused_column
            .column_index()
            .checked_sub(1)
            .and_then(Status::from_column_index)
        {
            self.focused_column = prev;
        }
    }

    pub fn focus_next_column(&mut self) {
        if let Some(next) = Status::from_column_index(self.focused_column.column_index() + 1) {
            self.focused_column = next;
        }
    }

    pub fn select_next_task(&mut self) {
        let len = self.column_tasks(self.focused_column).len();
        let column = self.focused_column;
        self.selection_mut(column).next(len);
    }

    pub fn select_prev_task(&mut self) {
        let len = self.column_tasks(self.focused_column).len();
        let column = self.focused_column;
        self.selection_mut(column).prev(len);
    }

    pub fn handle_escape(&mut self) {
        if self.service.state().drag().is_some() {
            self.service.cancel_drop();
            tracing::debug!("Move cancelled");
        } else if !self.service.state().filter_text().is_empty() {
            self.service.apply_filter("");
        } else {
            self.status_message = None;
        }
    }
}
