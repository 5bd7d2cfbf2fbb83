use crate::app::{App, AppMode};
use crate::dialog::{handle_dialog_input, DialogAction};
use crossterm::event::KeyCode;

impl App {
    pub async fn handle_create_task_dialog(&mut self, key_code: KeyCode) {
        match handle_dialog_input(&mut self.input, key_code, false) {
            DialogAction::Confirm => {
                let title = self.input.take();
                self.mode = AppMode::Normal;
                self.create_task(&title).await;
            }
            DialogAction::Cancel => {
                self.mode = AppMode::Normal;
                self.input.clear();
            }
            DialogAction::None | DialogAction::Edited => {}
        }
    }

    pub async fn handle_edit_task_dialog(&mut self, task_id: &str, key_code: KeyCode) {
        match handle_dialog_input(&mut self.input, key_code, false) {
            DialogAction::Confirm => {
                let title = self.input.take();
                self.mode = AppMode::Normal;
                self.rename_task(task_id, &title).await;
            }
            DialogAction::Cancel => {
                self.mode = AppMode::Normal;
                self.input.clear();
            }
            DialogAction::None | DialogAction::Edited => {}
        }
    }

    pub async fn handle_confirm_delete(&mut self, task_id: &str, key_code: KeyCode) {
        match key_code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.mode = AppMode::Normal;
                self.delete_task(task_id).await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = AppMode::Normal;
            }
            _ => {}
        }
    }

    /// The filter applies on every keystroke. Enter keeps it, Esc clears it.
    pub fn handle_filter_input(&mut self, key_code: KeyCode) {
        match handle_dialog_input(&mut self.input, key_code, true) {
            DialogAction::Edited => self.service.apply_filter(self.input.as_str()),
            DialogAction::Confirm => {
                self.mode = AppMode::Normal;
                self.input.clear();
            }
            DialogAction::Cancel => {
                self.service.apply_filter("");
                self.mode = AppMode::Normal;
                self.input.clear();
            }
            DialogAction::None => {}
        }
    }

    pub async fn handle_additional_info_dialog(&mut self, key_code: KeyCode) {
        match handle_dialog_input(&mut self.input, key_code, true) {
            DialogAction::Confirm => {
                let info = self.input.take();
                let task_id = self.service.state().pending().map(|p| p.task_id.clone());
                match self.service.submit_info(&info).await {
                    Ok(_) => {
                        self.mode = AppMode::Normal;
                        if let Some(task_id) = task_id {
                            self.select_task(&task_id);
                        }
                    }
                    Err(e) => {
                        // Keep the dialog so the user can retry or cancel.
                        self.input.set(info);
                        self.report(e);
                    }
                }
            }
            DialogAction::Cancel => {
                self.service.cancel_drop();
                self.mode = AppMode::Normal;
                self.input.clear();
            }
            DialogAction::None | DialogAction::Edited => {}
        }
    }

    pub fn handle_history_popup(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.mode = AppMode::Normal;
                self.history.clear();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.history.len().saturating_sub(1) as u16;
                self.history_scroll = (self.history_scroll + 1).min(max);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.history_scroll = self.history_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }
}
