use serde::{Deserialize, Serialize};
use swimlane_core::{SwimlaneError, SwimlaneResult};

use crate::status::Status;

pub type TaskId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: Status,
    /// Context captured the last time this task moved through the
    /// additional-info dialog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl Task {
    /// New tasks always start in the to-do column.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: Status::Todo,
            additional_info: None,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn update_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn update_status(&mut self, status: Status, additional_info: Option<String>) {
        self.status = status;
        if additional_info.is_some() {
            self.additional_info = additional_info;
        }
    }
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub status: Status,
}

impl NewTask {
    pub fn new(title: &str) -> SwimlaneResult<Self> {
        Ok(Self {
            title: validate_title(title)?,
            status: Status::Todo,
        })
    }
}

/// Trim a user-entered title, rejecting blank input.
pub fn validate_title(title: &str) -> SwimlaneResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(SwimlaneError::Validation(
            "task title cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
