//! Free-text task filter.

use crate::task::Task;

/// Case-insensitive substring match against a task's title or status.
///
/// An empty needle matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    needle: String,
}

impl TaskFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.needle.is_empty()
            || task.title.to_lowercase().contains(&self.needle)
            || task.status.as_str().contains(&self.needle)
    }

    pub fn apply<'a>(&'a self, tasks: &'a [Task]) -> impl Iterator<Item = &'a Task> + 'a {
        tasks.iter().filter(move |task| self.matches(task))
    }
}
