pub mod history;
pub mod task;
