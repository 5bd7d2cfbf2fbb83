pub mod board;
pub mod clock;
pub mod commands;
pub mod filter;
pub mod history;
pub mod status;
pub mod store;
pub mod task;
pub mod transition;

pub use board::BoardState;
pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::TaskFilter;
pub use history::{HistoryEntry, HistoryLog};
pub use status::Status;
pub use store::{reduce, BoardStore};
pub use task::{validate_title, NewTask, Task, TaskId};
pub use transition::{
    allowed_targets, evaluate, is_terminal, DraggedTask, DropPlan, PendingTransition,
    TransitionDecision,
};
