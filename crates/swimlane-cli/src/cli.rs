use clap::{Args, Parser, Subcommand};
use swimlane_domain::Status;

#[derive(Parser)]
#[command(name = "swimlane")]
#[command(about = "A three-column task board for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the task backend (or set SWIMLANE_API_URL)
    #[arg(long, global = true, value_name = "URL", env = "SWIMLANE_API_URL")]
    pub api_url: Option<String>,

    /// Use the built-in sample board even if a backend is configured
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Task operations
    Task(TaskCommand),
    /// Show the recorded moves of a task
    History {
        #[arg(long)]
        title: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks, optionally narrowed to one column or a filter text
    List(TaskListArgs),
    /// Create a task in the to-do column
    Add {
        #[arg(long)]
        title: String,
    },
    /// Rename a task
    Edit {
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
    },
    /// Delete a task; its history is kept
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Move a task to another column
    Move(TaskMoveArgs),
}

#[derive(Args)]
pub struct TaskListArgs {
    /// to-do, in-progress or done
    #[arg(long)]
    pub status: Option<Status>,
    /// Case-insensitive match on title or status
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct TaskMoveArgs {
    #[arg(long)]
    pub id: String,
    /// Target column: to-do, in-progress or done
    #[arg(long)]
    pub to: Status,
    /// Context recorded with the move. Required for moves that skip a
    /// column or go backwards
    #[arg(long)]
    pub info: Option<String>,
}
