mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use swimlane_api::BoardService;
use swimlane_core::AppConfig;
use swimlane_tui::App;

const DEBUG_LOG_ENV: &str = "SWIMLANE_DEBUG_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.is_some())?;

    let mut config = AppConfig::load().with_api_url_override(cli.api_url.clone());
    if cli.offline {
        config = config.offline();
    }

    match cli.command {
        None => {
            let api = swimlane_api::connect(&config)?;
            let mut app = App::new(BoardService::new(api));
            app.service.apply_filter(config.effective_default_filter());
            app.run().await?;
        }
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "swimlane", &mut std::io::stdout());
        }
        Some(cmd) => {
            if let Err(e) = run_command(&config, cmd).await {
                output::output_error(&e.to_string());
            }
        }
    }

    Ok(())
}

async fn run_command(config: &AppConfig, cmd: Commands) -> anyhow::Result<()> {
    let mut ctx = CliContext::connect(config).await?;

    match cmd {
        Commands::Task(task_cmd) => handlers::task::handle(&mut ctx, task_cmd.action).await?,
        Commands::History { title } => handlers::history::handle(&ctx, &title).await?,
        Commands::Completions { .. } => {}
    }
    Ok(())
}

/// With `SWIMLANE_DEBUG_LOG` set, everything down to DEBUG goes to that
/// file. Otherwise subcommands log warnings to stderr and the TUI stays
/// silent so the screen is not corrupted.
fn init_tracing(is_subcommand: bool) -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var(DEBUG_LOG_ENV) {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else if is_subcommand {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
    Ok(())
}
