use crate::cli::{TaskAction, TaskListArgs, TaskMoveArgs};
use crate::context::CliContext;
use crate::output;
use swimlane_api::DropOutcome;
use swimlane_domain::Task;

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::List(args) => list(ctx, args),
        TaskAction::Add { title } => {
            let task = ctx.service.add_task(&title).await?;
            output::output_success(&task);
        }
        TaskAction::Edit { id, title } => {
            let task = ctx.service.edit_task(&id, &title).await?;
            output::output_success(&task);
        }
        TaskAction::Delete { id } => {
            let task = ctx.service.delete_task(&id).await?;
            output::output_success(serde_json::json!({
                "deleted": task.id,
                "title": task.title,
            }));
        }
        TaskAction::Move(args) => move_task(ctx, args).await?,
    }
    Ok(())
}

fn list(ctx: &mut CliContext, args: TaskListArgs) {
    if let Some(filter) = &args.filter {
        ctx.service.apply_filter(filter);
    }
    let tasks: Vec<&Task> = ctx
        .service
        .state()
        .filtered_tasks()
        .filter(|t| args.status.map_or(true, |s| t.status == s))
        .collect();
    output::output_list(tasks);
}

async fn move_task(ctx: &mut CliContext, args: TaskMoveArgs) -> anyhow::Result<()> {
    let outcome = ctx
        .service
        .move_task(&args.id, args.to, args.info.as_deref())
        .await?;

    match outcome {
        DropOutcome::Committed(entry) => {
            let task = ctx.service.state().require_task(&args.id)?;
            output::output_success(serde_json::json!({
                "task": task,
                "history": entry,
            }));
        }
        DropOutcome::NeedsInfo(transition) => output::output_error(&format!(
            "Moving '{}' from {} to {} needs additional info; pass --info",
            transition.title, transition.from, transition.to
        )),
    }
    Ok(())
}
