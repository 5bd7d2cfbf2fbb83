use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, title: &str) -> anyhow::Result<()> {
    let entries = ctx.service.fetch_history(title).await;
    output::output_list(entries);
    Ok(())
}
