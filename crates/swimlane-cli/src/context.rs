use swimlane_api::BoardService;
use swimlane_core::{AppConfig, SwimlaneResult};

/// A board loaded from the configured backend for one CLI invocation.
pub struct CliContext {
    pub service: BoardService,
}

impl CliContext {
    pub async fn connect(config: &AppConfig) -> SwimlaneResult<Self> {
        let api = swimlane_api::connect(config)?;
        let mut service = BoardService::new(api);
        service.load_tasks().await?;
        Ok(Self { service })
    }
}
