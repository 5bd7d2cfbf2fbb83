pub mod http;
pub mod memory;
pub mod routes;
pub mod service;
pub mod traits;

pub use http::HttpTaskApi;
pub use memory::{seed_tasks, InMemoryTaskApi};
pub use routes::Routes;
pub use service::{BoardService, DropOutcome};
pub use traits::TaskApi;

use std::sync::Arc;
use swimlane_core::{AppConfig, SwimlaneResult};

/// Pick the backend for a resolved configuration: HTTP when a base URL is
/// set, the seeded in-memory board otherwise.
pub fn connect(config: &AppConfig) -> SwimlaneResult<Arc<dyn TaskApi>> {
    match config.effective_api_url() {
        Some(url) => {
            tracing::info!("Using task backend at {}", url);
            Ok(Arc::new(HttpTaskApi::new(url)?))
        }
        None => {
            tracing::info!("No backend configured, using offline board");
            Ok(Arc::new(InMemoryTaskApi::seeded()))
        }
    }
}
