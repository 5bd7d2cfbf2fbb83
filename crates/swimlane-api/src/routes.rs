use reqwest::Url;
use swimlane_core::{SwimlaneError, SwimlaneResult};

/// Endpoint URLs under a backend base URL. Path segments taken from
/// task ids and titles are percent-encoded.
#[derive(Debug, Clone)]
pub struct Routes {
    base: Url,
}

impl Routes {
    pub fn new(base_url: &str) -> SwimlaneResult<Self> {
        let base = Url::parse(base_url.trim()).map_err(|e| {
            SwimlaneError::Validation(format!("invalid backend URL '{}': {}", base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SwimlaneError::Validation(format!(
                "backend URL must be http or https, got '{}'",
                base.scheme()
            )));
        }
        if base.cannot_be_a_base() {
            return Err(SwimlaneError::Validation(format!(
                "'{}' cannot be used as a base URL",
                base_url
            )));
        }
        Ok(Self { base })
    }

    pub fn tasks(&self) -> Url {
        self.join(&["api", "tasks"])
    }

    pub fn task(&self, id: &str) -> Url {
        self.join(&["api", "tasks", id])
    }

    pub fn history(&self) -> Url {
        self.join(&["api", "task-history"])
    }

    pub fn history_for(&self, title: &str) -> Url {
        self.join(&["api", "task-history", title])
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Checked in `new`: http(s) URLs always have path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
