use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "SWIMLANE_API_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the task backend, e.g. `http://localhost:8080`.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Filter text applied when the board first opens.
    #[serde(default)]
    pub default_filter: Option<String>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/swimlane/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("swimlane/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("swimlane\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the config file (if any) and apply the environment override.
    /// Read once at startup.
    pub fn load() -> Self {
        let config = Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default();
        config.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    /// Missing or malformed files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = Some(url);
        }
        self
    }

    /// Forget any configured backend so the board runs on the sample data.
    pub fn offline(mut self) -> Self {
        self.api_base_url = None;
        self
    }

    /// The backend URL to talk to, or `None` for the offline board.
    pub fn effective_api_url(&self) -> Option<&str> {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    pub fn effective_default_filter(&self) -> &str {
        self.default_filter.as_deref().unwrap_or("")
    }
}
