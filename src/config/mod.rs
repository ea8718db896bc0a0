pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the preview endpoint.
pub const DEFAULT_PREVIEW_BASE_URL: &str = "http://localhost:5167";

/// Environment variable that overrides `preview_base_url` at startup.
pub const PREVIEW_URL_ENV: &str = "CONTEXT_PREVIEW_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub preview_base_url: String,
    pub preview_timeout_secs: u64,
    /// Question sent along with a preview request that does not carry its own.
    pub default_question: String,
    /// Directory the native pickers open in, if set.
    pub dialog_start_directory: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(PREVIEW_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                tracing::info!("Using preview base URL from {}: {}", PREVIEW_URL_ENV, url);
                self.preview_base_url = url.to_string();
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_base_url: DEFAULT_PREVIEW_BASE_URL.to_string(),
            preview_timeout_secs: 30,
            default_question: String::new(),
            dialog_start_directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_points_at_local_endpoint() {
        let config = AppConfig::default();
        assert_eq!(config.preview_base_url, "http://localhost:5167");
        assert_eq!(config.preview_timeout_secs, 30);
        assert!(config.default_question.is_empty());
    }

    #[test]
    #[serial]
    fn test_env_override_replaces_base_url() {
        std::env::set_var(PREVIEW_URL_ENV, " http://preview.internal:9000 ");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        std::env::remove_var(PREVIEW_URL_ENV);

        assert_eq!(config.preview_base_url, "http://preview.internal:9000");
    }

    #[test]
    #[serial]
    fn test_blank_env_override_is_ignored() {
        std::env::set_var(PREVIEW_URL_ENV, "   ");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        std::env::remove_var(PREVIEW_URL_ENV);

        assert_eq!(config.preview_base_url, DEFAULT_PREVIEW_BASE_URL);
    }
}
