//! Studio configuration.

use std::path::PathBuf;

use pvid_models::PROGRESS_STORAGE_KEY;
use pvid_render::RenderClientConfig;

use crate::logging::LogFormat;

/// Default directory for persisted studio state.
pub const DEFAULT_STORAGE_DIR: &str = "./.pvid";

/// Studio configuration.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Directory the file store writes to
    pub storage_dir: PathBuf,
    /// Key the progress record is stored under
    pub progress_key: String,
    /// Rendering service client settings
    pub render: RenderClientConfig,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            progress_key: PROGRESS_STORAGE_KEY.to_string(),
            render: RenderClientConfig::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StudioConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            storage_dir: std::env::var("PVID_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR)),
            progress_key: std::env::var("PVID_PROGRESS_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| PROGRESS_STORAGE_KEY.to_string()),
            render: RenderClientConfig::from_env(),
            log_format: LogFormat::from_env(),
        }
    }

    /// Load `.env` (if present), then read the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn with_storage_dir(mut self, storage_dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = storage_dir.into();
        self
    }

    pub fn with_progress_key(mut self, progress_key: impl Into<String>) -> Self {
        self.progress_key = progress_key.into();
        self
    }

    pub fn with_render(mut self, render: RenderClientConfig) -> Self {
        self.render = render;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.storage_dir, PathBuf::from("./.pvid"));
        assert_eq!(config.progress_key, "video-creation-progress");
        assert_eq!(config.render.base_url, "http://localhost:8080");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_builder_overrides() {
        let config = StudioConfig::default()
            .with_storage_dir("/var/lib/pvid")
            .with_progress_key("draft-1")
            .with_render(RenderClientConfig::default().with_base_url("http://render:9000"));

        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/pvid"));
        assert_eq!(config.progress_key, "draft-1");
        assert_eq!(config.render.base_url, "http://render:9000");
    }
}
