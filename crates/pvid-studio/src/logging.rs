//! Tracing setup and structured generation logging.

use tracing::{debug, error, info, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{StudioError, StudioResult};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "pvid_studio=info,pvid_render=info,pvid_storage=info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, colored
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; anything other than `json` is pretty.
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> StudioResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .map_err(|e| StudioError::logging_error(e.to_string()))?;

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .try_init(),
    };

    result.map_err(|e| StudioError::logging_error(e.to_string()))
}

/// Logger for one video generation request.
///
/// Every line carries the request sequence number and template so
/// overlapping requests can be told apart.
#[derive(Debug, Clone)]
pub struct GenerationLogger {
    request_id: u64,
    template: String,
}

impl GenerationLogger {
    pub fn new(request_id: u64, template: &str) -> Self {
        Self {
            request_id,
            template: template.to_string(),
        }
    }

    pub fn log_start(&self, product_title: &str) {
        info!(
            request_id = self.request_id,
            template = %self.template,
            "Generation started: {}", product_title
        );
    }

    pub fn log_completion(&self, video_url: Option<&str>) {
        info!(
            request_id = self.request_id,
            template = %self.template,
            "Generation completed: {}", video_url.unwrap_or("no video url")
        );
    }

    pub fn log_failure(&self, message: &str) {
        error!(
            request_id = self.request_id,
            template = %self.template,
            "Generation failed: {}", message
        );
    }

    /// A completion arrived after a newer request was issued.
    pub fn log_stale(&self, latest: u64) {
        debug!(
            request_id = self.request_id,
            latest_request_id = latest,
            template = %self.template,
            "Discarding stale generation result"
        );
    }

    pub fn log_debug(&self, message: &str) {
        debug!(
            request_id = self.request_id,
            template = %self.template,
            "{}", message
        );
    }

    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Span wrapping the renderer call.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "generation",
            request_id = self.request_id,
            template = %self.template
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
    }

    #[test]
    fn test_generation_logger() {
        let logger = GenerationLogger::new(7, "flash-deal");
        assert_eq!(logger.request_id(), 7);
        assert_eq!(logger.template(), "flash-deal");
    }

    #[test]
    fn test_init_tracing_twice_fails() {
        // The first call may lose to another test's subscriber; the second
        // one always finds a global subscriber in place.
        let _ = init_tracing(LogFormat::Json);
        assert!(matches!(
            init_tracing(LogFormat::Pretty),
            Err(StudioError::LoggingError(_))
        ));
    }
}
