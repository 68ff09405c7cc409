//! Rendering client error types.

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Rendering service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure that carries no description.
    #[error("Rendering failed")]
    Unknown,
}

impl RenderError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_product(msg: impl Into<String>) -> Self {
        Self::InvalidProduct(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RenderError::ServiceUnavailable(_) | RenderError::Timeout(_) | RenderError::Network(_)
        )
    }

    /// Human-readable description, or `None` when the failure carries none.
    pub fn message(&self) -> Option<String> {
        let message = match self {
            RenderError::ServiceUnavailable(m)
            | RenderError::RequestFailed(m)
            | RenderError::InvalidProduct(m)
            | RenderError::InvalidResponse(m)
            | RenderError::ConfigError(m) => m.clone(),
            RenderError::Unknown => return None,
            other => other.to_string(),
        };

        let trimmed = message.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message() {
        assert_eq!(
            RenderError::request_failed("Template not found").message().as_deref(),
            Some("Template not found")
        );
        assert_eq!(RenderError::RequestFailed("  ".to_string()).message(), None);
        assert_eq!(RenderError::Unknown.message(), None);
        assert_eq!(
            RenderError::Timeout(30).message().as_deref(),
            Some("Timeout after 30 seconds")
        );
    }

    #[test]
    fn test_retryable() {
        assert!(RenderError::ServiceUnavailable("busy".into()).is_retryable());
        assert!(RenderError::Timeout(5).is_retryable());
        assert!(!RenderError::invalid_product("no images").is_retryable());
        assert!(!RenderError::Unknown.is_retryable());
    }
}
