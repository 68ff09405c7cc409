//! Client for the remote video rendering service.
//!
//! This crate provides:
//! - The `VideoRenderer` trait the studio generates videos through
//! - An HTTP implementation with timeout and retry on transient failures

pub mod client;
pub mod error;
pub mod renderer;
pub mod retry;

pub use client::{RenderClient, RenderClientConfig, GENERATE_PATH};
pub use error::{RenderError, RenderResult};
pub use renderer::VideoRenderer;
pub use retry::{retry_async, RetryConfig};
