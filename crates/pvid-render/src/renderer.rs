//! Rendering service abstraction.

use async_trait::async_trait;
use pvid_models::{Product, VideoGenerationOptions, VideoGenerationResult};

use crate::error::RenderResult;

/// Remote video generation.
///
/// Implementations turn a product and options into a rendered video. A
/// service-side failure may come back either as `Err` or as an `Ok` result
/// with error status; callers handle both.
#[async_trait]
pub trait VideoRenderer: Send + Sync {
    async fn generate_video(
        &self,
        product: &Product,
        options: &VideoGenerationOptions,
    ) -> RenderResult<VideoGenerationResult>;
}
