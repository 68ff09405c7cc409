//! Shared data models for the product video studio.
//!
//! This crate provides Serde-serializable types for:
//! - Products used as video source material
//! - Workflow steps and the in-progress project record
//! - Video settings with an open extension map
//! - Generation options and results exchanged with the renderer

pub mod generation;
pub mod product;
pub mod progress;
pub mod settings;
pub mod step;
pub mod timestamp;

// Re-export common types
pub use generation::{
    AspectRatio, GenerationStatus, VideoGenerationOptions, VideoGenerationResult, VideoStyling,
    UNKNOWN_ERROR_MESSAGE,
};
pub use product::Product;
pub use progress::{ProjectProgress, PROGRESS_STORAGE_KEY};
pub use settings::{TextOverlay, VideoSettings, VideoSettingsPatch, DEFAULT_MUSIC, DEFAULT_TEMPLATE};
pub use step::WorkflowStep;
