//! Product promo video studio.
//!
//! This crate provides:
//! - Resumable project progress (product, settings, workflow step)
//! - Video generation requests with stale-completion protection
//! - User notifications
//! - Configuration, logging and metrics setup

pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod metrics;
pub mod notify;
pub mod progress_store;
pub mod studio;

pub use config::StudioConfig;
pub use error::{StudioError, StudioResult};
pub use generation::{GenerationController, GenerationPhase, GenerationState};
pub use logging::{init_tracing, GenerationLogger, LogFormat};
pub use notify::{
    BroadcastNotifier, FanoutNotifier, Notification, NotificationLevel, NotificationLog, Notifier,
    TracingNotifier,
};
pub use progress_store::{ProgressStore, SaveOutcome};
pub use studio::{Studio, NO_PRODUCT_MESSAGE};
