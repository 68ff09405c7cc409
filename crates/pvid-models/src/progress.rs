//! In-progress video project state.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Product, VideoSettings, WorkflowStep};

/// Storage key the progress record is persisted under.
pub const PROGRESS_STORAGE_KEY: &str = "video-creation-progress";

/// The single in-progress project of a user session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    /// Current workflow step
    #[serde(default)]
    pub active_step: WorkflowStep,

    /// Product being promoted
    #[serde(default)]
    pub selected_product: Option<Product>,

    /// Template, music and overlay settings
    #[serde(default)]
    pub video_settings: VideoSettings,

    /// Time of the last successful persisted write
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp::iso_millis_option"
    )]
    #[schemars(with = "Option<DateTime<Utc>>")]
    pub last_saved_at: Option<DateTime<Utc>>,
}

impl ProjectProgress {
    pub fn has_product(&self) -> bool {
        self.selected_product.is_some()
    }

    /// Copy of this record stamped with a save time.
    pub fn stamped(&self, saved_at: DateTime<Utc>) -> Self {
        Self {
            last_saved_at: Some(saved_at),
            ..self.clone()
        }
    }

    /// Serialize to the persisted JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse the persisted JSON form.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
