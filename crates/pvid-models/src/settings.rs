//! Per-project video settings.
//!
//! Settings are a closed set of typed fields plus one open `extra` map that
//! is flattened into the same JSON object, so keys written by newer clients
//! survive a round-trip through older ones.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default template for new projects.
pub const DEFAULT_TEMPLATE: &str = "flash-deal";

/// Default background music track.
pub const DEFAULT_MUSIC: &str = "upbeat";

/// Opaque overlay descriptor; its shape belongs to the renderer.
pub type TextOverlay = Value;

/// Video settings of the in-progress project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettings {
    /// Template identifier
    #[serde(default = "default_template")]
    pub template: String,

    /// Music track identifier
    #[serde(default = "default_music")]
    pub music: String,

    /// Text overlays, in stacking order
    #[serde(default)]
    pub text_overlays: Vec<TextOverlay>,

    /// Settings without a typed field, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_music() -> String {
    DEFAULT_MUSIC.to_string()
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            template: default_template(),
            music: default_music(),
            text_overlays: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl VideoSettings {
    /// Shallow merge: supplied keys overwrite, omitted keys are kept.
    pub fn merge(&mut self, patch: VideoSettingsPatch) {
        if let Some(template) = patch.template {
            self.template = template;
        }
        if let Some(music) = patch.music {
            self.music = music;
        }
        if let Some(text_overlays) = patch.text_overlays {
            self.text_overlays = text_overlays;
        }
        for (key, value) in patch.extra {
            self.extra.insert(key, value);
        }
    }

    /// Look up an extension setting.
    pub fn extra_value(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Partial update for [`VideoSettings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_overlays: Option<Vec<TextOverlay>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VideoSettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn music(mut self, music: impl Into<String>) -> Self {
        self.music = Some(music.into());
        self
    }

    pub fn text_overlays(mut self, overlays: Vec<TextOverlay>) -> Self {
        self.text_overlays = Some(overlays);
        self
    }

    /// Set an extension key.
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.template.is_none()
            && self.music.is_none()
            && self.text_overlays.is_none()
            && self.extra.is_empty()
    }
}
