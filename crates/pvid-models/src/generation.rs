//! Video generation request options and outcomes.

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::settings::{TextOverlay, VideoSettings};

/// Default clip length in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 15;

/// Fallback message when a failure carries no description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Output aspect ratio, serialized as `"W:H"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Vertical 9:16 for Shorts/Reels/TikTok
    pub const PORTRAIT: AspectRatio = AspectRatio {
        width: 9,
        height: 16,
    };

    /// Square (1:1)
    pub const SQUARE: AspectRatio = AspectRatio {
        width: 1,
        height: 1,
    };

    /// Widescreen (16:9)
    pub const LANDSCAPE: AspectRatio = AspectRatio {
        width: 16,
        height: 9,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the aspect ratio as a decimal.
    pub fn as_f64(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn is_vertical(&self) -> bool {
        self.height > self.width
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::PORTRAIT
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| AspectRatioParseError::InvalidFormat(s.to_string()))?;

        let width = w
            .trim()
            .parse()
            .map_err(|_| AspectRatioParseError::InvalidNumber(w.to_string()))?;
        let height = h
            .trim()
            .parse()
            .map_err(|_| AspectRatioParseError::InvalidNumber(h.to_string()))?;

        if width == 0 || height == 0 {
            return Err(AspectRatioParseError::ZeroValue);
        }

        Ok(AspectRatio { width, height })
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = AspectRatioParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.to_string()
    }
}

impl JsonSchema for AspectRatio {
    fn schema_name() -> String {
        "AspectRatio".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

#[derive(Debug, Error)]
pub enum AspectRatioParseError {
    #[error("Invalid aspect ratio format: {0}, expected 'W:H'")]
    InvalidFormat(String),
    #[error("Invalid number in aspect ratio: {0}")]
    InvalidNumber(String),
    #[error("Aspect ratio cannot have zero values")]
    ZeroValue,
}

/// Brand styling applied by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoStyling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// Options passed to the rendering service alongside the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoGenerationOptions {
    /// Template identifier
    pub template: String,

    /// Output aspect ratio
    #[serde(default)]
    pub aspect_ratio: AspectRatio,

    /// Target clip length in seconds
    #[serde(default = "default_duration")]
    pub duration_secs: u32,

    /// Background music track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,

    /// Text overlays, passed through to the renderer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_overlays: Vec<TextOverlay>,

    /// Brand styling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<VideoStyling>,

    /// Burn the watermark into the output
    #[serde(default = "default_true")]
    pub include_watermark: bool,

    /// Renderer-specific options without a typed field
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_SECS
}

fn default_true() -> bool {
    true
}

impl VideoGenerationOptions {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            aspect_ratio: AspectRatio::default(),
            duration_secs: DEFAULT_DURATION_SECS,
            music: None,
            text_overlays: Vec::new(),
            styling: None,
            include_watermark: true,
            extra: Map::new(),
        }
    }

    /// Derive options from a project's settings.
    ///
    /// Extension settings named like a typed option set that option when
    /// they parse and are dropped otherwise, so each key is sent once. The
    /// typed settings fields always win. Other extension settings are
    /// forwarded untouched.
    pub fn from_settings(settings: &VideoSettings) -> Self {
        let mut options = Self {
            music: Some(settings.music.clone()),
            text_overlays: settings.text_overlays.clone(),
            ..Self::new(settings.template.clone())
        };

        for (key, value) in &settings.extra {
            options.apply_extra(key, value);
        }

        options
    }

    fn apply_extra(&mut self, key: &str, value: &Value) {
        fn parse<T: serde::de::DeserializeOwned>(value: &Value) -> Option<T> {
            serde_json::from_value(value.clone()).ok()
        }

        match key {
            "aspectRatio" => {
                if let Some(aspect_ratio) = parse(value) {
                    self.aspect_ratio = aspect_ratio;
                }
            }
            "durationSecs" => {
                if let Some(duration_secs) = parse(value) {
                    self.duration_secs = duration_secs;
                }
            }
            "styling" => {
                if let Some(styling) = parse(value) {
                    self.styling = Some(styling);
                }
            }
            "includeWatermark" => {
                if let Some(include_watermark) = parse(value) {
                    self.include_watermark = include_watermark;
                }
            }
            "template" | "music" | "textOverlays" => {}
            _ => {
                self.extra.insert(key.to_string(), value.clone());
            }
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_styling(mut self, styling: VideoStyling) -> Self {
        self.styling = Some(styling);
        self
    }

    pub fn with_watermark(mut self, include_watermark: bool) -> Self {
        self.include_watermark = include_watermark;
        self
    }
}

impl Default for VideoGenerationOptions {
    fn default() -> Self {
        Self::from_settings(&VideoSettings::default())
    }
}

/// Outcome status reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Success,
    Error,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Success => "success",
            GenerationStatus::Error => "error",
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one video generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoGenerationResult {
    pub status: GenerationStatus,

    /// Rendered video location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Poster frame location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Renderer job identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,

    /// Failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl VideoGenerationResult {
    /// Successful render.
    pub fn success(video_url: impl Into<String>) -> Self {
        Self {
            status: GenerationStatus::Success,
            video_url: Some(video_url.into()),
            thumbnail_url: None,
            job_id: None,
            error_message: None,
        }
    }

    /// Failed render with a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: GenerationStatus::Error,
            video_url: None,
            thumbnail_url: None,
            job_id: None,
            error_message: Some(message.into()),
        }
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == GenerationStatus::Success
    }

    /// Error text for a failed result, falling back to a generic message.
    pub fn failure_message(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        Some(
            self.error_message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
        )
    }
}
