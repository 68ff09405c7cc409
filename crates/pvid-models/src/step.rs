//! Authoring workflow steps.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Step of the product-to-video workflow.
///
/// Declaration order is workflow order, so `Ord` compares progress.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStep {
    /// Choosing the product to promote
    #[default]
    Product,
    /// Tuning template, music and overlays
    Customize,
    /// Rendering and publishing
    Publish,
}

impl WorkflowStep {
    /// All steps in workflow order.
    pub const ALL: &'static [WorkflowStep] = &[
        WorkflowStep::Product,
        WorkflowStep::Customize,
        WorkflowStep::Publish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::Product => "product",
            WorkflowStep::Customize => "customize",
            WorkflowStep::Publish => "publish",
        }
    }

    /// The step that follows this one, if any.
    pub fn next(&self) -> Option<WorkflowStep> {
        match self {
            WorkflowStep::Product => Some(WorkflowStep::Customize),
            WorkflowStep::Customize => Some(WorkflowStep::Publish),
            WorkflowStep::Publish => None,
        }
    }

    /// Zero-based position in the workflow.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_final(&self) -> bool {
        matches!(self, WorkflowStep::Publish)
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkflowStep {
    type Err = WorkflowStepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "product" => Ok(WorkflowStep::Product),
            "customize" => Ok(WorkflowStep::Customize),
            "publish" => Ok(WorkflowStep::Publish),
            _ => Err(WorkflowStepParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown workflow step: {0}")]
pub struct WorkflowStepParseError(String);
