//! Video generation request controller.
//!
//! Issues render requests and tracks the observable state of the most recent
//! one. Calls may overlap: each call takes a sequence number and only the
//! latest issued request is allowed to write its completion into the shared
//! state. Earlier completions still return their result to their own caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, Instrument};

use pvid_models::{Product, VideoGenerationOptions, VideoGenerationResult, UNKNOWN_ERROR_MESSAGE};
use pvid_render::{RenderError, VideoRenderer};

use crate::logging::GenerationLogger;
use crate::metrics;

/// Coarse lifecycle of the latest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPhase {
    Idle,
    Generating,
    Succeeded,
    Failed,
}

/// Observable generation state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationState {
    pub is_generating: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VideoGenerationResult>,
    /// Sequence number of the latest issued request, 0 before the first
    pub request_id: u64,
}

impl GenerationState {
    pub fn phase(&self) -> GenerationPhase {
        if self.is_generating {
            return GenerationPhase::Generating;
        }
        match &self.result {
            Some(result) if result.is_success() => GenerationPhase::Succeeded,
            Some(_) => GenerationPhase::Failed,
            None if self.error_message.is_some() => GenerationPhase::Failed,
            None => GenerationPhase::Idle,
        }
    }
}

/// Clears `is_generating` when a `generate` future is dropped before it
/// completes, as long as no newer request has been issued since.
struct InFlight<'a> {
    controller: &'a GenerationController,
    request_id: u64,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let request_id = self.request_id;
        let sequence = &self.controller.sequence;
        let cleared = self.controller.state.send_if_modified(|state| {
            if sequence.load(Ordering::SeqCst) != request_id || !state.is_generating {
                return false;
            }
            state.is_generating = false;
            true
        });

        if cleared {
            debug!(request_id, "Generation abandoned before completion");
        }
    }
}

/// Issues generation requests against a [`VideoRenderer`].
pub struct GenerationController {
    renderer: Arc<dyn VideoRenderer>,
    state: watch::Sender<GenerationState>,
    sequence: AtomicU64,
}

impl GenerationController {
    pub fn new(renderer: Arc<dyn VideoRenderer>) -> Self {
        let (state, _) = watch::channel(GenerationState::default());
        Self {
            renderer,
            state,
            sequence: AtomicU64::new(0),
        }
    }

    /// Render a promo video for `product`.
    ///
    /// Never fails: renderer errors and invalid products come back as an
    /// error result, with the same message stored in the state.
    pub async fn generate(
        &self,
        product: &Product,
        options: &VideoGenerationOptions,
    ) -> VideoGenerationResult {
        let request_id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let logger = GenerationLogger::new(request_id, &options.template);

        self.state.send_modify(|state| {
            state.is_generating = true;
            state.error_message = None;
            state.request_id = state.request_id.max(request_id);
        });
        let mut in_flight = InFlight {
            controller: self,
            request_id,
            armed: true,
        };

        logger.log_start(&product.title);
        metrics::record_generation_started(&options.template);
        let started = Instant::now();

        let outcome = match product.validate() {
            Ok(()) => {
                self.renderer
                    .generate_video(product, options)
                    .instrument(logger.create_span())
                    .await
            }
            Err(reason) => Err(RenderError::invalid_product(reason)),
        };

        let (result, error_message) = match outcome {
            Ok(mut result) => {
                let message = result.failure_message();
                if message.is_some() {
                    result.error_message = message.clone();
                }
                (result, message)
            }
            Err(e) => {
                logger.log_debug(&format!("Renderer error: {}", e));
                let message = e
                    .message()
                    .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
                (VideoGenerationResult::error(message.clone()), Some(message))
            }
        };

        match &error_message {
            Some(message) => logger.log_failure(message),
            None => logger.log_completion(result.video_url.as_deref()),
        }
        metrics::record_generation_finished(
            &options.template,
            result.status.as_str(),
            started.elapsed().as_secs_f64(),
        );

        in_flight.armed = false;
        let applied = self.state.send_if_modified(|state| {
            if self.sequence.load(Ordering::SeqCst) != request_id {
                return false;
            }
            state.result = Some(result.clone());
            state.error_message = error_message.clone();
            state.is_generating = false;
            true
        });

        if !applied {
            logger.log_stale(self.latest_request_id());
            metrics::record_stale_generation();
        }

        result
    }

    /// Clear the last result and error. An in-flight request keeps running.
    pub fn reset(&self) {
        self.state.send_if_modified(|state| {
            let changed = state.result.is_some() || state.error_message.is_some();
            state.result = None;
            state.error_message = None;
            changed
        });
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> GenerationState {
        self.state.borrow().clone()
    }

    pub fn is_generating(&self) -> bool {
        self.state.borrow().is_generating
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.borrow().error_message.clone()
    }

    pub fn result(&self) -> Option<VideoGenerationResult> {
        self.state.borrow().result.clone()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<GenerationState> {
        self.state.subscribe()
    }

    /// Sequence number of the most recently issued request.
    pub fn latest_request_id(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}
