//! Resumable in-progress project state.
//!
//! [`ProgressStore`] owns the single [`ProjectProgress`] of a session and
//! mirrors it to a [`KeyValueStore`] after every change, so an interrupted
//! session picks up where it left off.
//!
//! Writes are skipped until a product has been selected; an empty skeleton
//! is never persisted. Each mutator applies its change in memory first and
//! then reports the outcome of the write, leaving it to the caller whether a
//! failed write is shown to the user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use pvid_models::{
    Product, ProjectProgress, VideoSettings, VideoSettingsPatch, WorkflowStep,
    PROGRESS_STORAGE_KEY,
};
use pvid_storage::{KeyValueStore, StorageError, StorageResult};

use crate::metrics;
use crate::notify::{Notification, Notifier};

/// Shown when saved progress is loaded at startup.
pub const RESTORED_MESSAGE: &str = "Previous progress restored";

/// Shown after an explicit reset.
pub const RESET_MESSAGE: &str = "Progress reset";

/// Outcome of a persistence attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Full state written, stamped with this time
    Saved(DateTime<Utc>),
    /// Nothing written because no product is selected
    Skipped,
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

/// Owner of the in-progress project.
pub struct ProgressStore {
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    key: String,
    progress: ProjectProgress,
    restored: bool,
}

impl ProgressStore {
    /// Create the store under the default key, hydrating from storage.
    pub fn load(store: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self::load_with_key(store, notifier, PROGRESS_STORAGE_KEY)
    }

    /// Create the store under `key`, hydrating from storage.
    ///
    /// Unreadable or malformed saved state is logged and discarded; the
    /// store then starts from defaults.
    pub fn load_with_key(
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let mut restored = false;

        let progress = match store.get(&key) {
            Ok(Some(raw)) => match ProjectProgress::from_json(&raw) {
                Ok(progress) => {
                    info!(
                        key = %key,
                        step = %progress.active_step,
                        "Restored saved progress"
                    );
                    metrics::record_progress_restore("ok");
                    notifier.notify(Notification::info(RESTORED_MESSAGE));
                    restored = true;
                    progress
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding malformed saved progress");
                    metrics::record_progress_restore("malformed");
                    ProjectProgress::default()
                }
            },
            Ok(None) => {
                debug!(key = %key, "No saved progress");
                ProjectProgress::default()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read saved progress");
                metrics::record_progress_restore("unreadable");
                ProjectProgress::default()
            }
        };

        Self {
            store,
            notifier,
            key,
            progress,
            restored,
        }
    }

    /// Current state.
    pub fn progress(&self) -> &ProjectProgress {
        &self.progress
    }

    pub fn active_step(&self) -> WorkflowStep {
        self.progress.active_step
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.progress.selected_product.as_ref()
    }

    pub fn video_settings(&self) -> &VideoSettings {
        &self.progress.video_settings
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.progress.last_saved_at
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Whether hydration found and loaded saved progress.
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    /// Jump to `step` without any ordering check.
    pub fn set_active_step(&mut self, step: WorkflowStep) -> StorageResult<SaveOutcome> {
        self.progress.active_step = step;
        self.persist()
    }

    /// Select the product to promote and move on to customization.
    pub fn set_product(&mut self, product: Product) -> StorageResult<SaveOutcome> {
        self.progress.selected_product = Some(product);
        self.progress.active_step = WorkflowStep::Customize;
        self.persist()
    }

    /// Merge `patch` into the settings and move on to publishing.
    pub fn set_video_settings(&mut self, patch: VideoSettingsPatch) -> StorageResult<SaveOutcome> {
        self.progress.video_settings.merge(patch);
        self.progress.active_step = WorkflowStep::Publish;
        self.persist()
    }

    /// Drop the saved entry and start over from defaults.
    ///
    /// In-memory state is reset even when the entry cannot be removed; the
    /// success notification is only sent once storage is clear.
    pub fn reset(&mut self) -> StorageResult<()> {
        self.progress = ProjectProgress::default();
        self.restored = false;

        match self.store.remove(&self.key) {
            Ok(()) => {
                info!(key = %self.key, "Progress reset");
                self.notifier.notify(Notification::success(RESET_MESSAGE));
                Ok(())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to clear saved progress");
                Err(e)
            }
        }
    }

    fn persist(&mut self) -> StorageResult<SaveOutcome> {
        if !self.progress.has_product() {
            debug!(key = %self.key, "No product selected, skipping save");
            return Ok(SaveOutcome::Skipped);
        }

        if let Some(field) = self
            .progress
            .selected_product
            .as_ref()
            .and_then(Product::non_finite_field)
        {
            metrics::record_progress_write(false);
            warn!(key = %self.key, field, "Refusing to save product with non-finite number");
            return Err(StorageError::write_failed(format!(
                "product {} is not a finite number",
                field
            )));
        }

        let saved_at = Utc::now();
        let json = self
            .progress
            .stamped(saved_at)
            .to_json()
            .map_err(|e| StorageError::write_failed(format!("serialize progress: {}", e)))?;

        match self.store.set(&self.key, &json) {
            Ok(()) => {
                self.progress.last_saved_at = Some(saved_at);
                metrics::record_progress_write(true);
                debug!(
                    key = %self.key,
                    step = %self.progress.active_step,
                    bytes = json.len(),
                    "Saved progress"
                );
                Ok(SaveOutcome::Saved(saved_at))
            }
            Err(e) => {
                metrics::record_progress_write(false);
                warn!(key = %self.key, error = %e, "Failed to save progress");
                Err(e)
            }
        }
    }
}
