//! Studio composition root.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, warn};

use pvid_models::{VideoGenerationOptions, VideoGenerationResult};
use pvid_render::{RenderClient, VideoRenderer};
use pvid_storage::{validate_key, FileStore, KeyValueStore};

use crate::config::StudioConfig;
use crate::error::StudioResult;
use crate::generation::GenerationController;
use crate::notify::{BroadcastNotifier, FanoutNotifier, Notification, Notifier, TracingNotifier};
use crate::progress_store::ProgressStore;

/// Message of the result returned when generating with nothing selected.
pub const NO_PRODUCT_MESSAGE: &str = "No product selected";

/// One editing session: the resumable project plus its generation requests.
pub struct Studio {
    progress: ProgressStore,
    generation: GenerationController,
    notifications: Option<BroadcastNotifier>,
}

impl Studio {
    /// Build a studio from injected collaborators, hydrating saved progress.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        renderer: Arc<dyn VideoRenderer>,
        notifier: Arc<dyn Notifier>,
        progress_key: impl Into<String>,
    ) -> Self {
        Self {
            progress: ProgressStore::load_with_key(store, notifier, progress_key),
            generation: GenerationController::new(renderer),
            notifications: None,
        }
    }

    /// Build a studio backed by a [`FileStore`] and a [`RenderClient`].
    ///
    /// Notifications go to the log and to [`Studio::subscribe_notifications`].
    pub fn from_config(config: &StudioConfig) -> StudioResult<Self> {
        validate_key(&config.progress_key)?;

        let store = FileStore::open(&config.storage_dir)?;
        let renderer = RenderClient::new(config.render.clone())?;
        let broadcast = BroadcastNotifier::default();
        let notifier = FanoutNotifier::new()
            .with(Arc::new(TracingNotifier))
            .with(Arc::new(broadcast.clone()));

        info!(
            storage_dir = %config.storage_dir.display(),
            key = %config.progress_key,
            render_url = %config.render.base_url,
            "Studio initialized"
        );

        let mut studio = Self::new(
            Arc::new(store),
            Arc::new(renderer),
            Arc::new(notifier),
            config.progress_key.clone(),
        );
        studio.notifications = Some(broadcast);
        Ok(studio)
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressStore {
        &mut self.progress
    }

    pub fn generation(&self) -> &GenerationController {
        &self.generation
    }

    /// Subscribe to notifications, when built through [`Studio::from_config`].
    ///
    /// Messages sent before subscribing (such as the restore notice emitted
    /// during hydration) are not replayed.
    pub fn subscribe_notifications(&self) -> Option<broadcast::Receiver<Notification>> {
        self.notifications.as_ref().map(BroadcastNotifier::subscribe)
    }

    /// Options derived from the current video settings.
    pub fn generation_options(&self) -> VideoGenerationOptions {
        VideoGenerationOptions::from_settings(self.progress.video_settings())
    }

    /// Generate a video for the selected product using the current settings.
    pub async fn generate_from_progress(&self) -> VideoGenerationResult {
        match self.progress.selected_product() {
            Some(product) => {
                let options = self.generation_options();
                self.generation.generate(product, &options).await
            }
            None => {
                warn!("Generation requested with no product selected");
                VideoGenerationResult::error(NO_PRODUCT_MESSAGE)
            }
        }
    }
}
