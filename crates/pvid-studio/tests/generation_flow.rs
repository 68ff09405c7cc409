//! End-to-end generation against a mock rendering service.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pvid_models::{VideoSettingsPatch, PROGRESS_STORAGE_KEY, UNKNOWN_ERROR_MESSAGE};
use pvid_render::{RenderClient, RenderClientConfig, GENERATE_PATH};
use pvid_storage::MemoryStore;
use pvid_studio::{GenerationPhase, NotificationLog, Studio, StudioConfig, NO_PRODUCT_MESSAGE};

fn studio_for(server: &MockServer) -> Studio {
    let client = RenderClient::new(
        RenderClientConfig::default()
            .with_base_url(server.uri())
            .with_retries(1, Duration::from_millis(1)),
    )
    .unwrap();

    Studio::new(
        Arc::new(MemoryStore::new()),
        Arc::new(client),
        Arc::new(NotificationLog::new()),
        PROGRESS_STORAGE_KEY,
    )
}

#[tokio::test]
async fn test_generate_from_saved_progress() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "product": {"title": "Bluetooth Speaker"},
            "options": {"template": "product-showcase", "music": "calm"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "videoUrl": "https://cdn.example.com/v/speaker.mp4",
            "jobId": "job-17"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut studio = studio_for(&server);
    studio.progress_mut().set_product(common::speaker()).unwrap();
    studio
        .progress_mut()
        .set_video_settings(
            VideoSettingsPatch::new()
                .template("product-showcase")
                .music("calm"),
        )
        .unwrap();

    let result = studio.generate_from_progress().await;

    assert!(result.is_success());
    assert_eq!(result.job_id.as_deref(), Some("job-17"));
    let state = studio.generation().state();
    assert_eq!(state.phase(), GenerationPhase::Succeeded);
    assert!(!state.is_generating);
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn test_service_error_message_reaches_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(402).set_body_json(json!({"error": "Out of render credits"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut studio = studio_for(&server);
    studio.progress_mut().set_product(common::lamp()).unwrap();

    let result = studio.generate_from_progress().await;

    assert_eq!(result.error_message.as_deref(), Some("Out of render credits"));
    assert_eq!(
        studio.generation().error_message().as_deref(),
        Some("Out of render credits")
    );
    assert!(!studio.generation().is_generating());
}

#[tokio::test]
async fn test_blank_service_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&server)
        .await;

    let mut studio = studio_for(&server);
    studio.progress_mut().set_product(common::lamp()).unwrap();

    let result = studio.generate_from_progress().await;

    assert_eq!(result.error_message.as_deref(), Some(UNKNOWN_ERROR_MESSAGE));
    assert_eq!(
        studio.generation().error_message().as_deref(),
        Some(UNKNOWN_ERROR_MESSAGE)
    );
}

#[tokio::test]
async fn test_nothing_sent_without_product() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let studio = studio_for(&server);

    let result = studio.generate_from_progress().await;

    assert_eq!(result.error_message.as_deref(), Some(NO_PRODUCT_MESSAGE));
}

#[tokio::test]
async fn test_from_config_resumes_and_generates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "videoUrl": "https://cdn.example.com/v/lamp.mp4"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = StudioConfig::default()
        .with_storage_dir(dir.path())
        .with_render(
            RenderClientConfig::default()
                .with_base_url(server.uri())
                .with_retries(0, Duration::from_millis(1)),
        );

    {
        let mut first = Studio::from_config(&config).unwrap();
        first.progress_mut().set_product(common::lamp()).unwrap();
    }

    let second = Studio::from_config(&config).unwrap();
    assert!(second.progress().was_restored());

    let result = second.generate_from_progress().await;
    assert_eq!(
        result.video_url.as_deref(),
        Some("https://cdn.example.com/v/lamp.mp4")
    );
}
