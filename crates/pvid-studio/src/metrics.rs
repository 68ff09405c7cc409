//! Studio metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! host application installs a recorder.

use metrics::{counter, histogram};

use pvid_models::DEFAULT_TEMPLATE;

/// Metric names as constants for consistency.
pub mod names {
    // Generation metrics
    pub const GENERATION_REQUESTS_TOTAL: &str = "pvid_generation_requests_total";
    pub const GENERATION_COMPLETED_TOTAL: &str = "pvid_generation_completed_total";
    pub const GENERATION_DURATION_SECONDS: &str = "pvid_generation_duration_seconds";
    pub const GENERATION_STALE_TOTAL: &str = "pvid_generation_stale_total";

    // Progress persistence metrics
    pub const PROGRESS_WRITES_TOTAL: &str = "pvid_progress_writes_total";
    pub const PROGRESS_RESTORES_TOTAL: &str = "pvid_progress_restores_total";
}

/// Templates reported under their own name; anything else is `custom`.
pub const LABELED_TEMPLATES: &[&str] = &[DEFAULT_TEMPLATE, "product-showcase", "minimal"];

/// Label value for `template`, bounded to [`LABELED_TEMPLATES`].
pub fn template_label(template: &str) -> &'static str {
    LABELED_TEMPLATES
        .iter()
        .copied()
        .find(|known| *known == template)
        .unwrap_or("custom")
}

/// Record a generation request being issued.
pub fn record_generation_started(template: &str) {
    let labels = [("template", template_label(template))];
    counter!(names::GENERATION_REQUESTS_TOTAL, &labels).increment(1);
}

/// Record a finished generation request.
pub fn record_generation_finished(template: &str, status: &str, duration_secs: f64) {
    let labels = [
        ("template", template_label(template).to_string()),
        ("status", status.to_string()),
    ];
    counter!(names::GENERATION_COMPLETED_TOTAL, &labels).increment(1);
    histogram!(names::GENERATION_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a completion that arrived after a newer request.
pub fn record_stale_generation() {
    counter!(names::GENERATION_STALE_TOTAL).increment(1);
}

/// Record a progress write attempt.
pub fn record_progress_write(success: bool) {
    let labels = [("outcome", if success { "ok" } else { "error" }.to_string())];
    counter!(names::PROGRESS_WRITES_TOTAL, &labels).increment(1);
}

/// Record a hydration attempt that found stored progress.
pub fn record_progress_restore(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::PROGRESS_RESTORES_TOTAL, &labels).increment(1);
}
