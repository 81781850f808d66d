//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with SLO-aligned histograms
//! and standardized naming conventions.

use metrics::{
    counter, describe_counter, describe_histogram, histogram, Unit,
};
use std::time::Instant;

/// Metrics prefix for all intake metrics
pub const METRICS_PREFIX: &str = "intake";

/// SLO-aligned histogram buckets for request latency (in seconds)
/// Targets: P50 < 50ms, P99 < 150ms
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms - P50 target
    0.075,  // 75ms
    0.100,  // 100ms
    0.150,  // 150ms - P99 target
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
    10.00,  // 10s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Form catalog metrics
    describe_counter!(
        format!("{}_forms_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total forms created"
    );

    describe_counter!(
        format!("{}_forms_deleted_total", METRICS_PREFIX),
        Unit::Count,
        "Total forms deleted via cascading delete"
    );

    describe_counter!(
        format!("{}_cascade_rows_deleted_total", METRICS_PREFIX),
        Unit::Count,
        "Child rows removed by cascading form deletes, labeled by table"
    );

    describe_counter!(
        format!("{}_questions_appended_total", METRICS_PREFIX),
        Unit::Count,
        "Total questions appended to forms"
    );

    // Submission metrics
    describe_counter!(
        format!("{}_entries_created_total", METRICS_PREFIX),
        Unit::Count,
        "Total form entries created"
    );

    describe_counter!(
        format!("{}_answers_recorded_total", METRICS_PREFIX),
        Unit::Count,
        "Total answers recorded"
    );

    describe_counter!(
        format!("{}_reviews_upserted_total", METRICS_PREFIX),
        Unit::Count,
        "Total review upserts"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a form creation
pub fn record_form_created() {
    counter!(format!("{}_forms_created_total", METRICS_PREFIX)).increment(1);
}

/// Helper to record an appended question
pub fn record_question_appended(question_type: &str) {
    counter!(
        format!("{}_questions_appended_total", METRICS_PREFIX),
        "type" => question_type.to_string()
    )
    .increment(1);
}

/// Helper to record a form entry creation
pub fn record_entry_created() {
    counter!(format!("{}_entries_created_total", METRICS_PREFIX)).increment(1);
}

/// Helper to record a recorded answer
pub fn record_answer_recorded(answer_type: &str) {
    counter!(
        format!("{}_answers_recorded_total", METRICS_PREFIX),
        "type" => answer_type.to_string()
    )
    .increment(1);
}

/// Helper to record a review upsert
pub fn record_review_upserted() {
    counter!(format!("{}_reviews_upserted_total", METRICS_PREFIX)).increment(1);
}

/// Helper to record a cascading form delete and its per-table row counts
pub fn record_cascade_delete(answers: u64, notes: u64, entries: u64, questions: u64) {
    counter!(format!("{}_forms_deleted_total", METRICS_PREFIX)).increment(1);

    for (table, rows) in [
        ("answer", answers),
        ("staffapplicationnotes", notes),
        ("formentries", entries),
        ("questions", questions),
    ] {
        counter!(
            format!("{}_cascade_rows_deleted_total", METRICS_PREFIX),
            "table" => table
        )
        .increment(rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets() {
        // Verify buckets are sorted and contain SLO targets
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }

        // P50 target (50ms) should be in buckets
        assert!(LATENCY_BUCKETS.contains(&0.050));
        // P99 target (150ms) should be in buckets
        assert!(LATENCY_BUCKETS.contains(&0.150));
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("GET", "/forms/feed");
        std::thread::sleep(std::time::Duration::from_millis(10));
        metrics.finish(200);
        // Just verify it runs without panic
    }

    #[test]
    fn test_cascade_recorder() {
        record_cascade_delete(5, 2, 2, 3);
        // Just verify it runs without panic
    }
}
