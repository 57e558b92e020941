//! Prometheus metrics for pricing-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Pricing request counter by operation and status.
pub static PRICING_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pricing_requests_total",
        "Total number of pricing requests",
        &["operation", "status"]
    )
    .expect("Failed to register pricing_requests_total")
});

/// Compute duration histogram by operation.
pub static COMPUTE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "pricing_compute_duration_seconds",
        "Pricing computation duration in seconds",
        &["operation"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1]
    )
    .expect("Failed to register pricing_compute_duration")
});

/// Priced line counter by document type.
pub static LINES_PRICED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pricing_lines_priced_total",
        "Total number of line items priced by document type",
        &["document_type"]
    )
    .expect("Failed to register pricing_lines_priced_total")
});

/// Free-of-charge lines flagged for review, by document type.
pub static FREE_LINES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pricing_free_lines_total",
        "Total number of zero-priced lines flagged for review",
        &["document_type"]
    )
    .expect("Failed to register pricing_free_lines_total")
});

/// Stored-vs-recomputed drift counter by drifting field.
pub static DRIFT_FIELDS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pricing_drift_fields_total",
        "Total number of stored fields found inconsistent with recomputation",
        &["field"]
    )
    .expect("Failed to register pricing_drift_fields_total")
});

/// Error counter for alerting.
pub static ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pricing_errors_total",
        "Total number of errors by type",
        &["error_type"]
    )
    .expect("Failed to register pricing_errors_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&PRICING_REQUESTS_TOTAL);
    Lazy::force(&COMPUTE_DURATION);
    Lazy::force(&LINES_PRICED_TOTAL);
    Lazy::force(&FREE_LINES_TOTAL);
    Lazy::force(&DRIFT_FIELDS_TOTAL);
    Lazy::force(&ERRORS_TOTAL);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
