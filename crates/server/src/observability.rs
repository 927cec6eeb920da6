use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static DEAL_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "deals_operations_total",
        "Deal API operations by outcome",
        &["operation", "outcome"]
    )
    .expect("register deals_operations_total")
});

pub static DEALS_STORED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("deals_stored", "Deals currently held in memory")
        .expect("register deals_stored")
});

pub fn record(operation: &str, outcome: &str) {
    DEAL_OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn set_stored(count: usize) {
    DEALS_STORED.set(i64::try_from(count).unwrap_or(i64::MAX));
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
