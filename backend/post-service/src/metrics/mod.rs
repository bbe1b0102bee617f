//! Prometheus metrics for post-service.
//!
//! Exposes per-operation counters and an HTTP handler for the `/metrics` endpoint.

use crate::error::Result;
use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    /// Post API calls segmented by operation and outcome (ok or error kind).
    pub static ref POST_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "post_operations_total",
        "Post API operations segmented by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("failed to register post_operations_total");
}

/// Count the outcome of `operation` and hand the result back unchanged.
pub fn observe<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(err) => err.kind(),
    };
    POST_OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
    result
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
