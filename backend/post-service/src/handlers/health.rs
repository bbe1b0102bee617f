//! Liveness and readiness probes.

use crate::db::{PostRepository, SharedPostRepository};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::time::Instant;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    latency_ms: u64,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    repository: ComponentCheck,
}

pub async fn health_summary() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "post-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// Ready when the repository answers a count query
pub async fn readiness_check(repo: web::Data<SharedPostRepository>) -> HttpResponse {
    let start = Instant::now();
    let result = repo.count().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let repository = match result {
        Ok(count) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: format!("{count} posts stored"),
            latency_ms,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("Repository check failed: {}", e.kind()),
                latency_ms,
            }
        }
    };

    let ready = repository.status == ComponentStatus::Healthy;
    let response = ReadinessResponse {
        ready,
        status: repository.status.clone(),
        repository,
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
