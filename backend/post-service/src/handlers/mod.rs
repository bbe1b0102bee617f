/// HTTP handlers for post-service
///
/// - Posts: list, read, create, update, delete under `/api/posts`
/// - Health: summary, liveness and readiness probes under `/api/health`
/// - Metrics: Prometheus text exposition at `/metrics`
pub mod health;
pub mod posts;

use crate::error::AppError;
use crate::metrics;
use actix_web::{error::JsonPayloadError, web, HttpRequest};

// Re-export handler functions at module level
pub use health::{health_summary, liveness_check, readiness_check};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};

/// Route undecodable JSON bodies through `AppError` so they share its error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        tracing::warn!(error = %err, "Rejected request body");
        AppError::BadRequest(err.to_string()).into()
    })
}

/// Register every post-service route.
///
/// Expects `web::Data<SharedPostRepository>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(metrics::serve_metrics))
        .route("/api/health", web::get().to(health_summary))
        .route("/api/health/live", web::get().to(liveness_check))
        .route("/api/health/ready", web::get().to(readiness_check))
        .service(
            web::scope("/api/posts")
                .app_data(json_config())
                .service(
                    web::resource("")
                        .route(web::get().to(list_posts))
                        .route(web::post().to(create_post)),
                )
                .service(
                    web::resource("/{post_id}")
                        .route(web::get().to(get_post))
                        .route(web::put().to(update_post))
                        .route(web::delete().to(delete_post)),
                ),
        );
}
