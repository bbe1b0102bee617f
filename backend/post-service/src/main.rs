use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use post_service::db::{
    seed_from_file, InMemoryPostRepository, PgPostRepository, SharedPostRepository,
};
use post_service::{handlers, Config};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn build_repository(config: &Config) -> anyhow::Result<SharedPostRepository> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; using in-memory post repository");
        return Ok(Arc::new(InMemoryPostRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        max_connections = config.database.max_connections,
        "Connected to PostgreSQL"
    );
    Ok(Arc::new(PgPostRepository::new(pool)))
}

fn build_cors(config: &Config) -> Cors {
    let mut cors = Cors::default();
    for origin in config.cors.origins() {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

/// Post Service
///
/// Serves `/api/posts` backed by PostgreSQL when `DATABASE_URL` is set, or by
/// an in-memory store otherwise. Health probes live under `/api/health` and
/// Prometheus metrics at `/metrics`.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!("Starting post-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.env);

    let repository = build_repository(&config).await?;

    if let Some(seed_path) = &config.server.seed_path {
        seed_from_file(repository.as_ref(), seed_path)
            .await
            .context("Failed to seed posts")?;
    }

    let bind_address = config.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let repository_data = web::Data::new(repository);
    let http_config = config.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(repository_data.clone())
            .wrap(build_cors(&http_config))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {bind_address}"))?
    .workers(config.server.workers)
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    tracing::info!("post-service shutting down");
    Ok(())
}
