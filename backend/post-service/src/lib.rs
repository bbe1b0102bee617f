/// Post Service Library
///
/// CRUD REST surface over `Post` records for the Nova platform. Handlers
/// delegate every state change to an injected `PostRepository`.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `models`: the `Post` record and its validation rules
/// - `db`: repository trait, PostgreSQL and in-memory stores, startup seeding
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
/// - `metrics`: Prometheus counters and the `/metrics` handler
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;

pub use config::Config;
pub use error::{AppError, Result};
pub use models::Post;
