/// Configuration management for Post Service
///
/// Values come from environment variables (optionally primed from a `.env`
/// file by the binary). Server settings use the `POST_SERVICE_` prefix.
use anyhow::{bail, Context};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Application environment (development, staging, production)
    pub env: String,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Database settings; no URL means the in-memory store is used
    pub database: DatabaseConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

/// HTTP server settings, read from `POST_SERVICE_*`
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// JSON fixture loaded into an empty repository at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

/// Database settings, read from `DATABASE_*`
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(rename = "database_url", default)]
    pub url: Option<String>,
    #[serde(rename = "database_max_connections", default = "default_max_connections")]
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> anyhow::Result<Self> {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        let lookup = |key: &str| {
            vars.iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone())
        };

        let env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let production = env.eq_ignore_ascii_case("production");

        let server: ServerConfig = envy::prefixed("POST_SERVICE_")
            .from_iter(vars.clone())
            .context("Invalid POST_SERVICE_* configuration")?;
        let database: DatabaseConfig = envy::from_iter(vars.clone())
            .context("Invalid DATABASE_* configuration")?;

        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(value) => value,
            None if production => bail!("CORS_ALLOWED_ORIGINS must be set in production"),
            None => "http://localhost:3000".to_string(),
        };
        if production && allowed_origins.trim() == "*" {
            bail!("CORS_ALLOWED_ORIGINS cannot be '*' in production");
        }

        Ok(Config {
            env,
            server,
            database,
            cors: CorsConfig { allowed_origins },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    4
}

fn default_max_connections() -> u32 {
    10
}
