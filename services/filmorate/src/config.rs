use serde::Deserialize;

use filmorate_core::config::Config;

/// Filmorate service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct FilmorateConfig {
    /// PostgreSQL connection URL. Unset runs on the in-memory store.
    pub database_url: Option<String>,
    /// TCP port for the HTTP server (default 8080). Env var: `FILMORATE_PORT`.
    #[serde(default = "default_port")]
    pub filmorate_port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config for FilmorateConfig {}
