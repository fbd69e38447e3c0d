use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const STORAGE_FILE: &str = "local-storage.json";

/// Client configuration loaded from environment variables.
/// Fails at startup if `VISTA_API_URL` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub storage_path: PathBuf,
    pub http_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage_path = match std::env::var("VISTA_STORAGE_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_storage_path()?,
        };

        Ok(Config {
            api_url: require_env("VISTA_API_URL")?,
            storage_path,
            http_timeout: Duration::from_secs(
                std::env::var("VISTA_HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .context("VISTA_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn default_storage_path() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .context("Could not determine a local data directory; set VISTA_STORAGE_PATH")?;
    Ok(base.join("vista").join(STORAGE_FILE))
}
