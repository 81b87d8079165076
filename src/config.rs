use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub templates_path: PathBuf,
    pub static_dir: PathBuf,
    pub upstream_timeout: Duration,
    pub log_file: Option<PathBuf>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// `from_env` is the production entry point; tests pass a map lookup so
    /// they never touch the process environment.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let templates_path = lookup("TEMPLATES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./config/requests.yaml"));

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./template"));

        let timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?;
        if timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        let log_file = lookup("LOG_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            templates_path,
            static_dir,
            upstream_timeout: Duration::from_secs(timeout_secs),
            log_file,
            service_port,
            service_host,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Templates file: {}", self.templates_path.display());
        tracing::info!("  Static directory: {}", self.static_dir.display());
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout.as_secs());
        tracing::info!(
            "  Log file: {}",
            self.log_file
                .as_deref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "disabled (stdout only)".to_string())
        );
        tracing::info!("  Service listening on: {}", self.bind_addr());
    }
}
