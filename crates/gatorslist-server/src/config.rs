use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub backend_url: String,
    pub backend_timeout: Duration,
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("GATORSLIST_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("GATORSLIST_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("GATORSLIST_PORT must be a port number")?;

        let backend_url = lookup("GATORSLIST_BACKEND_URL")
            .or_else(|| lookup("BACKEND_URL"))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.into());

        let timeout_secs: u64 = lookup("GATORSLIST_BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|| "15".into())
            .parse()
            .context("GATORSLIST_BACKEND_TIMEOUT_SECS must be a whole number of seconds")?;
        if timeout_secs == 0 {
            bail!("GATORSLIST_BACKEND_TIMEOUT_SECS must be at least 1");
        }

        let cors_origins = lookup("GATORSLIST_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            backend_url,
            backend_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}
