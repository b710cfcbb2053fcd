use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::{Client, Url};

pub type AppState = Arc<AppStateInner>;

/// Shared state for every proxy route: one pooled HTTP client and the
/// backend base URL. Holds no per-request data.
pub struct AppStateInner {
    pub http: Client,
    pub backend_url: Url,
}

impl AppStateInner {
    pub fn new(backend_url: &str, timeout: Duration) -> anyhow::Result<AppState> {
        let backend_url = Url::parse(backend_url)
            .with_context(|| format!("Invalid backend URL '{}'", backend_url))?;
        if backend_url.cannot_be_a_base() {
            bail!("Backend URL '{}' cannot carry a path", backend_url);
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Arc::new(Self { http, backend_url }))
    }

    /// Backend URL for the given path segments. Each segment is
    /// percent-encoded on its own, so a path parameter cannot add segments.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.backend_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
