//! GET-with-payload-in-path notifier.

use crate::error::{MonitorError, Result};
use crate::notifier::Notifier;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

/// Sends `GET {endpoint}/{payload}` with the payload percent-encoded as a
/// single path segment, e.g. `.../push/34.600%20C`.
#[derive(Debug, Clone)]
pub struct UrlPathNotifier {
    endpoint: Url,
    client: Client,
}

impl UrlPathNotifier {
    /// Create a notifier for `endpoint`. Every request is bounded by `timeout`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            MonitorError::config_error(format!("Invalid remote endpoint {:?}: {}", endpoint, e))
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.cannot_be_a_base() {
            return Err(MonitorError::config_error(format!(
                "Remote endpoint must be an http(s) URL, got {}",
                endpoint
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MonitorError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for a payload.
    pub fn url_for(&self, payload: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(payload);
        }
        url
    }
}

#[async_trait]
impl Notifier for UrlPathNotifier {
    async fn notify(&self, payload: &str) -> Result<()> {
        let url = self.url_for(payload);
        tracing::debug!(url = %url, "GET request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| MonitorError::Transport {
                endpoint: self.endpoint.to_string(),
                source,
            })?;
        tracing::debug!(status = %response.status(), "GET finished");

        if response.status() != StatusCode::OK {
            return Err(MonitorError::UnexpectedStatus(response.status().as_u16()));
        }

        Ok(())
    }
}
