use crate::error::{ProcessingError, Result};
use crate::utils::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Blocking HTTP download of a remote dataset. Failures are returned as
/// [`ProcessingError::Fetch`] and never retried.
pub struct UrlFetcher {
    client: Client,
}

impl UrlFetcher {
    pub fn new() -> Result<Self> {
        Self::with_options(
            Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            DEFAULT_USER_AGENT,
        )
    }

    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProcessingError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let fetch_error = |message: String| ProcessingError::Fetch {
            url: url.to_string(),
            message,
        };

        info!("fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        debug!("{} responded with {}", url, status);
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP status {}", status)));
        }

        let bytes = response.bytes().map_err(|e| fetch_error(e.to_string()))?;
        info!("fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
