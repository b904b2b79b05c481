//! Fetching source images from the public image host.
//!
//! [`ImageSource`] is the seam between the pipeline and the network. The
//! production [`HttpSource`] issues one unauthenticated GET per identifier;
//! tests use an in-memory source instead.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("Timed out fetching {url}")]
    TimedOut { url: String },
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// Anything that can hand back the raw bytes of a stored image.
pub trait ImageSource: Sync {
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>, FetchError>;
}

/// Reads images over HTTP(S) from `<base_url><identifier>`.
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { base_url, client })
    }

    /// Source address for an identifier: plain concatenation, no separator
    /// added, so the base URL carries its own trailing slash.
    pub fn url_for(&self, identifier: &str) -> String {
        format!("{}{}", self.base_url, identifier)
    }
}

impl ImageSource for HttpSource {
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(identifier);
        let transport = |e: reqwest::Error, url: &str| {
            if e.is_timeout() {
                FetchError::TimedOut {
                    url: url.to_string(),
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        };

        let response = self.client.get(&url).send().map_err(|e| transport(e, &url))?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status { url, status });
        }
        let bytes = response.bytes().map_err(|e| transport(e, &url))?;
        Ok(bytes.to_vec())
    }
}
