//! Remote data access.
//!
//! Fetch tasks only need "GET this URL, give me JSON". The trait keeps the
//! tasks independent of the HTTP stack so they can run against canned data.

use crate::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Something that can turn a URL into parsed JSON.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}

/// Unauthenticated JSON-over-HTTP source.
pub struct HttpSource {
    http_client: reqwest::Client,
}

impl HttpSource {
    /// Build a client that identifies itself with `user_agent`.
    ///
    /// No request timeout is set; a hung request only stalls its own task.
    pub fn new(user_agent: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_source_builds() {
        assert!(HttpSource::new("profilegen-test").is_ok());
    }
}
