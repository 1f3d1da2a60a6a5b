//! In-memory data source for tests.

use super::client::DataSource;
use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves canned JSON per URL. Unknown URLs answer 404.
#[derive(Default)]
pub struct FakeSource {
    responses: HashMap<String, Value>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    /// Make `url` fail with a server error even if a body is registered.
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 500,
            });
        }

        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
