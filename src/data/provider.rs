use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;

/// One outbound GET, fully resolved (no templates left)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// What the remote source answered
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// 2xx with a JSON body
    Fetched(Value),
    /// Any non-2xx status; the body is not read
    Rejected { status: u16 },
}

/// Trait for remote data providers
///
/// A provider performs exactly one attempt per call. Transport failures and
/// unparseable bodies are errors; a non-2xx status is an outcome.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchOutcome>;
}
