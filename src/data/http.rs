use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use super::provider::{DataProvider, FetchOutcome, FetchRequest};
use crate::config::HttpConfig;
use crate::error::{Result, SiteStackError};

/// HTTP data provider backed by one explicitly constructed client
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    headers: HashMap<String, String>,
    timeout: Duration,
}

impl HttpProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            headers: HashMap::new(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let timeout = humantime::parse_duration(&config.timeout).map_err(|e| {
            SiteStackError::Config(format!("Invalid http timeout '{}': {}", config.timeout, e))
        })?;

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build()?;

        Ok(Self::new(client)
            .with_headers(config.headers.clone())
            .with_timeout(timeout))
    }

    /// Headers sent with every request; per-request headers win on conflict
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl DataProvider for HttpProvider {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchOutcome> {
        let mut builder = self
            .client
            .get(&request.url)
            .timeout(request.timeout.unwrap_or(self.timeout));

        let mut headers = self.headers.clone();
        headers.extend(request.headers.clone());
        for (key, value) in &headers {
            builder = builder.header(key, value);
        }

        tracing::debug!(url = %request.url, "fetching remote resource");

        let response = builder.send().await.map_err(|e| {
            SiteStackError::Transport(format!("GET {} failed: {}", request.url, e))
        })?;

        let status = response.status();
        tracing::debug!(url = %request.url, status = status.as_u16(), "remote source answered");

        if !status.is_success() {
            return Ok(FetchOutcome::Rejected {
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| {
            SiteStackError::Transport(format!("Failed to read response body: {}", e))
        })?;

        serde_json::from_str(&text)
            .map(FetchOutcome::Fetched)
            .map_err(|e| SiteStackError::Parse(format!("Failed to parse response as JSON: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", address)
    }

    fn provider() -> HttpProvider {
        HttpProvider::from_config(&HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_json() {
        let base = serve(Router::new().route(
            "/users/5",
            get(|| async { axum::Json(json!({"id": 5, "name": "Leanne Graham"})) }),
        ))
        .await;

        let outcome = provider()
            .fetch(&FetchRequest::new(format!("{}/users/5", base)))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            FetchOutcome::Fetched(json!({"id": 5, "name": "Leanne Graham"}))
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let base = serve(Router::new().route(
            "/users/99",
            get(|| async { (StatusCode::NOT_FOUND, "{}") }),
        ))
        .await;

        let outcome = provider()
            .fetch(&FetchRequest::new(format!("{}/users/99", base)))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Rejected { status: 404 });
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let base = serve(Router::new().route("/users", get(|| async { "not json" }))).await;

        let result = provider()
            .fetch(&FetchRequest::new(format!("{}/users", base)))
            .await;

        assert!(matches!(result, Err(SiteStackError::Parse(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let result = provider()
            .fetch(&FetchRequest::new(format!("http://{}/users", address)))
            .await;

        assert!(matches!(result, Err(SiteStackError::Transport(_))));
    }

    #[tokio::test]
    async fn test_headers_are_sent() {
        let base = serve(Router::new().route(
            "/echo",
            get(|headers: axum::http::HeaderMap| async move {
                let value = headers
                    .get("x-api-key")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                axum::Json(json!({ "key": value }))
            }),
        ))
        .await;

        let request = FetchRequest::new(format!("{}/echo", base)).with_headers(
            [("x-api-key".to_string(), "secret".to_string())]
                .into_iter()
                .collect(),
        );
        let outcome = provider().fetch(&request).await.unwrap();

        assert_eq!(outcome, FetchOutcome::Fetched(json!({"key": "secret"})));
    }

    #[test]
    fn test_invalid_timeout() {
        let config = HttpConfig {
            timeout: "forever".to_string(),
            ..HttpConfig::default()
        };

        assert!(matches!(
            HttpProvider::from_config(&config),
            Err(SiteStackError::Config(_))
        ));
    }
}
