use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::auth::SessionUser;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub version: String,
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub globals: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Page the not-found view links back to
    pub start: String,
    pub pages: HashMap<String, Page>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:3000".to_string()
}

/// Settings for the outbound HTTP client shared by every page
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout: String,
    #[serde(default = "default_pool_size")]
    pub pool_max_idle_per_host: usize,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            pool_max_idle_per_host: default_pool_size(),
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

fn default_timeout() -> String {
    "30s".to_string()
}

fn default_pool_size() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// External identity provider, e.g. "github". Descriptive only.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub session_strategy: SessionStrategy,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Path patterns the session middleware runs on
    #[serde(default = "default_matcher")]
    pub matcher: Vec<String>,
    #[serde(default = "default_cookie")]
    pub cookie: String,
    /// Token -> user, consumed by the static token provider
    #[serde(default)]
    pub tokens: HashMap<String, SessionUser>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            session_strategy: SessionStrategy::default(),
            client_id: None,
            client_secret: None,
            matcher: default_matcher(),
            cookie: default_cookie(),
            tokens: HashMap::new(),
        }
    }
}

fn default_provider() -> String {
    "github".to_string()
}

fn default_matcher() -> Vec<String> {
    vec!["/user-info".to_string()]
}

fn default_cookie() -> String {
    "session".to_string()
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStrategy {
    #[default]
    Jwt,
    Database,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Path pattern, e.g. `/users/{userId}`
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub data: Option<DataSource>,
    pub view: View,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataSource {
    /// URL template rendered against globals and route params
    pub url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum View {
    Collection(CollectionView),
    Record(RecordView),
    Static(StaticView),
    Session(SessionView),
}

impl View {
    pub fn layout(&self) -> &'static str {
        match self {
            View::Collection(_) => "collection",
            View::Record(_) => "record",
            View::Static(_) => "static",
            View::Session(_) => "session",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionView {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Column {
    pub path: String,
    pub display: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordView {
    /// Name of the path parameter carrying the record identifier
    pub identifier: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A labelled value, read either from the record (`path`) or from the route (`param`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Field {
    pub display: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticView {
    pub template: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionView {}
