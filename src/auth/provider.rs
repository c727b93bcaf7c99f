use async_trait::async_trait;
use std::collections::HashMap;

use super::session::{Session, SessionToken, SessionUser};
use crate::config::AuthConfig;
use crate::error::{Result, SiteStackError};

/// Capability to issue and validate session tokens.
///
/// The identity protocol itself (OAuth round-trips, token signing, storage)
/// lives behind implementations of this trait.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Provider name shown to users, e.g. "github"
    fn name(&self) -> &str;

    async fn issue(&self, user: &SessionUser) -> Result<SessionToken>;

    /// `Ok(None)` for unknown or expired tokens
    async fn validate(&self, token: &str) -> Result<Option<Session>>;
}

/// Provider over a fixed token table from config. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    name: String,
    tokens: HashMap<String, SessionUser>,
}

impl StaticTokenProvider {
    pub fn new(name: impl Into<String>, tokens: HashMap<String, SessionUser>) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.provider.clone(), config.tokens.clone())
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn issue(&self, user: &SessionUser) -> Result<SessionToken> {
        self.tokens
            .iter()
            .find(|(_, known)| *known == user)
            .map(|(token, _)| SessionToken(token.clone()))
            .ok_or_else(|| SiteStackError::Auth(format!("Unknown user: {}", user.name)))
    }

    async fn validate(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.tokens.get(token).map(|user| Session {
            user: user.clone(),
            provider: self.name.clone(),
        }))
    }
}
