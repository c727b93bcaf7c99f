use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use super::provider::AuthProvider;
use crate::config::AuthConfig;
use crate::error::Result;
use crate::navigation::PathPattern;

/// State for the session middleware
#[derive(Clone)]
pub struct SessionLayerState {
    provider: Arc<dyn AuthProvider>,
    matcher: Arc<Vec<PathPattern>>,
    cookie: String,
}

impl SessionLayerState {
    pub fn new(provider: Arc<dyn AuthProvider>, config: &AuthConfig) -> Result<Self> {
        let matcher = config
            .matcher
            .iter()
            .map(|pattern| PathPattern::parse(pattern))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            provider,
            matcher: Arc::new(matcher),
            cookie: config.cookie.clone(),
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.iter().any(|pattern| pattern.matches(path).is_some())
    }
}

/// Attach the validated [`Session`](super::Session) to matched requests.
///
/// Never rejects: requests without a valid token pass through unchanged.
pub async fn resolve_session(
    State(state): State<SessionLayerState>,
    mut request: Request,
    next: Next,
) -> Response {
    if state.matches(request.uri().path()) {
        if let Some(token) = extract_token(request.headers(), &state.cookie) {
            match state.provider.validate(&token).await {
                Ok(Some(session)) => {
                    tracing::debug!(user = %session.user.name, "session resolved");
                    request.extensions_mut().insert(session);
                }
                Ok(None) => tracing::debug!("session token rejected"),
                Err(e) => tracing::warn!(error = %e, "session validation failed"),
            }
        }
    }

    next.run(request).await
}

/// Token from `Authorization: Bearer <t>`, falling back to the session cookie
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
