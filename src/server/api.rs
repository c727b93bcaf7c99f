use axum::extract::State;
use axum::{Extension, Json};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::state::AppState;
use crate::auth::{Session, extract_token};
use crate::error::Result;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct HelloRequest {
    #[serde(default)]
    pub name: Option<String>,
}

pub async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello from the sitestack API route!".to_string(),
    })
}

pub async fn hello_post(Json(payload): Json<HelloRequest>) -> Json<Message> {
    Json(Message {
        message: format!(
            "this {} Data received successfully in the post route",
            payload.name.as_deref().unwrap_or("undefined")
        ),
    })
}

/// Current session, `null` when the request carries none.
///
/// Reuses a session the middleware already attached, otherwise validates the
/// request token directly since the API is outside the page matcher.
pub async fn session(
    State(state): State<Arc<AppState>>,
    attached: Option<Extension<Session>>,
    headers: HeaderMap,
) -> Result<Json<Option<Session>>> {
    if let Some(Extension(session)) = attached {
        return Ok(Json(Some(session)));
    }

    let session = match extract_token(&headers, &state.config.auth.cookie) {
        Some(token) => state.auth.validate(&token).await?,
        None => None,
    };
    Ok(Json(session))
}
