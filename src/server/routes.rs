use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;
use tracing::debug;

use super::state::AppState;
use crate::auth::Session;
use crate::error::Result;
use crate::view::RenderedPage;

/// Fallback handler: every path not claimed by the API is a configured page
pub async fn page_handler(State(state): State<Arc<AppState>>, request: Request) -> Result<Response> {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let path = request.uri().path().to_string();
    let session = request.extensions().get::<Session>().cloned();

    let Some(route) = state.resolver.resolve(&path) else {
        debug!(%path, "no page for path");
        return not_found(&state);
    };

    match state.pages.render(&route, session.as_ref()).await? {
        RenderedPage::Found(html) => Ok(Html(html).into_response()),
        RenderedPage::NotFound(html) => Ok((StatusCode::NOT_FOUND, Html(html)).into_response()),
    }
}

fn not_found(state: &AppState) -> Result<Response> {
    let html = state.pages.render_not_found()?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
