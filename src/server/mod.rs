//! HTTP surface: the page fallback, the JSON API and the layers around them.

pub mod api;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::auth::{SessionLayerState, resolve_session};
pub use state::AppState;

/// Assemble the application router. The session layer runs inside the trace span.
pub fn build_router(state: Arc<AppState>, sessions: SessionLayerState) -> Router {
    Router::new()
        .route("/api/hello", get(api::hello).post(api::hello_post))
        .route("/api/session", get(api::session))
        .fallback(routes::page_handler)
        .layer(from_fn_with_state(sessions, resolve_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
