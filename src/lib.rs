pub mod app;
pub mod auth;
pub mod config;
pub mod data;
pub mod navigation;
pub mod resource;
pub mod server;
pub mod template;
pub mod view;

pub mod error;

pub use error::SiteStackError;

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` wins; otherwise `info`, or `debug` when verbose.
pub fn setup_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
