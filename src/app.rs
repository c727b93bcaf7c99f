use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::auth::{AuthProvider, SessionLayerState, StaticTokenProvider};
use crate::config::{Config, ConfigValidator};
use crate::data::{DataProvider, HttpProvider};
use crate::error::{Result, SiteStackError};
use crate::navigation::PageRouter;
use crate::resource::ResourceFetcher;
use crate::server::{self, AppState};
use crate::template::{TemplateContext, TemplateEngine};
use crate::view::PageRenderer;

/// The running site: every shared service is built here once and handed to
/// handlers through [`AppState`]. Dropping the `App` releases them.
pub struct App {
    state: Arc<AppState>,
    sessions: SessionLayerState,
}

impl App {
    /// Build the app with an HTTP client configured from `config.http`
    pub fn new(config: Config) -> Result<Self> {
        let provider = HttpProvider::from_config(&config.http)?;
        Self::with_provider(config, Arc::new(provider))
    }

    /// Build the app over any data provider. The config is validated first.
    pub fn with_provider(config: Config, provider: Arc<dyn DataProvider>) -> Result<Self> {
        ConfigValidator::validate(&config)
            .map_err(|e| SiteStackError::Validation(format!("{:#}", e)))?;

        let engine = TemplateEngine::new()?;
        let config = Arc::new(resolve_auth_descriptor(config, &engine)?);

        let router = PageRouter::new(config.clone())?;
        let pages = PageRenderer::new(
            config.clone(),
            ResourceFetcher::new(provider, engine.clone()),
            engine,
            router.start_path().to_string(),
        );

        let auth: Arc<dyn AuthProvider> = Arc::new(StaticTokenProvider::from_config(&config.auth));
        let sessions = SessionLayerState::new(auth.clone(), &config.auth)?;

        info!(
            app = %config.app.name,
            pages = config.pages.len(),
            start = %router.start_page(),
            auth = auth.name(),
            "application initialized"
        );

        let state = AppState::new(config, Arc::new(router), pages, auth);
        Ok(Self { state, sessions })
    }

    pub fn config(&self) -> &Config {
        &self.state.config
    }

    pub fn router(&self) -> Router {
        server::build_router(self.state.clone(), self.sessions.clone())
    }

    /// Serve until `shutdown` resolves, then tear the app down
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = listener.local_addr()?;
        info!("Server running on http://{}", address);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped, releasing resources");
        drop(self);
        Ok(())
    }
}

/// Render the OAuth client id/secret templates against the environment.
/// The descriptor is only carried for a real provider; nothing here talks to it.
fn resolve_auth_descriptor(mut config: Config, engine: &TemplateEngine) -> Result<Config> {
    let context = TemplateContext::new();
    let render = |value: Option<String>| -> Result<Option<String>> {
        match value {
            Some(value) if TemplateEngine::is_template(&value) => {
                let rendered = engine.render_string(&value, &context)?;
                Ok(Some(rendered).filter(|v| !v.is_empty()))
            }
            other => Ok(other),
        }
    };

    config.auth.client_id = render(config.auth.client_id.take())?;
    config.auth.client_secret = render(config.auth.client_secret.take())?;

    if config.auth.client_id.is_none() {
        warn!(provider = %config.auth.provider, "no OAuth client id configured");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    #[test]
    fn test_auth_descriptor_renders_to_none_without_env() {
        let mut config = ConfigLoader::load_default().unwrap();
        config.auth.client_id = Some("{{ env.SITESTACK_TEST_UNSET_ID | default(value='') }}".to_string());
        config.auth.client_secret = Some("literal-secret".to_string());

        let config = resolve_auth_descriptor(config, &TemplateEngine::new().unwrap()).unwrap();

        assert_eq!(config.auth.client_id, None);
        assert_eq!(config.auth.client_secret.as_deref(), Some("literal-secret"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ConfigLoader::load_default().unwrap();
        config.pages.get_mut("user").unwrap().data = None;

        let err = App::new(config).err().unwrap();

        assert!(matches!(err, SiteStackError::Validation(_)));
        assert!(err.to_string().contains("Record view requires a data source"));
    }

    #[test]
    fn test_new_builds_from_default_config() {
        let app = App::new(ConfigLoader::load_default().unwrap()).unwrap();

        assert_eq!(app.config().app.name, "sitestack");
    }
}
