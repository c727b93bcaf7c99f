use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config::Config;
use crate::navigation::RouteResolver;
use crate::view::PageRenderer;

/// Read-only state shared by every handler
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<dyn RouteResolver>,
    pub pages: PageRenderer,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        resolver: Arc<dyn RouteResolver>,
        pages: PageRenderer,
        auth: Arc<dyn AuthProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            resolver,
            pages,
            auth,
        })
    }
}
