use std::collections::HashMap;
use std::sync::Arc;

use super::pattern::PathPattern;
use crate::config::Config;
use crate::error::Result;

/// A request path resolved to a configured page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub page_id: String,
    pub params: HashMap<String, String>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Resolves a navigation path into a page and its parameters
pub trait RouteResolver: Send + Sync {
    fn resolve(&self, path: &str) -> Option<ResolvedRoute>;
}

/// Router over the pages declared in config
#[derive(Debug, Clone)]
pub struct PageRouter {
    config: Arc<Config>,
    // sorted, most specific first
    routes: Vec<(PathPattern, String)>,
}

impl PageRouter {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let mut routes = config
            .pages
            .iter()
            .map(|(page_id, page)| Ok((PathPattern::parse(&page.path)?, page_id.clone())))
            .collect::<Result<Vec<_>>>()?;

        // Page ids break ties so resolution does not depend on map order
        routes.sort_by(|(a, a_id), (b, b_id)| {
            b.specificity()
                .cmp(&a.specificity())
                .then_with(|| a_id.cmp(b_id))
        });

        Ok(Self { config, routes })
    }

    pub fn start_page(&self) -> &str {
        &self.config.start
    }

    /// Path the not-found view links back to
    pub fn start_path(&self) -> &str {
        self.config
            .pages
            .get(&self.config.start)
            .map(|page| page.path.as_str())
            .unwrap_or("/")
    }
}

impl RouteResolver for PageRouter {
    fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        self.routes.iter().find_map(|(pattern, page_id)| {
            pattern.matches(path).map(|params| ResolvedRoute {
                page_id: page_id.clone(),
                params,
            })
        })
    }
}
