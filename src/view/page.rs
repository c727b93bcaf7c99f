use serde_json::Value;
use std::sync::Arc;

use super::collection::CollectionView;
use super::not_found::NotFoundView;
use super::record::RecordView;
use super::renderer::{PageMeta, ViewRenderer};
use super::session::SessionView;
use super::static_page::StaticView;
use crate::auth::Session;
use crate::config::{Config, DataSource, Page, View};
use crate::error::{Result, SiteStackError};
use crate::navigation::ResolvedRoute;
use crate::resource::{Identifier, ResourceFetcher, ResourceOutcome};
use crate::template::{TemplateContext, TemplateEngine};

/// Outcome of rendering a resolved route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedPage {
    Found(String),
    NotFound(String),
}

/// Turns a resolved route into HTML, fetching remote data where the page asks for it
#[derive(Clone)]
pub struct PageRenderer {
    config: Arc<Config>,
    fetcher: ResourceFetcher,
    engine: TemplateEngine,
    home_path: String,
}

impl PageRenderer {
    pub fn new(
        config: Arc<Config>,
        fetcher: ResourceFetcher,
        engine: TemplateEngine,
        home_path: impl Into<String>,
    ) -> Self {
        Self {
            config,
            fetcher,
            engine,
            home_path: home_path.into(),
        }
    }

    pub async fn render(
        &self,
        route: &ResolvedRoute,
        session: Option<&Session>,
    ) -> Result<RenderedPage> {
        let page = self.config.pages.get(&route.page_id).ok_or_else(|| {
            SiteStackError::Navigation(format!("Page not found: {}", route.page_id))
        })?;
        let meta = PageMeta {
            app_name: &self.config.app.name,
            title: &page.title,
            description: page.description.as_deref(),
            home_path: &self.home_path,
        };
        let context = TemplateContext::new()
            .with_globals(self.config.globals.clone())
            .with_params(route.params.clone());

        tracing::debug!(page = %route.page_id, layout = page.view.layout(), "rendering page");

        let html = match &page.view {
            View::Collection(config) => {
                let source = data_source(&route.page_id, page)?;
                match self.fetcher.fetch(source, None, &context).await? {
                    ResourceOutcome::Collection(collection) => {
                        CollectionView::new(config, &collection).render(&self.engine, &meta)?
                    }
                    other => return Err(unexpected(&route.page_id, &other)),
                }
            }
            View::Record(config) => {
                let source = data_source(&route.page_id, page)?;
                let value = route.param(&config.identifier).ok_or_else(|| {
                    SiteStackError::Navigation(format!(
                        "Route for '{}' has no '{}' parameter",
                        route.page_id, config.identifier
                    ))
                })?;
                let identifier = Identifier {
                    param: &config.identifier,
                    value,
                };
                match self.fetcher.fetch(source, Some(identifier), &context).await? {
                    ResourceOutcome::Record(record) => {
                        RecordView::new(config, &record, &route.params).render(&self.engine, &meta)?
                    }
                    ResourceOutcome::NotFound => {
                        return self.render_not_found().map(RenderedPage::NotFound);
                    }
                    other => return Err(unexpected(&route.page_id, &other)),
                }
            }
            View::Static(config) => {
                let item_count = match &page.data {
                    Some(source) => {
                        let value = self.fetcher.fetch_value(source, &context).await?;
                        let count = match &value {
                            Value::Array(items) => Some(items.len()),
                            _ => None,
                        };
                        tracing::debug!(page = %route.page_id, ?count, "static page data loaded");
                        count
                    }
                    None => None,
                };
                StaticView::new(&config.template, item_count)?.render(&self.engine, &meta)?
            }
            View::Session(_) => {
                SessionView::new(session, &self.config.auth.provider).render(&self.engine, &meta)?
            }
        };

        Ok(RenderedPage::Found(html))
    }

    pub fn render_not_found(&self) -> Result<String> {
        NotFoundView::render_page(&self.engine, &self.config.app.name, &self.home_path)
    }
}

fn data_source<'a>(page_id: &str, page: &'a Page) -> Result<&'a DataSource> {
    page.data.as_ref().ok_or_else(|| {
        SiteStackError::Config(format!("Page '{}' has no data source", page_id))
    })
}

fn unexpected(page_id: &str, outcome: &ResourceOutcome) -> SiteStackError {
    SiteStackError::Parse(format!(
        "Unexpected payload for page '{}': {:?}",
        page_id, outcome
    ))
}
