use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::model::{ResourceCollection, ResourceOutcome, ResourceRecord};
use crate::config::DataSource;
use crate::data::{DataProvider, FetchOutcome, FetchRequest};
use crate::error::{Result, SiteStackError};
use crate::template::{TemplateContext, TemplateEngine};

// Everything but RFC 3986 unreserved characters, so a value stays one path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A record identifier together with the URL template variable it fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier<'a> {
    pub param: &'a str,
    pub value: &'a str,
}

/// Builds the endpoint for a data source and performs the single fetch
#[derive(Clone)]
pub struct ResourceFetcher {
    provider: Arc<dyn DataProvider>,
    engine: TemplateEngine,
}

impl ResourceFetcher {
    pub fn new(provider: Arc<dyn DataProvider>, engine: TemplateEngine) -> Self {
        Self { provider, engine }
    }

    /// Fetch a record when an identifier is given, the collection otherwise.
    ///
    /// Any non-2xx answer for a record is `NotFound`. For a collection it is
    /// an error, like transport and parse failures.
    pub async fn fetch(
        &self,
        source: &DataSource,
        identifier: Option<Identifier<'_>>,
        context: &TemplateContext,
    ) -> Result<ResourceOutcome> {
        let context = match identifier {
            // URL parsers resolve "." and ".." (even percent-encoded) as dot segments
            Some(id) if id.value == "." || id.value == ".." => {
                tracing::warn!(identifier = id.value, "identifier is a dot segment");
                return Ok(ResourceOutcome::NotFound);
            }
            Some(id) => context
                .clone()
                .with_param(id.param, utf8_percent_encode(id.value, SEGMENT).to_string()),
            None => context.clone(),
        };
        let request = self.build_request(source, &context)?;

        match (self.provider.fetch(&request).await?, identifier) {
            (FetchOutcome::Rejected { status }, Some(id)) => {
                tracing::warn!(url = %request.url, status, identifier = id.value, "record not found");
                Ok(ResourceOutcome::NotFound)
            }
            (FetchOutcome::Rejected { status }, None) => Err(SiteStackError::Status {
                url: request.url,
                status,
            }),
            (FetchOutcome::Fetched(value), Some(_)) => {
                ResourceRecord::from_value(value).map(ResourceOutcome::Record)
            }
            (FetchOutcome::Fetched(value), None) => {
                let collection = ResourceCollection::from_value(value)?;
                let duplicates = collection.duplicate_ids();
                if !duplicates.is_empty() {
                    tracing::warn!(url = %request.url, ?duplicates, "collection repeats record ids");
                }
                Ok(ResourceOutcome::Collection(collection))
            }
        }
    }

    /// Fetch loosely structured data; any non-2xx answer is an error
    pub async fn fetch_value(&self, source: &DataSource, context: &TemplateContext) -> Result<Value> {
        let request = self.build_request(source, context)?;

        match self.provider.fetch(&request).await? {
            FetchOutcome::Fetched(value) => Ok(value),
            FetchOutcome::Rejected { status } => Err(SiteStackError::Status {
                url: request.url,
                status,
            }),
        }
    }

    fn build_request(&self, source: &DataSource, context: &TemplateContext) -> Result<FetchRequest> {
        let url = self.render(&source.url, context)?;

        let headers = source
            .headers
            .iter()
            .map(|(key, value)| Ok((key.clone(), self.render(value, context)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        let mut request = FetchRequest::new(url).with_headers(headers);
        if let Some(timeout) = &source.timeout {
            let timeout = humantime::parse_duration(timeout).map_err(|e| {
                SiteStackError::Config(format!("Invalid timeout '{}': {}", timeout, e))
            })?;
            request = request.with_timeout(timeout);
        }

        Ok(request)
    }

    fn render(&self, value: &str, context: &TemplateContext) -> Result<String> {
        if TemplateEngine::is_template(value) {
            self.engine.render_string(value, context)
        } else {
            Ok(value.to_string())
        }
    }
}
