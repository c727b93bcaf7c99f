use anyhow::{Context, Result, anyhow};
use std::collections::HashSet;

use super::schema::{Config, DataSource, Field, Page, View};
use crate::navigation::PathPattern;
use crate::view::STATIC_TEMPLATES;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> Result<()> {
        // Validate version
        if config.version != "v1" {
            return Err(anyhow!(
                "Unsupported config version: {}. Expected: v1",
                config.version
            ));
        }

        // Validate app name
        if config.app.name.trim().is_empty() {
            return Err(anyhow!("App name cannot be empty"));
        }

        if config.pages.is_empty() {
            return Err(anyhow!("No pages defined in config"));
        }

        if !config.pages.contains_key(&config.start) {
            return Err(anyhow!("Start page '{}' not found in pages", config.start));
        }

        humantime::parse_duration(&config.http.timeout)
            .with_context(|| format!("Invalid http timeout format: {}", config.http.timeout))?;

        // Two pages may not claim the same pattern
        let mut seen_paths = HashSet::new();
        for (page_id, page) in &config.pages {
            Self::validate_page(page)
                .with_context(|| format!("Invalid page: {}", page_id))?;

            let normalized = PathPattern::parse(&page.path)?.to_string();
            if !seen_paths.insert(normalized) {
                return Err(anyhow!(
                    "Page '{}' reuses path '{}' declared by another page",
                    page_id,
                    page.path
                ));
            }
        }

        for pattern in &config.auth.matcher {
            PathPattern::parse(pattern)
                .with_context(|| format!("Invalid auth matcher: {}", pattern))?;
        }

        if config.auth.cookie.trim().is_empty() {
            return Err(anyhow!("Auth cookie name cannot be empty"));
        }

        Ok(())
    }

    fn validate_page(page: &Page) -> Result<()> {
        if page.title.trim().is_empty() {
            return Err(anyhow!("Page title cannot be empty"));
        }

        let pattern = PathPattern::parse(&page.path).context("Invalid path")?;

        if let Some(data) = &page.data {
            Self::validate_data_source(data).context("Invalid data source")?;
        }

        match &page.view {
            View::Collection(_) => {
                if page.data.is_none() {
                    return Err(anyhow!("Collection view requires a data source"));
                }
            }
            View::Record(record) => {
                if page.data.is_none() {
                    return Err(anyhow!("Record view requires a data source"));
                }
                if !pattern.params().any(|p| p == record.identifier) {
                    return Err(anyhow!(
                        "Record identifier '{}' is not a parameter of path '{}'",
                        record.identifier,
                        page.path
                    ));
                }
                for field in &record.fields {
                    Self::validate_field(field, &pattern)
                        .with_context(|| format!("Invalid field: {}", field.display))?;
                }
            }
            View::Static(view) => {
                if !STATIC_TEMPLATES.contains(&view.template.as_str()) {
                    return Err(anyhow!(
                        "Unknown static template: {}. Valid templates: {:?}",
                        view.template,
                        STATIC_TEMPLATES
                    ));
                }
            }
            View::Session(_) => {}
        }

        Ok(())
    }

    fn validate_data_source(source: &DataSource) -> Result<()> {
        if source.url.trim().is_empty() {
            return Err(anyhow!("Data source must have a 'url'"));
        }

        // Validate timeout format if present
        if let Some(timeout) = &source.timeout {
            humantime::parse_duration(timeout)
                .with_context(|| format!("Invalid timeout format: {}", timeout))?;
        }

        Ok(())
    }

    fn validate_field(field: &Field, pattern: &PathPattern) -> Result<()> {
        match (&field.path, &field.param) {
            (Some(_), Some(_)) => Err(anyhow!("Field can only define one of: path, param")),
            (None, None) => Err(anyhow!("Field must define one of: path, param")),
            (None, Some(param)) => {
                if pattern.params().any(|p| p == param.as_str()) {
                    Ok(())
                } else {
                    Err(anyhow!("Unknown path parameter '{}'", param))
                }
            }
            (Some(path), None) => {
                crate::data::JsonPathExtractor::new(path)?;
                Ok(())
            }
        }
    }
}
