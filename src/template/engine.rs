use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tera::{Context, Tera};

use crate::error::{Result, SiteStackError};
use crate::view::PAGE_TEMPLATES;

/// Template engine for URL templates and HTML pages (shared behind Arc<RwLock>)
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    tera: Arc<RwLock<Tera>>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Names end in .html so tera autoescapes everything rendered through them
        tera.add_raw_templates(PAGE_TEMPLATES.iter().copied())
            .map_err(|e| SiteStackError::Template(format!("Invalid page template: {}", e)))?;

        Ok(Self {
            tera: Arc::new(RwLock::new(tera)),
        })
    }

    /// Render an inline template string such as a data source URL
    pub fn render_string(&self, template: &str, context: &TemplateContext) -> Result<String> {
        let tera_context = context.to_tera_context();

        // One-off rendering needs the write lock
        let mut tera = self.tera.write().map_err(|e| {
            SiteStackError::Template(format!("Failed to acquire template lock: {}", e))
        })?;

        tera.render_str(template, &tera_context)
            .map_err(|e| SiteStackError::Template(format!("Template rendering error: {}", e)))
    }

    /// Render one of the registered page templates
    pub fn render_page(&self, name: &str, context: &Context) -> Result<String> {
        let tera = self.tera.read().map_err(|e| {
            SiteStackError::Template(format!("Failed to acquire template lock: {}", e))
        })?;

        tera.render(name, context).map_err(|e| {
            SiteStackError::Template(format!("Failed to render page '{}': {:?}", name, e))
        })
    }

    /// Check if a string contains template syntax
    pub fn is_template(s: &str) -> bool {
        s.contains("{{") && s.contains("}}")
    }
}

/// Context for inline template rendering
#[derive(Debug, Clone)]
pub struct TemplateContext {
    /// Global variables from config
    pub globals: HashMap<String, Value>,
    /// Route parameters of the page being rendered
    pub params: HashMap<String, String>,
    /// Environment variables (loaded from system environment)
    pub env: HashMap<String, Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self {
            globals: HashMap::new(),
            params: HashMap::new(),
            env: Self::load_env_vars(),
        }
    }

    /// Load environment variables from the system
    fn load_env_vars() -> HashMap<String, Value> {
        std::env::vars()
            .map(|(k, v)| (k, Value::String(v)))
            .collect()
    }

    pub fn with_globals(mut self, globals: HashMap<String, Value>) -> Self {
        self.globals = globals;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params.extend(params);
        self
    }

    /// Convert to Tera context
    pub fn to_tera_context(&self) -> Context {
        let mut context = Context::new();

        // Add environment variables (first, so they can be overridden)
        context.insert("env", &self.env);

        for (key, value) in &self.globals {
            context.insert(key, value);
        }

        // Route params shadow globals of the same name
        for (key, value) in &self.params {
            context.insert(key, value);
        }

        context
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_url_template() {
        let engine = TemplateEngine::new().unwrap();
        let mut context = TemplateContext::new().with_param("userId", "5");
        context
            .globals
            .insert("base".to_string(), json!("https://api.example.com"));

        let result = engine
            .render_string("{{ base }}/users/{{ userId }}", &context)
            .unwrap();
        assert_eq!(result, "https://api.example.com/users/5");
    }

    #[test]
    fn test_params_shadow_globals() {
        let engine = TemplateEngine::new().unwrap();
        let mut context = TemplateContext::new().with_param("id", "route");
        context.globals.insert("id".to_string(), json!("global"));

        let result = engine.render_string("{{ id }}", &context).unwrap();
        assert_eq!(result, "route");
    }

    #[test]
    fn test_is_template() {
        assert!(TemplateEngine::is_template("{{ var }}"));
        assert!(TemplateEngine::is_template("Hello {{ name }}!"));
        assert!(!TemplateEngine::is_template("Just a string"));
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let engine = TemplateEngine::new().unwrap();
        let context = TemplateContext::new();

        let result = engine.render_string("{{ base }}/users", &context);
        assert!(matches!(result, Err(SiteStackError::Template(_))));
    }

    #[test]
    fn test_env_var_with_default() {
        let engine = TemplateEngine::new().unwrap();
        let context = TemplateContext::new();

        let result = engine
            .render_string(
                "{{ env.SITESTACK_NONEXISTENT | default(value='fallback') }}",
                &context,
            )
            .unwrap();
        assert_eq!(result, "fallback");

        unsafe {
            std::env::set_var("SITESTACK_TEST_SECRET", "real_value");
        }
        let context = TemplateContext::new(); // Reload env
        let result = engine
            .render_string("{{ env.SITESTACK_TEST_SECRET }}", &context)
            .unwrap();
        assert_eq!(result, "real_value");

        unsafe {
            std::env::remove_var("SITESTACK_TEST_SECRET");
        }
    }

    #[test]
    fn test_page_templates_registered() {
        let engine = TemplateEngine::new().unwrap();
        let mut context = Context::new();
        context.insert("app_name", "sitestack");
        context.insert("title", "404 - Page Not Found");
        context.insert("description", &None::<String>);
        context.insert("home_path", "/");

        let html = engine.render_page("not_found.html", &context).unwrap();
        assert!(html.contains("404 - Page Not Found"));
    }
}
