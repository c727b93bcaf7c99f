use tera::Context;

use super::renderer::{PageMeta, ViewRenderer};
use crate::error::Result;
use crate::template::TemplateEngine;

/// Standardized fallback page with a single link back home
pub struct NotFoundView;

impl NotFoundView {
    pub fn render_page(engine: &TemplateEngine, app_name: &str, home_path: &str) -> Result<String> {
        let meta = PageMeta {
            app_name,
            title: "404 - Page Not Found",
            description: None,
            home_path,
        };
        NotFoundView.render(engine, &meta)
    }
}

impl ViewRenderer for NotFoundView {
    fn template(&self) -> &'static str {
        "not_found.html"
    }

    fn populate(&self, _context: &mut Context) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_link_home() {
        let html =
            NotFoundView::render_page(&TemplateEngine::new().unwrap(), "sitestack", "/").unwrap();

        assert!(html.contains("404 - Page Not Found"));
        assert!(html.contains("Oops! The page you are looking for does not exist."));
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains(r#"<a href="/""#));
    }
}
