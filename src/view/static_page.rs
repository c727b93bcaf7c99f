use tera::Context;

use super::renderer::ViewRenderer;
use crate::error::{Result, SiteStackError};

/// Built-in templates a `static` page may name
pub const STATIC_TEMPLATES: &[&str] = &["home", "contact"];

/// Fixed content page; an optional fetched payload only contributes its size
pub struct StaticView {
    template: &'static str,
    item_count: Option<usize>,
}

impl StaticView {
    pub fn new(name: &str, item_count: Option<usize>) -> Result<Self> {
        let template = match name {
            "home" => "home.html",
            "contact" => "contact.html",
            other => {
                return Err(SiteStackError::Template(format!(
                    "Unknown static template: {}",
                    other
                )));
            }
        };

        Ok(Self {
            template,
            item_count,
        })
    }
}

impl ViewRenderer for StaticView {
    fn template(&self) -> &'static str {
        self.template
    }

    fn populate(&self, context: &mut Context) -> Result<()> {
        context.insert("item_count", &self.item_count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateEngine;
    use crate::view::renderer::PageMeta;

    fn meta(title: &str) -> PageMeta<'_> {
        PageMeta {
            app_name: "sitestack",
            title,
            description: Some("This is the contact page of my app."),
            home_path: "/",
        }
    }

    #[test]
    fn test_every_static_template_renders() {
        let engine = TemplateEngine::new().unwrap();
        for name in STATIC_TEMPLATES {
            let view = StaticView::new(name, None).unwrap();
            assert!(view.render(&engine, &meta("Page")).is_ok(), "{} failed", name);
        }
    }

    #[test]
    fn test_contact_shows_item_count() {
        let engine = TemplateEngine::new().unwrap();
        let html = StaticView::new("contact", Some(100))
            .unwrap()
            .render(&engine, &meta("Contact Page"))
            .unwrap();

        assert!(html.contains("<h1>Contact Page</h1>"));
        assert!(html.contains("100 posts on record."));
    }

    #[test]
    fn test_home_content() {
        let engine = TemplateEngine::new().unwrap();
        let html = StaticView::new("home", None)
            .unwrap()
            .render(&engine, &meta("Home"))
            .unwrap();

        assert!(html.contains("I want to travel around the world on my own"));
        assert!(html.contains(r#"alt="mountain image""#));
    }

    #[test]
    fn test_unknown_template() {
        assert!(StaticView::new("about", None).is_err());
    }
}
