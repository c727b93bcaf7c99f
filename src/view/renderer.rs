use tera::Context;

use crate::error::Result;
use crate::template::TemplateEngine;

/// Page-level values every view shares
#[derive(Debug, Clone, Copy)]
pub struct PageMeta<'a> {
    pub app_name: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub home_path: &'a str,
}

impl PageMeta<'_> {
    pub fn to_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("app_name", self.app_name);
        context.insert("title", self.title);
        context.insert("description", &self.description);
        context.insert("home_path", self.home_path);
        context
    }
}

/// Trait for HTML views: a registered template plus the values it needs
pub trait ViewRenderer {
    fn template(&self) -> &'static str;

    fn populate(&self, context: &mut Context) -> Result<()>;

    fn render(&self, engine: &TemplateEngine, meta: &PageMeta<'_>) -> Result<String> {
        let mut context = meta.to_context();
        self.populate(&mut context)?;
        engine.render_page(self.template(), &context)
    }
}
