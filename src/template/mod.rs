pub mod engine;

pub use engine::{TemplateContext, TemplateEngine};
