pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{ConfigLoader, DEFAULT_CONFIG};
pub use schema::*;
pub use validator::ConfigValidator;
