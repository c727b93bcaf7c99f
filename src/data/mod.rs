pub mod http;
pub mod jsonpath;
pub mod provider;

pub use http::HttpProvider;
pub use jsonpath::JsonPathExtractor;
pub use provider::{DataProvider, FetchOutcome, FetchRequest};
