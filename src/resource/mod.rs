//! Remote resources: the record/collection model and the single-shot fetcher.

pub mod fetcher;
pub mod model;

pub use fetcher::{Identifier, ResourceFetcher};
pub use model::{ResourceCollection, ResourceOutcome, ResourceRecord};
