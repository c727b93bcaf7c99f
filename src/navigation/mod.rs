pub mod pattern;
pub mod router;

pub use pattern::PathPattern;
pub use router::{PageRouter, ResolvedRoute, RouteResolver};
