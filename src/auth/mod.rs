//! Authentication seam: a provider capability plus the pass-through session
//! middleware. The identity protocol stays with the provider implementation.

pub mod middleware;
pub mod provider;
pub mod session;

pub use middleware::{SessionLayerState, extract_token, resolve_session};
pub use provider::{AuthProvider, StaticTokenProvider};
pub use session::{Session, SessionToken, SessionUser};
