//! Authentication and role gating
//!
//! JWT token service, axum middleware and the [`CurrentUser`] extractor.

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_roles};
