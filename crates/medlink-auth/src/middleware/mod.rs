//! HTTP middleware for authentication.
//!
//! - [`CookieAuth`] - extractor that validates the access token cookie and
//!   resolves the calling [`TokenUser`](crate::types::TokenUser)
//! - `IntoResponse for AuthError` - centralized error translation to HTTP
//!   status codes and `{"msg"}` JSON bodies

pub mod auth;
pub mod error;

pub use auth::{AuthGuardState, CookieAuth};
