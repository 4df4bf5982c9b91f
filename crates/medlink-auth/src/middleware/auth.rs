//! Access token cookie extractor.
//!
//! The auth guard for protected operations: validates the access token
//! cookie's signature and expiry, then attaches the decoded
//! [`TokenUser`] to the handler. The check is stateless; the session store
//! is only consulted at login time, so disabling a session does not cut off
//! a still-valid access token before it expires.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::delete};
//! use medlink_auth::middleware::CookieAuth;
//!
//! async fn protected_handler(CookieAuth(user): CookieAuth) -> String {
//!     format!("Hello, {}!", user.name)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::config::CookieConfig;
use crate::error::AuthError;
use crate::token::JwtService;
use crate::types::TokenUser;

/// State required for cookie authentication.
///
/// Make it available to the [`CookieAuth`] extractor via `FromRef` from your
/// application state.
#[derive(Clone)]
pub struct AuthGuardState {
    /// JWT service for token validation.
    pub jwt: Arc<JwtService>,

    /// Cookie configuration (names the access cookie to read).
    pub cookie_config: CookieConfig,
}

/// Axum extractor that validates the access token cookie.
///
/// This extractor:
/// 1. Reads the access token cookie
/// 2. Decodes and validates the JWT (signature, expiry, issuer)
/// 3. Yields the embedded [`TokenUser`]
///
/// # Errors
///
/// Returns `AuthError` (which implements `IntoResponse` as a 401) if the
/// cookie is missing or the token is invalid or expired. The request is
/// rejected before the protected handler runs.
pub struct CookieAuth(pub TokenUser);

impl<S> FromRequestParts<S> for CookieAuth
where
    S: Send + Sync,
    AuthGuardState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let guard = AuthGuardState::from_ref(state);

        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(&guard.cookie_config.access_cookie_name)
            .ok_or_else(|| AuthError::unauthorized("Authentication required"))?;

        let claims = guard.jwt.decode(cookie.value()).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            e
        })?;

        Ok(Self(claims.token_user()))
    }
}
