//! Axum HTTP handlers for the auth endpoints.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | POST | `/register/patient` | [`register::register_patient_handler`] |
//! | POST | `/register/doctor` | [`register::register_doctor_handler`] |
//! | POST | `/login` | [`login::login_handler`] |
//! | DELETE | `/logout` | [`logout::logout_handler`] |
//!
//! Mount the router under your API prefix (the server uses
//! `/api/v1/auth`).

pub mod cookies;
pub mod login;
pub mod logout;
pub mod register;

use std::sync::Arc;

use axum::extract::FromRef;
use axum::http::{header, HeaderMap};
use axum::routing::{delete, post};
use axum::Router;

use crate::config::AuthConfig;
use crate::middleware::AuthGuardState;
use crate::service::{AuthService, ClientInfo};

/// State shared by all auth handlers.
#[derive(Clone)]
pub struct AuthHttpState {
    /// The auth service.
    pub service: AuthService,

    /// Auth configuration (token lifetimes, cookie settings).
    pub config: AuthConfig,
}

impl FromRef<AuthHttpState> for AuthGuardState {
    fn from_ref(state: &AuthHttpState) -> Self {
        Self {
            jwt: Arc::clone(state.service.jwt()),
            cookie_config: state.config.cookie.clone(),
        }
    }
}

/// Builds the auth router.
pub fn router(state: AuthHttpState) -> Router {
    Router::new()
        .route("/register/patient", post(register::register_patient_handler))
        .route("/register/doctor", post(register::register_doctor_handler))
        .route("/login", post(login::login_handler))
        .route("/logout", delete(logout::logout_handler))
        .with_state(state)
}

/// Extracts the client IP and user agent recorded on new sessions.
///
/// Prefers `X-Forwarded-For` (first hop), then `X-Real-IP`. The server sits
/// behind a proxy in deployment, so the socket address is not consulted.
#[must_use]
pub fn client_info(headers: &HeaderMap) -> ClientInfo {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
        })
        .unwrap_or("unknown")
        .to_string();

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    ClientInfo { ip, user_agent }
}
