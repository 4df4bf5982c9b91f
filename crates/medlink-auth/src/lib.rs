//! # medlink-auth
//!
//! Authentication and session management for the Medlink platform.
//!
//! This crate provides:
//! - Patient and doctor registration with Argon2id password hashing
//! - Unified login issuing a short-lived access token (JWT, HttpOnly cookie)
//!   and a long-lived opaque refresh token backed by a persisted session
//! - Logout that deletes the session and expires both cookies
//! - A cookie-auth guard for protected routes
//!
//! ## Session model
//!
//! A principal has at most one session. The session holds the refresh token,
//! which stays stable across repeated logins until logout deletes the session
//! or an administrator flips its `is_valid` flag. Storage backends enforce
//! uniqueness with unique indexes; the service retries a lost first-login
//! race as a lookup.
//!
//! ## Modules
//!
//! - [`config`] - Auth configuration (token lifetimes, cookies)
//! - [`error`] - Error taxonomy and `AuthResult`
//! - [`password`] - Argon2id hashing primitives
//! - [`token`] - Access token encoding and validation
//! - [`types`] - Domain types (principals, sessions, token users)
//! - [`storage`] - Storage traits implemented by backend crates
//! - [`service`] - Registration/login/logout orchestration
//! - [`http`] - Axum handlers and router
//! - [`middleware`] - Cookie-auth extractor and error responses

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod password;
pub mod service;
pub mod storage;
pub mod token;
pub mod types;

pub use config::{AuthConfig, ConfigError, CookieConfig, TokenConfig};
pub use error::AuthError;
pub use http::{router, AuthHttpState};
pub use middleware::{AuthGuardState, CookieAuth};
pub use service::{
    AuthService, ClientInfo, LoginOutcome, LoginRequest, RegisterDoctor, RegisterPatient,
};
pub use storage::{PrincipalStorage, SessionStorage};
pub use token::{AccessTokenClaims, JwtService};
pub use types::{Doctor, License, Patient, Principal, Role, Session, TokenUser};

/// Type alias for authentication results.
pub type AuthResult<T> = Result<T, AuthError>;
