//! Storage traits for authentication data.
//!
//! This module defines storage interfaces for:
//!
//! - Principal records (patients and doctors)
//! - Login sessions (one per principal)
//!
//! # Implementations
//!
//! Storage implementations are provided in separate crates:
//!
//! - `medlink-auth-postgres` - PostgreSQL storage backend
//! - `medlink-auth-memory` - in-memory backend for tests and development

pub mod principal;
pub mod session;

pub use principal::PrincipalStorage;
pub use session::SessionStorage;
