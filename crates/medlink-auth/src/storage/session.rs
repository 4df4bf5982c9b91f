//! Session storage trait.
//!
//! Defines the storage interface for login sessions.
//!
//! # Invariants
//!
//! - At most one session per principal, enforced by a unique index on the
//!   principal id. Login's find-or-create is not transactional: two
//!   concurrent first logins may both attempt `create`, and the loser must
//!   receive `AuthError::Conflict` so the caller can retry as a lookup.
//! - Sessions are never updated in place except for the `is_valid` flag,
//!   which is an administrative switch outside the request path.

use async_trait::async_trait;
use uuid::Uuid;

use crate::types::Session;
use crate::AuthResult;

/// Storage trait for login sessions.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Stores a new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Conflict` if a session already exists for the
    /// principal, or `AuthError::Storage` if the operation fails.
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Finds the session for a principal.
    ///
    /// Returns the session regardless of its `is_valid` flag; callers decide
    /// how to treat disabled sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_principal(&self, principal_id: Uuid) -> AuthResult<Option<Session>>;

    /// Deletes the session for a principal.
    ///
    /// # Returns
    ///
    /// `true` if a session was deleted, `false` if none existed. A missing
    /// session is not an error: logout is idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn delete_by_principal(&self, principal_id: Uuid) -> AuthResult<bool>;

    /// Sets the administrative `is_valid` flag on a principal's session.
    ///
    /// The only in-place session mutation permitted. A disabled session
    /// causes the next login attempt to fail; it does not revoke outstanding
    /// access tokens.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if no session exists for the principal,
    /// or `AuthError::Storage` if the operation fails.
    async fn set_valid(&self, principal_id: Uuid, is_valid: bool) -> AuthResult<()>;
}
