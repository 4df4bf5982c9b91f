//! Principal storage trait.
//!
//! Defines the interface for persisting patient and doctor records.
//!
//! # Uniqueness
//!
//! The service layer performs advisory pre-checks for duplicate emails,
//! usernames, and license numbers, but the authoritative guarantee is the
//! backend's unique index enforcement: concurrent registrations race, and the
//! backend must reject the loser with `AuthError::Conflict`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{Principal, Role};
use crate::AuthResult;

/// Storage trait for principal records.
///
/// Uniqueness scope: email and username are unique per role; a doctor's
/// license number is unique among doctors.
#[async_trait]
pub trait PrincipalStorage: Send + Sync {
    /// Persists a new principal.
    ///
    /// The password hash must already be populated; storage never sees
    /// plaintext passwords.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Conflict` if a unique key (email, username, or
    /// doctor license number) already exists, or `AuthError::Storage` if the
    /// operation fails.
    async fn create(&self, principal: &Principal) -> AuthResult<()>;

    /// Finds a principal of the given role whose email OR username matches
    /// `identifier`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_identifier(&self, role: Role, identifier: &str)
        -> AuthResult<Option<Principal>>;

    /// Finds a principal by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Principal>>;

    /// Finds a principal of the given role by exact email match.
    ///
    /// Used as an advisory pre-check during registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_email(&self, role: Role, email: &str) -> AuthResult<Option<Principal>>;

    /// Finds a principal of the given role by exact username match.
    ///
    /// Used as an advisory pre-check during registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_username(&self, role: Role, username: &str) -> AuthResult<Option<Principal>>;

    /// Finds a doctor by license number.
    ///
    /// Used as an advisory pre-check during doctor registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_doctor_by_license(&self, license_number: &str) -> AuthResult<Option<Principal>>;
}
