//! Password hashing and verification.
//!
//! Argon2id-based hashing for principal passwords.
//!
//! # Security
//!
//! - Hashing uses Argon2id (hybrid mode) with default parameters
//! - Salts are generated using OsRng (cryptographically secure RNG)
//! - Hashes are stored in PHC string format
//!
//! Hashing happens exactly once per plaintext, as an explicit step in the
//! registration path. There is no implicit re-hash hook: a stored PHC string
//! is never fed back through `hash_password`.
//!
//! # Example
//!
//! ```
//! use medlink_auth::password::{hash_password, verify_password};
//!
//! let hash = hash_password("secret123").unwrap();
//! assert!(hash.starts_with("$argon2id$"));
//! assert!(verify_password("secret123", &hash).unwrap());
//! assert!(!verify_password("wrong", &hash).unwrap());
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password for secure storage using Argon2id.
///
/// # Errors
///
/// Returns `argon2::password_hash::Error` if hashing fails (rare).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash.
///
/// # Returns
///
/// `Ok(true)` if the password matches the hash, `Ok(false)` if it doesn't
/// match. Returns `Err` only if the hash format is invalid.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    let result = Argon2::default().verify_password(password.as_bytes(), &parsed_hash);
    Ok(result.is_ok())
}
