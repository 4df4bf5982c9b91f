//! Session domain type.
//!
//! A session records the single active refresh token for a principal. At most
//! one session exists per principal at any time; repeated logins reuse the
//! existing token rather than rotating it, so the refresh token stays stable
//! until logout deletes the session or an administrator disables it.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::types::Role;

/// Number of random bytes in a refresh token (hex-encoded to 80 characters).
pub const REFRESH_TOKEN_BYTES: usize = 40;

/// A persisted login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique identifier for this session record.
    pub id: Uuid,

    /// The owning principal. Unique: one session per principal.
    pub principal_id: Uuid,

    /// Which principal kind this session belongs to.
    pub role: Role,

    /// Opaque random refresh token value.
    pub refresh_token: String,

    /// IP address of the request that created the session.
    pub ip: String,

    /// User agent of the request that created the session.
    pub user_agent: String,

    /// Administrative disable switch. A disabled session rejects the next
    /// login attempt; it does not revoke outstanding access tokens.
    pub is_valid: bool,

    /// When this session was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Session {
    /// Creates a new valid session with a freshly generated refresh token.
    #[must_use]
    pub fn new(
        principal_id: Uuid,
        role: Role,
        ip: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            principal_id,
            role,
            refresh_token: Self::generate_refresh_token(),
            ip: ip.into(),
            user_agent: user_agent.into(),
            is_valid: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Generate a cryptographically secure random refresh token.
    ///
    /// Returns 40 random bytes (320 bits) encoded as hex (80 characters).
    #[must_use]
    pub fn generate_refresh_token() -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes[..]);
        hex::encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_refresh_token_format() {
        let token = Session::generate_refresh_token();

        // 40 bytes hex encoded = 80 characters
        assert_eq!(token.len(), 80);
        assert!(hex::decode(&token).is_ok(), "Token should be valid hex");
    }

    #[test]
    fn test_generate_refresh_token_uniqueness() {
        let tokens: Vec<String> = (0..100)
            .map(|_| Session::generate_refresh_token())
            .collect();

        let mut unique = tokens.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(tokens.len(), unique.len());
    }

    #[test]
    fn test_new_session_is_valid() {
        let session = Session::new(Uuid::new_v4(), Role::Patient, "127.0.0.1", "test-agent");

        assert!(session.is_valid);
        assert_eq!(session.role, Role::Patient);
        assert_eq!(session.refresh_token.len(), 80);
    }

    #[test]
    fn test_serialization_round_trip() {
        let session = Session::new(Uuid::new_v4(), Role::Doctor, "10.0.0.1", "curl/8.0");

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(back.principal_id, session.principal_id);
        assert_eq!(back.refresh_token, session.refresh_token);
        assert_eq!(back.role, Role::Doctor);

        // Wire format is camelCase
        assert!(json.contains("\"refreshToken\""));
        assert!(json.contains("\"isValid\""));
    }
}
