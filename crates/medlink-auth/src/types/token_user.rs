//! Ephemeral token payload type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Principal, Role};

/// The minimal identity embedded in an access token.
///
/// Resolved by the auth guard from the token alone, without a store round
/// trip. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    /// The principal's unique identifier.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// The principal's kind.
    pub role: Role,
}

impl From<&Principal> for TokenUser {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id(),
            name: principal.name().to_string(),
            role: principal.role(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::principal::{Patient, DEFAULT_AVATAR};
    use time::OffsetDateTime;

    #[test]
    fn test_from_principal() {
        let principal = Principal::Patient(Patient {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            username: "a1".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        });

        let token_user = TokenUser::from(&principal);
        assert_eq!(token_user.id, principal.id());
        assert_eq!(token_user.name, "A");
        assert_eq!(token_user.role, Role::Patient);
    }
}
