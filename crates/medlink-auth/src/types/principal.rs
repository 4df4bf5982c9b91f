//! Principal domain types.
//!
//! A principal is an account that can authenticate: either a [`Patient`] or a
//! [`Doctor`]. Both kinds share the credential fields (username, email,
//! password hash); doctors additionally carry licensing data with its own
//! uniqueness constraint on the license number.
//!
//! # Password handling
//!
//! The `password_hash` field holds an Argon2 PHC string and is serialized for
//! storage backends. It must never reach an API response: use
//! [`Principal::safe_view`] when building response bodies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// The two principal kinds supported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A patient account.
    Patient,
    /// A doctor account.
    Doctor,
}

impl Role {
    /// Returns the role name as used in request bodies and token claims.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Doctor => "Doctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(Self::Patient),
            "Doctor" => Ok(Self::Doctor),
            _ => Err(()),
        }
    }
}

/// A patient account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique identifier for this patient.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Login username (unique among patients, no whitespace).
    pub username: String,

    /// Email address (unique among patients).
    pub email: String,

    /// Argon2 PHC hash of the password. Stripped from API responses.
    pub password_hash: String,

    /// Avatar URL.
    pub avatar: String,

    /// Administrative active flag.
    pub is_active: bool,

    /// When this account was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Medical license details for a doctor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    /// License number (globally unique among doctors).
    pub number: String,

    /// Issuing state.
    pub state: String,
}

/// A doctor account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Unique identifier for this doctor.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Login username (unique among doctors, no whitespace).
    pub username: String,

    /// Email address (unique among doctors).
    pub email: String,

    /// Argon2 PHC hash of the password. Stripped from API responses.
    pub password_hash: String,

    /// Medical specialization.
    pub specialization: String,

    /// Medical license details.
    pub license: License,

    /// Years of experience.
    pub experience: u32,

    /// Avatar URL.
    pub avatar: String,

    /// Whether the license has been verified by an administrator.
    pub is_verified: bool,

    /// Administrative active flag.
    pub is_active: bool,

    /// When this account was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Default avatar assigned at registration.
pub const DEFAULT_AVATAR: &str = "default_avatar_url";

/// A principal of either kind.
///
/// Tagged with the role name so that storage round trips preserve the kind,
/// and so the login path can stay polymorphic instead of branching on role
/// strings throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum Principal {
    /// A patient account.
    Patient(Patient),
    /// A doctor account.
    Doctor(Doctor),
}

impl Principal {
    /// The principal's unique identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Patient(p) => p.id,
            Self::Doctor(d) => d.id,
        }
    }

    /// The principal's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Patient(p) => &p.name,
            Self::Doctor(d) => &d.name,
        }
    }

    /// The principal's username.
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Patient(p) => &p.username,
            Self::Doctor(d) => &d.username,
        }
    }

    /// The principal's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Patient(p) => &p.email,
            Self::Doctor(d) => &d.email,
        }
    }

    /// The stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        match self {
            Self::Patient(p) => &p.password_hash,
            Self::Doctor(d) => &d.password_hash,
        }
    }

    /// Which kind this principal is.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Patient(_) => Role::Patient,
            Self::Doctor(_) => Role::Doctor,
        }
    }

    /// Serializes this principal with the password hash removed.
    ///
    /// Every API response body carrying a principal must go through this.
    #[must_use]
    pub fn safe_view(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.remove("passwordHash");
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient() -> Patient {
        Patient {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            username: "a1".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Patient, Role::Doctor] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_safe_view_strips_password_hash() {
        let principal = Principal::Patient(sample_patient());
        let view = principal.safe_view();

        assert!(view.get("passwordHash").is_none());
        assert_eq!(view.get("username").unwrap(), "a1");
        assert_eq!(view.get("role").unwrap(), "Patient");
    }

    #[test]
    fn test_principal_serde_preserves_kind() {
        let principal = Principal::Patient(sample_patient());
        let json = serde_json::to_string(&principal).unwrap();
        let back: Principal = serde_json::from_str(&json).unwrap();

        assert_eq!(back.role(), Role::Patient);
        assert_eq!(back.username(), principal.username());
        assert_eq!(back.password_hash(), principal.password_hash());
    }

    #[test]
    fn test_accessors_cover_both_kinds() {
        let doctor = Principal::Doctor(Doctor {
            id: Uuid::new_v4(),
            name: "Dr. B".to_string(),
            username: "drb".to_string(),
            email: "b@x.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            specialization: "Cardiology".to_string(),
            license: License {
                number: "LIC-1".to_string(),
                state: "CA".to_string(),
            },
            experience: 0,
            avatar: DEFAULT_AVATAR.to_string(),
            is_verified: false,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        });

        assert_eq!(doctor.role(), Role::Doctor);
        assert_eq!(doctor.username(), "drb");
        assert_eq!(doctor.email(), "b@x.com");
    }
}
