//! In-memory storage backend for medlink-auth.
//!
//! Backs the storage traits with `RwLock`-guarded maps. Used by the test
//! suite and by the server when no database is configured. The uniqueness
//! guarantees match the PostgreSQL backend's unique indexes: duplicate
//! email/username/license keys and duplicate sessions per principal are
//! rejected with `AuthError::Conflict` while holding the write lock, so
//! racing writers resolve the same way they would against the database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use medlink_auth::storage::{PrincipalStorage, SessionStorage};
use medlink_auth::types::{Principal, Role, Session};
use medlink_auth::{AuthError, AuthResult};

/// In-memory principal store.
#[derive(Default)]
pub struct InMemoryPrincipalStorage {
    principals: RwLock<HashMap<Uuid, Principal>>,
}

impl InMemoryPrincipalStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrincipalStorage for InMemoryPrincipalStorage {
    async fn create(&self, principal: &Principal) -> AuthResult<()> {
        let mut principals = self.principals.write().await;

        // Same keys the SQL backend indexes; checked under the write lock so
        // concurrent registrations serialize here.
        for existing in principals.values() {
            if existing.role() == principal.role() {
                if existing.email() == principal.email() {
                    return Err(AuthError::conflict(
                        "An account with this email already exists",
                    ));
                }
                if existing.username() == principal.username() {
                    return Err(AuthError::conflict("This username is already taken"));
                }
            }
            if let (Principal::Doctor(a), Principal::Doctor(b)) = (existing, principal) {
                if a.license.number == b.license.number {
                    return Err(AuthError::conflict(
                        "This license number is already registered",
                    ));
                }
            }
        }

        principals.insert(principal.id(), principal.clone());
        Ok(())
    }

    async fn find_by_identifier(
        &self,
        role: Role,
        identifier: &str,
    ) -> AuthResult<Option<Principal>> {
        let principals = self.principals.read().await;
        Ok(principals
            .values()
            .find(|p| {
                p.role() == role && (p.email() == identifier || p.username() == identifier)
            })
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<Principal>> {
        Ok(self.principals.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, role: Role, email: &str) -> AuthResult<Option<Principal>> {
        let principals = self.principals.read().await;
        Ok(principals
            .values()
            .find(|p| p.role() == role && p.email() == email)
            .cloned())
    }

    async fn find_by_username(&self, role: Role, username: &str) -> AuthResult<Option<Principal>> {
        let principals = self.principals.read().await;
        Ok(principals
            .values()
            .find(|p| p.role() == role && p.username() == username)
            .cloned())
    }

    async fn find_doctor_by_license(&self, license_number: &str) -> AuthResult<Option<Principal>> {
        let principals = self.principals.read().await;
        Ok(principals
            .values()
            .find(|p| matches!(p, Principal::Doctor(d) if d.license.number == license_number))
            .cloned())
    }
}

/// In-memory session store, keyed by principal id.
///
/// The key choice itself enforces the one-session-per-principal invariant;
/// `create` still reports a `Conflict` for an occupied slot instead of
/// silently replacing it, mirroring the unique-index behavior.
#[derive(Default)]
pub struct InMemorySessionStorage {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.principal_id) {
            return Err(AuthError::conflict(
                "A session already exists for this principal",
            ));
        }
        sessions.insert(session.principal_id, session.clone());
        Ok(())
    }

    async fn find_by_principal(&self, principal_id: Uuid) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().await.get(&principal_id).cloned())
    }

    async fn delete_by_principal(&self, principal_id: Uuid) -> AuthResult<bool> {
        Ok(self.sessions.write().await.remove(&principal_id).is_some())
    }

    async fn set_valid(&self, principal_id: Uuid, is_valid: bool) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&principal_id) {
            Some(session) => {
                session.is_valid = is_valid;
                Ok(())
            }
            None => Err(AuthError::not_found("no session for principal")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medlink_auth::types::principal::DEFAULT_AVATAR;
    use medlink_auth::types::{Doctor, License, Patient};
    use time::OffsetDateTime;

    fn patient(username: &str, email: &str) -> Principal {
        Principal::Patient(Patient {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    fn doctor(username: &str, email: &str, license: &str) -> Principal {
        Principal::Doctor(Doctor {
            id: Uuid::new_v4(),
            name: "Dr. Test".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            specialization: "Cardiology".to_string(),
            license: License {
                number: license.to_string(),
                state: "CA".to_string(),
            },
            experience: 0,
            avatar: DEFAULT_AVATAR.to_string(),
            is_verified: false,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryPrincipalStorage::new();
        store.create(&patient("a1", "a@x.com")).await.unwrap();

        let err = store.create(&patient("a2", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_same_email_different_role_allowed() {
        let store = InMemoryPrincipalStorage::new();
        store.create(&patient("a1", "a@x.com")).await.unwrap();
        store.create(&doctor("drb", "a@x.com", "LIC-1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_license_conflicts() {
        let store = InMemoryPrincipalStorage::new();
        store.create(&doctor("drb", "b@x.com", "LIC-1")).await.unwrap();

        let err = store
            .create(&doctor("drc", "c@x.com", "LIC-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_find_by_identifier_matches_email_or_username() {
        let store = InMemoryPrincipalStorage::new();
        store.create(&patient("a1", "a@x.com")).await.unwrap();

        assert!(store
            .find_by_identifier(Role::Patient, "a1")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_identifier(Role::Patient, "a@x.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_identifier(Role::Doctor, "a1")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_identifier(Role::Patient, "nobody")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_second_session_for_principal_conflicts() {
        let store = InMemorySessionStorage::new();
        let principal_id = Uuid::new_v4();

        let first = Session::new(principal_id, Role::Patient, "127.0.0.1", "agent");
        store.create(&first).await.unwrap();

        let second = Session::new(principal_id, Role::Patient, "127.0.0.1", "agent");
        let err = store.create(&second).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict { .. }));

        // The winner's token survives
        let stored = store.find_by_principal(principal_id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token, first.refresh_token);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemorySessionStorage::new();
        let principal_id = Uuid::new_v4();
        let session = Session::new(principal_id, Role::Patient, "127.0.0.1", "agent");
        store.create(&session).await.unwrap();

        assert!(store.delete_by_principal(principal_id).await.unwrap());
        assert!(!store.delete_by_principal(principal_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_valid_flips_flag() {
        let store = InMemorySessionStorage::new();
        let principal_id = Uuid::new_v4();
        store
            .create(&Session::new(principal_id, Role::Doctor, "10.0.0.1", "agent"))
            .await
            .unwrap();

        store.set_valid(principal_id, false).await.unwrap();
        let session = store.find_by_principal(principal_id).await.unwrap().unwrap();
        assert!(!session.is_valid);

        let err = store.set_valid(Uuid::new_v4(), false).await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound { .. }));
    }
}
