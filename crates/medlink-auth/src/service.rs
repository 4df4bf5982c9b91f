//! Registration, login, and logout orchestration.
//!
//! [`AuthService`] ties the storage traits, the password hasher, and the JWT
//! service together. HTTP concerns (cookies, status codes) live in
//! [`crate::http`]; this module only speaks domain types.

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use crate::storage::{PrincipalStorage, SessionStorage};
use crate::token::JwtService;
use crate::types::principal::DEFAULT_AVATAR;
use crate::types::{Doctor, License, Patient, Principal, Role, Session, TokenUser};
use crate::AuthResult;

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LEN: usize = 8;

/// Patient registration request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatient {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login username.
    #[serde(default)]
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Plaintext password; hashed before anything is persisted.
    #[serde(default)]
    pub password: String,
}

/// Doctor registration request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDoctor {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login username.
    #[serde(default)]
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Plaintext password; hashed before anything is persisted.
    #[serde(default)]
    pub password: String,
    /// Medical specialization.
    #[serde(default)]
    pub specialization: String,
    /// License number (globally unique among doctors).
    #[serde(default)]
    pub license_number: String,
    /// Issuing state of the license.
    #[serde(default)]
    pub license_state: String,
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email or username.
    #[serde(default)]
    pub identifier: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
    /// Role name: "Patient" or "Doctor".
    #[serde(default)]
    pub role: String,
}

/// Request metadata recorded on the session at first login.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    /// Remote IP address.
    pub ip: String,
    /// User-Agent header value.
    pub user_agent: String,
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated principal.
    pub principal: Principal,
    /// The identity to embed in the access token cookie.
    pub token_user: TokenUser,
    /// Freshly minted signed access token.
    pub access_token: String,
    /// The session's refresh token (stable across repeated logins).
    pub refresh_token: String,
}

/// Orchestrates registration, login, and logout.
#[derive(Clone)]
pub struct AuthService {
    principals: Arc<dyn PrincipalStorage>,
    sessions: Arc<dyn SessionStorage>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        principals: Arc<dyn PrincipalStorage>,
        sessions: Arc<dyn SessionStorage>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            principals,
            sessions,
            jwt,
        }
    }

    /// The JWT service used for access tokens.
    #[must_use]
    pub fn jwt(&self) -> &Arc<JwtService> {
        &self.jwt
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a new patient.
    ///
    /// Validates required fields, hashes the password, and persists the
    /// record. The advisory duplicate checks are best-effort; the storage
    /// backend's unique indexes are authoritative, and a `Conflict` from a
    /// lost race is surfaced unchanged.
    ///
    /// # Errors
    ///
    /// `Validation` for missing/malformed fields, `Conflict` for duplicate
    /// email or username.
    pub async fn register_patient(&self, req: RegisterPatient) -> AuthResult<Principal> {
        if req.name.is_empty()
            || req.username.is_empty()
            || req.email.is_empty()
            || req.password.is_empty()
        {
            return Err(AuthError::validation(
                "Please provide name, username, email, and password",
            ));
        }
        validate_username(&req.username)?;
        validate_password(&req.password)?;

        self.check_email_and_username(Role::Patient, &req.email, &req.username)
            .await?;

        // Hash exactly once, here, on the plaintext from the request. The
        // stored record only ever carries the PHC string.
        let password_hash = hash_password(&req.password)
            .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))?;

        let principal = Principal::Patient(Patient {
            id: Uuid::new_v4(),
            name: req.name,
            username: req.username,
            email: req.email,
            password_hash,
            avatar: DEFAULT_AVATAR.to_string(),
            is_active: true,
            created_at: time::OffsetDateTime::now_utc(),
        });

        self.principals.create(&principal).await?;
        tracing::info!(principal_id = %principal.id(), "Patient registered");
        Ok(principal)
    }

    /// Registers a new doctor.
    ///
    /// Same flow as patient registration plus the specialization and license
    /// fields, with a third uniqueness constraint on the license number.
    ///
    /// # Errors
    ///
    /// `Validation` for missing/malformed fields, `Conflict` for duplicate
    /// email, username, or license number.
    pub async fn register_doctor(&self, req: RegisterDoctor) -> AuthResult<Principal> {
        let required = [
            ("name", &req.name),
            ("username", &req.username),
            ("email", &req.email),
            ("password", &req.password),
            ("specialization", &req.specialization),
            ("licenseNumber", &req.license_number),
            ("licenseState", &req.license_state),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(AuthError::validation(format!(
                    "Please provide the required field: {field}"
                )));
            }
        }
        validate_username(&req.username)?;
        validate_password(&req.password)?;

        self.check_email_and_username(Role::Doctor, &req.email, &req.username)
            .await?;
        if self
            .principals
            .find_doctor_by_license(&req.license_number)
            .await?
            .is_some()
        {
            return Err(AuthError::conflict(
                "This license number is already registered",
            ));
        }

        let password_hash = hash_password(&req.password)
            .map_err(|e| AuthError::internal(format!("password hashing failed: {e}")))?;

        let principal = Principal::Doctor(Doctor {
            id: Uuid::new_v4(),
            name: req.name,
            username: req.username,
            email: req.email,
            password_hash,
            specialization: req.specialization,
            license: License {
                number: req.license_number,
                state: req.license_state,
            },
            experience: 0,
            avatar: DEFAULT_AVATAR.to_string(),
            is_verified: false,
            is_active: true,
            created_at: time::OffsetDateTime::now_utc(),
        });

        self.principals.create(&principal).await?;
        tracing::info!(principal_id = %principal.id(), "Doctor registered");
        Ok(principal)
    }

    async fn check_email_and_username(
        &self,
        role: Role,
        email: &str,
        username: &str,
    ) -> AuthResult<()> {
        if self.principals.find_by_email(role, email).await?.is_some() {
            return Err(AuthError::conflict(
                "An account with this email already exists",
            ));
        }
        if self
            .principals
            .find_by_username(role, username)
            .await?
            .is_some()
        {
            return Err(AuthError::conflict("This username is already taken"));
        }
        Ok(())
    }

    // =========================================================================
    // Login (session issuer)
    // =========================================================================

    /// Authenticates a principal and issues its session tokens.
    ///
    /// Finds or creates the principal's session. A session created by a
    /// concurrent login wins the race at the storage layer; the loser retries
    /// as a lookup and reuses the winner's refresh token, so the token stays
    /// stable per principal either way.
    ///
    /// # Errors
    ///
    /// `Validation` if any input is missing or the role is unknown;
    /// `Unauthorized` for unknown identifier, wrong password (identical
    /// message for both), or a disabled session.
    pub async fn login(&self, req: LoginRequest, client: ClientInfo) -> AuthResult<LoginOutcome> {
        if req.identifier.is_empty() || req.password.is_empty() || req.role.is_empty() {
            return Err(AuthError::validation(
                "Please provide email/username, password, and role ('Patient' or 'Doctor')",
            ));
        }
        let role = Role::from_str(&req.role)
            .map_err(|()| AuthError::validation("Invalid role specified."))?;

        let principal = self
            .principals
            .find_by_identifier(role, &req.identifier)
            .await?
            .ok_or_else(AuthError::invalid_credentials)?;

        let matches = verify_password(&req.password, principal.password_hash())
            .map_err(|e| AuthError::internal(format!("stored password hash is malformed: {e}")))?;
        if !matches {
            tracing::debug!(principal_id = %principal.id(), "Password verification failed");
            return Err(AuthError::invalid_credentials());
        }

        let token_user = TokenUser::from(&principal);
        let session = self.find_or_create_session(&principal, role, client).await?;
        if !session.is_valid {
            tracing::warn!(principal_id = %principal.id(), "Login attempt on disabled session");
            return Err(AuthError::unauthorized(
                "Your account is disabled. Please contact support.",
            ));
        }

        let access_token = self.jwt.issue(&token_user)?;
        tracing::info!(principal_id = %principal.id(), role = %role, "Login succeeded");

        Ok(LoginOutcome {
            refresh_token: session.refresh_token,
            principal,
            token_user,
            access_token,
        })
    }

    async fn find_or_create_session(
        &self,
        principal: &Principal,
        role: Role,
        client: ClientInfo,
    ) -> AuthResult<Session> {
        if let Some(existing) = self.sessions.find_by_principal(principal.id()).await? {
            return Ok(existing);
        }

        let session = Session::new(principal.id(), role, client.ip, client.user_agent);
        match self.sessions.create(&session).await {
            Ok(()) => Ok(session),
            Err(AuthError::Conflict { .. }) => {
                // Lost the first-login race; the winner's session is
                // authoritative.
                tracing::debug!(
                    principal_id = %principal.id(),
                    "Concurrent session creation, retrying as lookup"
                );
                self.sessions
                    .find_by_principal(principal.id())
                    .await?
                    .ok_or_else(|| {
                        AuthError::internal("session disappeared after create conflict")
                    })
            }
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    // Logout (session terminator)
    // =========================================================================

    /// Deletes the session for a principal.
    ///
    /// Idempotent: a missing session is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage operation fails.
    pub async fn logout(&self, principal_id: Uuid) -> AuthResult<()> {
        let deleted = self.sessions.delete_by_principal(principal_id).await?;
        tracing::info!(principal_id = %principal_id, deleted, "Logout");
        Ok(())
    }
}

/// Rejects usernames containing any whitespace character.
fn validate_username(username: &str) -> AuthResult<()> {
    if username.chars().any(char::is_whitespace) {
        return Err(AuthError::validation("Username cannot contain spaces"));
    }
    Ok(())
}

/// Enforces the minimum password length.
fn validate_password(password: &str) -> AuthResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::validation(
            "Password must be at least 8 characters",
        ));
    }
    Ok(())
}
