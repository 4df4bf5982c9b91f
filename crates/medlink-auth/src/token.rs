//! Access token encoding and validation.
//!
//! Short-lived HS256-signed JWTs carrying the [`TokenUser`] identity. The
//! refresh token is deliberately not a JWT: it is an opaque random value whose
//! meaning lives entirely in the session store (see
//! [`crate::types::Session`]).

use std::time::Duration;

use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AuthError;
use crate::types::{Role, TokenUser};
use crate::AuthResult;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// Issuer (the server URL).
    pub iss: String,

    /// Subject (the principal's id).
    pub sub: Uuid,

    /// Principal display name.
    pub name: String,

    /// Principal kind.
    pub role: Role,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// JWT ID.
    pub jti: String,
}

impl AccessTokenClaims {
    /// Builds claims for a token user with the given lifetime.
    #[must_use]
    pub fn new(user: &TokenUser, issuer: impl Into<String>, lifetime: Duration) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            iss: issuer.into(),
            sub: user.id,
            name: user.name.clone(),
            role: user.role,
            exp: now + lifetime.as_secs() as i64,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// The token user these claims describe.
    #[must_use]
    pub fn token_user(&self) -> TokenUser {
        TokenUser {
            id: self.sub,
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Service for encoding and decoding access tokens.
///
/// Thread-safe (`Send + Sync`); share it behind an `Arc`.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_token_lifetime: Duration,
}

impl JwtService {
    /// Creates a new JWT service from an HMAC secret.
    #[must_use]
    pub fn new(secret: &[u8], issuer: impl Into<String>, access_token_lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            access_token_lifetime,
        }
    }

    /// Issues a signed access token for the given token user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if encoding fails.
    pub fn issue(&self, user: &TokenUser) -> AuthResult<String> {
        let claims = AccessTokenClaims::new(user, &self.issuer, self.access_token_lifetime);
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("failed to encode access token: {e}")))
    }

    /// Decodes and validates an access token, returning its claims.
    ///
    /// Validates the signature, the expiry, and the issuer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenExpired` for expired tokens and
    /// `AuthError::InvalidToken` for anything else wrong with the token.
    pub fn decode(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;

        match decode::<AccessTokenClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                Err(AuthError::TokenExpired)
            }
            Err(e) => Err(AuthError::invalid_token(e.to_string())),
        }
    }

    /// The configured access token lifetime.
    #[must_use]
    pub fn access_token_lifetime(&self) -> Duration {
        self.access_token_lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn service() -> JwtService {
        JwtService::new(SECRET, "http://localhost:3000", Duration::from_secs(900))
    }

    fn sample_user() -> TokenUser {
        TokenUser {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            role: Role::Patient,
        }
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let service = service();
        let user = sample_user();

        let token = service.issue(&user).unwrap();
        let claims = service.decode(&token).unwrap();

        assert_eq!(claims.token_user(), user);
        assert_eq!(claims.iss, "http://localhost:3000");
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();
        let user = sample_user();

        // Hand-craft claims that expired well past the default leeway.
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = AccessTokenClaims {
            iss: "http://localhost:3000".to_string(),
            sub: user.id,
            name: user.name.clone(),
            role: user.role,
            exp: now - 600,
            iat: now - 1500,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap();

        let err = service.decode(&token).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = service();
        let token = service.issue(&sample_user()).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        let err = service.decode(&tampered).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken { .. }));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(&sample_user()).unwrap();
        let other = JwtService::new(
            b"another-secret-another-secret-32",
            "http://localhost:3000",
            Duration::from_secs(900),
        );

        assert!(other.decode(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let token = service().issue(&sample_user()).unwrap();
        let other = JwtService::new(SECRET, "http://evil.example.com", Duration::from_secs(900));

        assert!(other.decode(&token).is_err());
    }
}
