//! Authentication error types.
//!
//! This module defines all error types that can occur during registration,
//! login, logout, and token validation.

/// Errors that can occur during authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required input is missing or malformed.
    #[error("{message}")]
    Validation {
        /// Description of what is missing or malformed.
        message: String,
    },

    /// A uniqueness constraint was violated (email, username, license number).
    #[error("{message}")]
    Conflict {
        /// Description of the conflicting field.
        message: String,
    },

    /// The request lacks valid authentication credentials.
    ///
    /// Covers bad credentials, disabled accounts, and missing tokens. The
    /// message for credential failures is identical regardless of which
    /// factor was wrong.
    #[error("{message}")]
    Unauthorized {
        /// Description of why the request is unauthorized.
        message: String,
    },

    /// The access token is invalid, malformed, or has a bad signature.
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Description of why the token is invalid.
        message: String,
    },

    /// The access token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The requested route or resource does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was not found.
        message: String,
    },

    /// An error occurred while storing or retrieving auth data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The auth configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidToken` error.
    #[must_use]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The credential-failure error shared by unknown-identifier and
    /// wrong-password cases, so the two are indistinguishable to callers.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::unauthorized("Invalid credentials")
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::Conflict { .. }
                | Self::Unauthorized { .. }
                | Self::InvalidToken { .. }
                | Self::TokenExpired
                | Self::NotFound { .. }
        )
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_stable() {
        let err = AuthError::invalid_credentials();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(AuthError::validation("missing name").is_client_error());
        assert!(AuthError::conflict("duplicate email").is_client_error());
        assert!(AuthError::TokenExpired.is_client_error());
        assert!(AuthError::storage("connection lost").is_server_error());
        assert!(AuthError::internal("oops").is_server_error());
    }
}
