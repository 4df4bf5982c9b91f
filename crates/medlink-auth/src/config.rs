//! Authentication configuration.
//!
//! Configuration for token signing, token lifetimes, and the auth cookies.
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth]
//! issuer = "https://api.medlink.example.com"
//!
//! [auth.token]
//! secret = "change-me"
//! access_token_lifetime = "15m"
//! refresh_token_lifetime = "30d"
//!
//! [auth.cookie]
//! secure = true
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Server issuer URL (used in the token `iss` claim).
    pub issuer: String,

    /// Token signing and lifetime configuration.
    pub token: TokenConfig,

    /// Cookie configuration for browser-based auth.
    pub cookie: CookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "http://localhost:3000".to_string(),
            token: TokenConfig::default(),
            cookie: CookieConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuer.is_empty() {
            return Err(ConfigError::InvalidValue(
                "issuer must not be empty".to_string(),
            ));
        }
        if self.token.secret.len() < 32 {
            return Err(ConfigError::InvalidValue(
                "token signing secret must be at least 32 bytes".to_string(),
            ));
        }
        if self.token.access_token_lifetime >= self.token.refresh_token_lifetime {
            return Err(ConfigError::InvalidValue(
                "access token lifetime must be shorter than refresh token lifetime".to_string(),
            ));
        }
        Ok(())
    }
}

/// Token signing and lifetime configuration.
///
/// The access token is short-lived because the auth guard validates it
/// statelessly: a disabled session is only re-checked at the next login,
/// so the access lifetime bounds the exposure window.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// HMAC secret for access token signing.
    ///
    /// Overridable via the `MEDLINK_JWT_SECRET` environment variable; the
    /// default exists for local development only.
    pub secret: String,

    /// Access token lifetime.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Refresh token lifetime. Matches the refresh cookie max-age.
    #[serde(with = "humantime_serde")]
    pub refresh_token_lifetime: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "medlink-dev-secret-do-not-use-in-production".to_string(),
            access_token_lifetime: Duration::from_secs(15 * 60), // 15 minutes
            refresh_token_lifetime: Duration::from_secs(30 * 24 * 3600), // 30 days
        }
    }
}

/// Cookie configuration for the access and refresh cookies.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Name of the access token cookie.
    pub access_cookie_name: String,

    /// Name of the refresh token cookie.
    pub refresh_cookie_name: String,

    /// Set the `Secure` attribute (HTTPS only).
    /// Disable for local development over plain HTTP.
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "accessToken".to_string(),
            refresh_cookie_name: "refreshToken".to_string(),
            secure: true,
        }
    }
}

/// Errors that can occur while validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration value is invalid.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_issuer_fails_validation() {
        let mut config = AuthConfig::default();
        config.issuer = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("issuer"));
    }

    #[test]
    fn test_short_secret_fails_validation() {
        let mut config = AuthConfig::default();
        config.token.secret = "short".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("secret"));
    }

    #[test]
    fn test_access_lifetime_must_be_shorter() {
        let mut config = AuthConfig::default();
        config.token.access_token_lifetime = config.token.refresh_token_lifetime;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cookie_names_match_api_contract() {
        let config = CookieConfig::default();
        assert_eq!(config.access_cookie_name, "accessToken");
        assert_eq!(config.refresh_cookie_name, "refreshToken");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml = r#"
            issuer = "https://medlink.example.com"

            [token]
            secret = "0123456789abcdef0123456789abcdef"
            access_token_lifetime = "5m"
            refresh_token_lifetime = "7d"

            [cookie]
            secure = false
        "#;
        let config: AuthConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.issuer, "https://medlink.example.com");
        assert_eq!(
            config.token.access_token_lifetime,
            Duration::from_secs(300)
        );
        assert_eq!(
            config.token.refresh_token_lifetime,
            Duration::from_secs(7 * 24 * 3600)
        );
        assert!(!config.cookie.secure);
        assert!(config.validate().is_ok());
    }
}
