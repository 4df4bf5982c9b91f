//! Auth cookie construction.
//!
//! Both cookies are HttpOnly: the access cookie carries the signed JWT with a
//! short max-age, the refresh cookie carries the opaque session token with a
//! max-age matching the session lifetime. Logout overwrites both with
//! already-expired values to force client-side removal.

use cookie::{Cookie, SameSite};
use std::time::Duration;

use crate::config::CookieConfig;

/// Builds the access token cookie.
#[must_use]
pub fn access_cookie(config: &CookieConfig, token: &str, max_age: Duration) -> Cookie<'static> {
    auth_cookie(config.access_cookie_name.clone(), token, config.secure, max_age)
}

/// Builds the refresh token cookie.
#[must_use]
pub fn refresh_cookie(config: &CookieConfig, token: &str, max_age: Duration) -> Cookie<'static> {
    auth_cookie(
        config.refresh_cookie_name.clone(),
        token,
        config.secure,
        max_age,
    )
}

/// Builds the pair of already-expired cookies set on logout.
#[must_use]
pub fn expired_cookies(config: &CookieConfig) -> (Cookie<'static>, Cookie<'static>) {
    (
        auth_cookie(
            config.access_cookie_name.clone(),
            "logout",
            config.secure,
            Duration::ZERO,
        ),
        auth_cookie(
            config.refresh_cookie_name.clone(),
            "logout",
            config.secure,
            Duration::ZERO,
        ),
    )
}

fn auth_cookie(name: String, value: &str, secure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age.as_secs() as i64))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookies_are_http_only() {
        let config = CookieConfig::default();
        let access = access_cookie(&config, "jwt-value", Duration::from_secs(900));
        let refresh = refresh_cookie(&config, "opaque-value", Duration::from_secs(86400));

        for cookie in [&access, &refresh] {
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.secure(), Some(true));
            assert_eq!(cookie.path(), Some("/"));
        }
        assert_eq!(access.name(), "accessToken");
        assert_eq!(refresh.name(), "refreshToken");
    }

    #[test]
    fn test_expired_cookies_have_zero_max_age() {
        let config = CookieConfig::default();
        let (access, refresh) = expired_cookies(&config);

        for cookie in [&access, &refresh] {
            assert_eq!(cookie.max_age(), Some(cookie::time::Duration::ZERO));
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.value(), "logout");
        }
    }

    #[test]
    fn test_max_age_matches_lifetime() {
        let config = CookieConfig::default();
        let cookie = access_cookie(&config, "jwt", Duration::from_secs(900));
        assert_eq!(cookie.max_age(), Some(cookie::time::Duration::seconds(900)));
    }
}
