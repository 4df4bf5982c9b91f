//! Logout endpoint handler.

use axum::{extract::State, response::IntoResponse, Json};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::middleware::CookieAuth;
use crate::AuthResult;

use super::cookies::expired_cookies;
use super::AuthHttpState;

/// `DELETE /logout`
///
/// Requires a valid access token cookie (the guard rejects the request with
/// 401 otherwise). Deletes the caller's session and overwrites both cookies
/// with already-expired values. Succeeds whether or not a session existed.
pub async fn logout_handler(
    State(state): State<AuthHttpState>,
    CookieAuth(user): CookieAuth,
    jar: CookieJar,
) -> AuthResult<impl IntoResponse> {
    state.service.logout(user.id).await?;

    let (access, refresh) = expired_cookies(&state.config.cookie);
    let jar = jar.add(access).add(refresh);

    Ok((jar, Json(json!({ "msg": "User logged out successfully!" }))))
}
