//! Login endpoint handler.

use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::service::LoginRequest;
use crate::AuthResult;

use super::cookies::{access_cookie, refresh_cookie};
use super::{client_info, AuthHttpState};

/// `POST /login`
///
/// Verifies credentials, finds or creates the principal's session, and
/// responds with the sanitized principal plus both auth cookies. The refresh
/// cookie's value is the session's stable token; repeated logins set the same
/// value until logout.
pub async fn login_handler(
    State(state): State<AuthHttpState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse> {
    let outcome = state.service.login(req, client_info(&headers)).await?;

    let jar = jar
        .add(access_cookie(
            &state.config.cookie,
            &outcome.access_token,
            state.config.token.access_token_lifetime,
        ))
        .add(refresh_cookie(
            &state.config.cookie,
            &outcome.refresh_token,
            state.config.token.refresh_token_lifetime,
        ));

    Ok((jar, Json(json!({ "user": outcome.principal.safe_view() }))))
}
