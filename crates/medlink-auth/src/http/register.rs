//! Registration endpoint handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::service::{RegisterDoctor, RegisterPatient};
use crate::AuthResult;

use super::AuthHttpState;

/// `POST /register/patient`
///
/// Registers a new patient and returns the sanitized record with 201.
pub async fn register_patient_handler(
    State(state): State<AuthHttpState>,
    Json(req): Json<RegisterPatient>,
) -> AuthResult<impl IntoResponse> {
    let principal = state.service.register_patient(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "msg": "Patient registered successfully. Please log in.",
            "user": principal.safe_view(),
        })),
    ))
}

/// `POST /register/doctor`
///
/// Registers a new doctor and returns the sanitized record with 201.
pub async fn register_doctor_handler(
    State(state): State<AuthHttpState>,
    Json(req): Json<RegisterDoctor>,
) -> AuthResult<impl IntoResponse> {
    let principal = state.service.register_doctor(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "msg": "Doctor registered successfully. You may now log in.",
            "user": principal.safe_view(),
        })),
    ))
}
