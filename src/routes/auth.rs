//! Auth proxy routes — login, registration OTP, password reset.
//!
//! Token issuance is the backend's job: these handlers validate the request
//! shape, forward it upstream and relay whatever `Set-Cookie` headers come
//! back. The gateway never mints or renews a session cookie itself — the gate
//! only deletes dead ones.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::http::header::HeaderValue;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::services::api::{ApiError, UpstreamReply};
use crate::state::AppState;

// =============================================================================
// REQUEST SHAPES
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OtpCheck {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailOnly {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

// =============================================================================
// RELAY PLUMBING
// =============================================================================

/// Build an axum response from an upstream reply, forwarding any session
/// cookies the backend set.
pub(crate) fn relay_response(reply: UpstreamReply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = (status, Json(reply.body)).into_response();
    for cookie in reply.set_cookies {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

pub(crate) fn upstream_error(context: &str, e: &ApiError) -> Response {
    tracing::warn!(error = %e, context, "upstream call failed");
    (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
}

async fn forward<T: Serialize>(state: &AppState, path: &str, body: &T) -> Response {
    let body = match serde_json::to_value(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, path, "request body serialization failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    match state.api.post_json(path, &body, None).await {
        Ok(reply) => relay_response(reply),
        Err(e) => upstream_error(path, &e),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login` — forward credentials; the backend answers with the
/// `_gf_` session cookie on success.
pub async fn login(State(state): State<AppState>, Json(body): Json<Credentials>) -> Response {
    forward(&state, "/api/auth/login", &body).await
}

/// `POST /api/auth/register/user` — start investor registration (sends OTP).
pub async fn register_user(State(state): State<AppState>, Json(body): Json<Credentials>) -> Response {
    forward(&state, "/api/auth/register/user", &body).await
}

/// `POST /api/auth/register/franchise` — start brand-owner registration.
pub async fn register_franchise_owner(State(state): State<AppState>, Json(body): Json<Credentials>) -> Response {
    forward(&state, "/api/auth/register/franchise", &body).await
}

/// `POST /api/auth/verify/user` — confirm the registration OTP; issues the
/// session cookie on success.
pub async fn verify_user(State(state): State<AppState>, Json(body): Json<OtpCheck>) -> Response {
    forward(&state, "/api/auth/verify/user", &body).await
}

/// `POST /api/auth/verify/franchise` — brand-owner OTP confirmation.
pub async fn verify_franchise_owner(State(state): State<AppState>, Json(body): Json<OtpCheck>) -> Response {
    forward(&state, "/api/auth/verify/franchise", &body).await
}

/// `POST /api/auth/register/resend-otp`
pub async fn resend_registration_otp(State(state): State<AppState>, Json(body): Json<EmailOnly>) -> Response {
    forward(&state, "/api/auth/register/resend-otp", &body).await
}

/// `POST /api/resetpassword/request-otp`
pub async fn request_reset_otp(State(state): State<AppState>, Json(body): Json<EmailOnly>) -> Response {
    forward(&state, "/api/resetpassword/request-otp", &body).await
}

/// `POST /api/resetpassword/verify-otp`
pub async fn verify_reset_otp(State(state): State<AppState>, Json(body): Json<OtpCheck>) -> Response {
    forward(&state, "/api/resetpassword/verify-otp", &body).await
}

/// `POST /api/resetpassword/resend-otp`
pub async fn resend_reset_otp(State(state): State<AppState>, Json(body): Json<EmailOnly>) -> Response {
    forward(&state, "/api/resetpassword/resend-otp", &body).await
}

/// `POST /api/resetpassword/reset-password`
pub async fn reset_password(State(state): State<AppState>, Json(body): Json<PasswordReset>) -> Response {
    forward(&state, "/api/resetpassword/reset-password", &body).await
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
