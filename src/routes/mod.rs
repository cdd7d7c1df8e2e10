//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway exposes three surfaces under one axum router: the backend API
//! proxy under `/api`, a health probe, and the static site (landing, auth and
//! dashboard shells) as the fallback service. The access gate is layered over
//! the whole router and decides forward-or-redirect before anything else
//! runs; exempt paths (`/api`, assets, health) short-circuit inside it.

pub mod auth;
pub mod franchise;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::gate;
use crate::state::AppState;

/// Listing create carries up to 3 images at 5 MiB each plus form fields; the
/// default 2 MiB body cap would reject legitimate uploads.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[must_use]
pub fn app(state: AppState, site_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let site = ServeDir::new(PathBuf::from(site_dir)).append_index_html_on_directories(true);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register/user", post(auth::register_user))
        .route("/api/auth/register/franchise", post(auth::register_franchise_owner))
        .route("/api/auth/verify/user", post(auth::verify_user))
        .route("/api/auth/verify/franchise", post(auth::verify_franchise_owner))
        .route("/api/auth/register/resend-otp", post(auth::resend_registration_otp))
        .route("/api/resetpassword/request-otp", post(auth::request_reset_otp))
        .route("/api/resetpassword/verify-otp", post(auth::verify_reset_otp))
        .route("/api/resetpassword/resend-otp", post(auth::resend_reset_otp))
        .route("/api/resetpassword/reset-password", post(auth::reset_password))
        .route(
            "/api/franchise/create",
            post(franchise::create).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/franchise/search-franchise", get(franchise::search))
        .route("/api/franchise/has-listing", get(franchise::has_listing))
        .route("/api/franchise/dashboard", get(franchise::dashboard))
        .route("/api/franchise/{id}", get(franchise::detail))
        .route("/healthz", get(healthz))
        .fallback_service(site)
        .layer(middleware::from_fn_with_state(state.clone(), gate::gate))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
