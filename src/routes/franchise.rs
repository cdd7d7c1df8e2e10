//! Franchise proxy routes — listing create, detail, search, owner dashboard.
//!
//! The backend authenticates these calls itself via the `_gf_` cookie, so
//! handlers forward the caller's session cookie upstream. The multipart
//! create form is the one place the gateway inspects payloads: the listing
//! image rules are enforced here before any bytes leave the process.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::auth::{relay_response, upstream_error};
use crate::services::api::{ApiError, ImageUpload, ListingForm, SearchQuery};
use crate::state::AppState;
use crate::token::SESSION_COOKIE;

/// Cookie header value forwarded upstream, if the caller has a session.
fn session_cookie(jar: &CookieJar) -> Option<String> {
    let value = jar.get(SESSION_COOKIE).map(Cookie::value)?;
    if value.is_empty() {
        return None;
    }
    Some(format!("{SESSION_COOKIE}={value}"))
}

fn status_response(e: ApiError) -> Response {
    match e {
        ApiError::Status { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, body).into_response()
        }
        other => upstream_error("franchise", &other),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/franchise/create` — multipart listing form, up to 3 images.
pub async fn create(State(state): State<AppState>, jar: CookieJar, multipart: Multipart) -> Response {
    let Some(cookie) = session_cookie(&jar) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let listing = match read_listing(multipart).await {
        Ok(listing) => listing,
        Err(response) => return response,
    };

    match state.api.create_franchise(listing, &cookie).await {
        Ok(reply) => relay_response(reply),
        Err(ApiError::ImageRules(e)) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e) => upstream_error("/api/franchise/create", &e),
    }
}

/// `GET /api/franchise/search-franchise` — free-text query, state filter,
/// investment ceiling, pagination.
pub async fn search(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<SearchQuery>,
) -> Response {
    let cookie = session_cookie(&jar);
    match state.api.search_franchises(&query, cookie.as_deref()).await {
        Ok(page) => Json(page).into_response(),
        Err(e) => status_response(e),
    }
}

/// `GET /api/franchise/has-listing` — owner probe used before the create form.
pub async fn has_listing(State(state): State<AppState>, jar: CookieJar) -> Response {
    let cookie = session_cookie(&jar);
    match state.api.get_json("/api/franchise/has-listing", cookie.as_deref()).await {
        Ok(reply) => relay_response(reply),
        Err(e) => upstream_error("/api/franchise/has-listing", &e),
    }
}

/// `GET /api/franchise/dashboard` — aggregate view metrics for the owner.
pub async fn dashboard(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(cookie) = session_cookie(&jar) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    match state.api.dashboard_summary(&cookie).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => status_response(e),
    }
}

/// `GET /api/franchise/{id}` — listing detail.
pub async fn detail(State(state): State<AppState>, jar: CookieJar, Path(id): Path<String>) -> Response {
    let cookie = session_cookie(&jar);
    match state.api.get_json(&format!("/api/franchise/{id}"), cookie.as_deref()).await {
        Ok(reply) => relay_response(reply),
        Err(e) => upstream_error("/api/franchise/{id}", &e),
    }
}

// =============================================================================
// MULTIPART EXTRACTION
// =============================================================================

/// Drain the multipart form into listing fields and image uploads. The web
/// form historically appended every file under both `Images` and a lowercase
/// `images` key; only the `Images` key the backend reads is kept, the
/// duplicates are drained and dropped.
async fn read_listing(mut multipart: Multipart) -> Result<ListingForm, Response> {
    let mut listing = ListingForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err((StatusCode::BAD_REQUEST, e.to_string()).into_response()),
        };

        let name = field.name().unwrap_or_default().to_owned();
        if name == "images" {
            if field.bytes().await.is_err() {
                return Err(StatusCode::BAD_REQUEST.into_response());
            }
        } else if name == "Images" {
            let file_name = field.file_name().unwrap_or("upload").to_owned();
            let content_type = field.content_type().unwrap_or_default().to_owned();
            let bytes = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => return Err((StatusCode::BAD_REQUEST, e.to_string()).into_response()),
            };
            listing.images.push(ImageUpload { file_name, content_type, bytes: bytes.to_vec() });
        } else {
            let value = match field.text().await {
                Ok(value) => value,
                Err(e) => return Err((StatusCode::BAD_REQUEST, e.to_string()).into_response()),
            };
            listing.fields.push((name, value));
        }
    }

    Ok(listing)
}

#[cfg(test)]
#[path = "franchise_test.rs"]
mod tests;
