//! Remote marketplace API client.
//!
//! Thin HTTP forwarding layer over the backend that owns users, OTP flows,
//! franchise records and search. Two call styles:
//! - raw relays (`post_json`/`get_json`) that hand back upstream status,
//!   body and `Set-Cookie` headers untouched — session issuance stays the
//!   backend's job;
//! - typed calls (`search_franchises`, `dashboard_summary`) where the
//!   gateway consumes the shape itself.
//!
//! Query-string and image-rule helpers are pure for testability.

use std::time::Duration;

use reqwest::header::{COOKIE, SET_COOKIE};
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Listing-form image rules, enforced before anything is forwarded upstream.
pub const MAX_LISTING_IMAGES: usize = 3;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http client build failed: {0}")]
    ClientBuild(String),
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected upstream payload: {0}")]
    Decode(String),
    #[error(transparent)]
    ImageRules(#[from] ImageRuleError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageRuleError {
    #[error("at least one image is required")]
    NoImages,
    #[error("at most {MAX_LISTING_IMAGES} images allowed")]
    TooMany,
    #[error("image '{0}' exceeds the 5 MiB limit")]
    TooLarge(String),
    #[error("'{0}' is not an image upload")]
    NotAnImage(String),
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Listing card as returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Franchise {
    pub id: String,
    pub brand_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub category: String,
    pub image_url: String,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FranchisePage {
    pub result: Vec<Franchise>,
    pub total_pages: u32,
}

/// Aggregate view-count metrics for the owner dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FranchiseDashboard {
    pub franchise_id: String,
    pub franchise_name: String,
    pub status: String,
    pub total_views: u64,
    pub avg_views_per_day: f64,
    pub performance_level: String,
    pub year_established: u32,
    pub total_locations: u32,
    pub investment_range: String,
    pub space_required_sq_ft: u32,
    pub states_count: u32,
    pub photos_count: u32,
    pub created_at: String,
    #[serde(default)]
    pub approved_at: Option<String>,
    pub days_live: u32,
    pub is_approved: bool,
}

/// Filters accepted by the browse page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub state: Option<String>,
    pub max_investment: Option<u64>,
}

impl SearchQuery {
    /// Query params in the shape the backend search endpoint expects.
    /// `state=All` is the UI's no-filter sentinel; an investment ceiling
    /// implies a zero floor.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_owned()));
        }
        params.push(("page", self.page.unwrap_or(1).to_string()));
        if let Some(state) = self.state.as_deref().filter(|s| !s.is_empty() && *s != "All") {
            params.push(("state", state.to_owned()));
        }
        if let Some(ceiling) = self.max_investment {
            params.push(("minInvestment", "0".to_owned()));
            params.push(("maxInvestment", ceiling.to_string()));
        }
        params
    }
}

/// One uploaded listing image, already read into memory.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Listing fields collected from the create form. Field names are forwarded
/// verbatim — the backend expects the form's PascalCase keys.
#[derive(Debug, Clone, Default)]
pub struct ListingForm {
    pub fields: Vec<(String, String)>,
    pub images: Vec<ImageUpload>,
}

/// Enforce the listing image rules: at least one image, at most
/// `MAX_LISTING_IMAGES`, each under `MAX_IMAGE_BYTES` with an image/* type.
pub fn check_images(images: &[ImageUpload]) -> Result<(), ImageRuleError> {
    if images.is_empty() {
        return Err(ImageRuleError::NoImages);
    }
    if images.len() > MAX_LISTING_IMAGES {
        return Err(ImageRuleError::TooMany);
    }
    for image in images {
        if !image.content_type.starts_with("image/") {
            return Err(ImageRuleError::NotAnImage(image.file_name.clone()));
        }
        if image.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageRuleError::TooLarge(image.file_name.clone()));
        }
    }
    Ok(())
}

/// Raw upstream reply relayed back to the browser.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: u16,
    /// `Set-Cookie` headers minted by the backend (session issuance).
    pub set_cookies: Vec<String>,
    pub body: serde_json::Value,
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body upstream, relaying status, body and `Set-Cookie`.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        cookie: Option<&str>,
    ) -> Result<UpstreamReply, ApiError> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;
        relay(response).await
    }

    /// GET a JSON resource upstream, relaying status, body and `Set-Cookie`.
    pub async fn get_json(&self, path: &str, cookie: Option<&str>) -> Result<UpstreamReply, ApiError> {
        let mut request = self.http.get(self.url(path));
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;
        relay(response).await
    }

    /// Search listings with the browse-page filter semantics.
    pub async fn search_franchises(
        &self,
        query: &SearchQuery,
        cookie: Option<&str>,
    ) -> Result<FranchisePage, ApiError> {
        let mut request = self
            .http
            .get(self.url("/api/franchise/search-franchise"))
            .query(&query.params());
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        response
            .json::<FranchisePage>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Owner dashboard summary (view counts and listing metrics).
    pub async fn dashboard_summary(&self, cookie: &str) -> Result<FranchiseDashboard, ApiError> {
        let response = self
            .http
            .get(self.url("/api/franchise/dashboard"))
            .header(COOKIE, cookie)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        response
            .json::<FranchiseDashboard>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Create a listing: validate the images, rebuild the multipart form and
    /// forward it with the caller's session cookie.
    pub async fn create_franchise(&self, listing: ListingForm, cookie: &str) -> Result<UpstreamReply, ApiError> {
        check_images(&listing.images)?;

        let mut form = reqwest::multipart::Form::new();
        for (name, value) in listing.fields {
            form = form.text(name, value);
        }
        for image in listing.images {
            let file_name = image.file_name.clone();
            let part = reqwest::multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)
                .map_err(|_| ImageRuleError::NotAnImage(file_name))?;
            form = form.part("Images", part);
        }

        let response = self
            .http
            .post(self.url("/api/franchise/create"))
            .header(COOKIE, cookie)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;
        relay(response).await
    }
}

/// Capture status, `Set-Cookie` headers and body off an upstream response.
/// Non-JSON bodies are relayed as a JSON string rather than dropped.
async fn relay(response: reqwest::Response) -> Result<UpstreamReply, ApiError> {
    let status = response.status().as_u16();
    let set_cookies = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_owned))
        .collect();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;
    let body = if text.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
    };
    Ok(UpstreamReply { status, set_cookies, body })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
