//! Shared application state.
//!
//! `AppState` is injected into axum handlers via the `State` extractor. The
//! gateway keeps no mutable state across requests: the client and verifier
//! are both read-only after startup, so concurrent requests need no
//! coordination.

use std::sync::Arc;

use crate::services::api::ApiClient;
use crate::token::TokenVerifier;

/// Shared application state. Clone is required by axum — the client is
/// internally reference-counted and the verifier is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    #[must_use]
    pub fn new(api: ApiClient, verifier: TokenVerifier) -> Self {
        Self { api, verifier: Arc::new(verifier) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    pub const TEST_SECRET: &str = "test-gateway-secret";

    /// Create a test `AppState` pointed at a dead upstream (no live network).
    #[must_use]
    pub fn test_app_state() -> AppState {
        let api = ApiClient::new("http://localhost:5151").expect("client build should not fail");
        AppState::new(api, TokenVerifier::new(TEST_SECRET))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_clones_share_the_verifier() {
        let state = test_helpers::test_app_state();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.verifier, &clone.verifier));
    }

    #[test]
    fn test_state_verifier_rejects_garbage() {
        let state = test_helpers::test_app_state();
        assert!(state.verifier.verify("not-a-token").is_none());
    }
}
