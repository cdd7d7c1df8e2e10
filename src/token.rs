//! Session-token verification.
//!
//! DESIGN
//! ======
//! The remote API issues an HS256 JWT in the `_gf_` cookie on login or
//! registration verification. The gateway only ever reads it: this module
//! decodes the token, checks signature and expiry, and extracts the subject
//! and role claims. Every failure mode (bad signature, malformed token,
//! expiry, missing claims) collapses into `None` so the gate treats
//! verification uniformly and never learns why a token was rejected.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "_gf_";

// =============================================================================
// ROLE
// =============================================================================

/// Closed set of recognized role claims. Anything else decoded off the wire
/// is "unknown" and never reaches routing logic as an open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Investor / buyer side of the marketplace.
    User,
    /// Brand owner listing franchises.
    FranchiseOwner,
}

impl Role {
    #[must_use]
    pub fn from_claim(raw: &str) -> Option<Self> {
        match raw {
            "User" => Some(Self::User),
            "FranchiseOwner" => Some(Self::FranchiseOwner),
            _ => None,
        }
    }

    /// Root of this role's dashboard subtree.
    #[must_use]
    pub fn dashboard(self) -> &'static str {
        match self {
            Self::User => "/dashboard/user",
            Self::FranchiseOwner => "/dashboard/franchise-owner",
        }
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Request-scoped identity derived from a verified token. Exists only for the
/// duration of one routing decision; never persisted.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Owning user id (`sub` claim).
    pub subject_id: String,
    /// `None` when the role claim carried a value outside the recognized set.
    /// A missing role claim is a verification failure, not an unknown role.
    pub role: Option<Role>,
}

/// Claims as issued by the remote API. The role sits under the WS-2008
/// identity claim URI rather than a bare `role` key.
#[derive(Deserialize)]
struct Claims {
    sub: String,
    #[serde(rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role")]
    role: Option<String>,
}

// =============================================================================
// VERIFIER
// =============================================================================

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        // Validation::new requires `exp` and validates it against the clock.
        let validation = Validation::new(Algorithm::HS256);
        Self { key: DecodingKey::from_secret(secret.as_bytes()), validation }
    }

    /// Verify a token and extract its identity.
    ///
    /// Returns `None` for any invalid token: bad signature, malformed,
    /// expired, or missing `sub`/role claims. Never panics and never
    /// distinguishes failure causes past this boundary.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Identity> {
        let data = decode::<Claims>(token, &self.key, &self.validation).ok()?;
        let role_raw = data.claims.role?;
        Some(Identity {
            subject_id: data.claims.sub,
            role: Role::from_claim(&role_raw),
        })
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
