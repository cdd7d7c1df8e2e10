//! Role-gated request interception.
//!
//! DESIGN
//! ======
//! Every inbound request (minus exempt paths) is classified against the
//! session cookie before any handler runs. The routing rules live in
//! `decide`, a pure function of (path, auth state), so the full rule table is
//! unit-testable without a server. The axum middleware wrapper only does I/O:
//! cookie extraction, token verification, and turning a `Decision` into a
//! forward or redirect response.
//!
//! Rule order matters — earlier rules win. Every branch terminates in either
//! a forward or an explicit redirect; a role-mismatched dashboard subtree is
//! never served, and unrecognized destinations redirect to a known-safe page
//! rather than falling through to a 404.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;

use crate::state::AppState;
use crate::token::{Identity, Role, SESSION_COOKIE};

/// Default (investor) sign-in route, also the fail-closed fallback target.
pub const SIGN_IN: &str = "/auth/user";

const AUTH_PREFIX: &str = "/auth";

// =============================================================================
// DECISION
// =============================================================================

/// Authentication state derived from the request cookie, before any routing
/// rule runs. Either fully verified or unauthenticated — there is no
/// partially-trusted state.
#[derive(Debug, Clone)]
pub enum AuthState {
    /// No session cookie on the request.
    Missing,
    /// Cookie present but verification failed (signature, expiry, shape).
    Invalid,
    /// Cookie verified; identity decoded.
    Verified(Identity),
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Pass the request through to its handler unchanged.
    Forward,
    /// Redirect without touching the cookie.
    Redirect(&'static str),
    /// Redirect and delete the session cookie so the client does not keep
    /// retrying a dead token.
    RedirectClearCookie(&'static str),
}

/// Paths excluded from gating before any rule runs: the backend API proxy,
/// static assets, and the health probe.
#[must_use]
pub fn is_exempt(path: &str) -> bool {
    under(path, "/api") || under(path, "/assets") || path == "/favicon.ico" || path == "/healthz"
}

fn is_auth_route(path: &str) -> bool {
    under(path, AUTH_PREFIX)
}

/// True when `path` equals `prefix` or sits inside its subtree. Plain
/// `starts_with` would wrongly match siblings like `/dashboard/user-admin`.
fn under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Apply the routing rules, in order, to one request.
#[must_use]
pub fn decide(path: &str, auth: &AuthState) -> Decision {
    let identity = match auth {
        // Rule 1: unauthenticated requests pass on public routes only.
        AuthState::Missing => {
            if path == "/" || is_auth_route(path) {
                return Decision::Forward;
            }
            return Decision::Redirect(SIGN_IN);
        }
        // Rule 2: dead token — force login and purge the cookie.
        AuthState::Invalid => return Decision::RedirectClearCookie(SIGN_IN),
        AuthState::Verified(identity) => identity,
    };

    // Rule 8, hoisted: every rule below needs the role mapped to a dashboard,
    // so an unrecognized role claim fails closed to sign-in here. The cookie
    // is kept — the token itself verified fine.
    let Some(role) = identity.role else {
        return Decision::Redirect(SIGN_IN);
    };

    // Rule 3: authenticated users have no reason to see login forms again.
    if is_auth_route(path) {
        return Decision::Redirect(role.dashboard());
    }

    // Rules 4 and 5: the wrong dashboard subtree is denied by redirect to the
    // caller's own, never by an error page.
    if under(path, Role::User.dashboard()) {
        return match role {
            Role::User => Decision::Forward,
            Role::FranchiseOwner => Decision::Redirect(Role::FranchiseOwner.dashboard()),
        };
    }
    if under(path, Role::FranchiseOwner.dashboard()) {
        return match role {
            Role::FranchiseOwner => Decision::Forward,
            Role::User => Decision::Redirect(Role::User.dashboard()),
        };
    }

    // Rules 6 and 7: the bare dashboard root, the public root, and any
    // destination no rule above recognized all land on the caller's own
    // dashboard (fail-closed default).
    Decision::Redirect(role.dashboard())
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

/// Axum middleware: evaluate the gate for one request.
pub async fn gate(State(state): State<AppState>, jar: CookieJar, req: Request, next: Next) -> Response {
    // Owned so the request can move on into `next.run` after the decision.
    let path = req.uri().path().to_owned();
    if is_exempt(&path) {
        return next.run(req).await;
    }

    let token = jar.get(SESSION_COOKIE).map(Cookie::value).unwrap_or_default();
    let auth = if token.is_empty() {
        AuthState::Missing
    } else {
        match state.verifier.verify(token) {
            Some(identity) => AuthState::Verified(identity),
            None => AuthState::Invalid,
        }
    };

    match decide(&path, &auth) {
        Decision::Forward => next.run(req).await,
        Decision::Redirect(target) => Redirect::temporary(target).into_response(),
        Decision::RedirectClearCookie(target) => {
            let expired = Cookie::build((SESSION_COOKIE, ""))
                .path("/")
                .http_only(true)
                .max_age(Duration::ZERO);
            let jar = CookieJar::new().add(expired);
            (jar, Redirect::temporary(target)).into_response()
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
