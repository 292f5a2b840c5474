// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! Authentication middleware pair.
//!
//! Two stages, deliberately kept separate:
//!
//! - [`authenticate`] inspects the `Authorization` header. A valid bearer
//!   token attaches an [`AuthenticatedPrincipal`] to the request; an invalid
//!   one ends the request with an empty 401. A missing or non-bearer header
//!   passes through untouched, with no principal.
//! - [`require_principal`] runs after it and turns "no principal on a
//!   protected path" into the 401.
//!
//! Collapsing the two would silently change which routes are public, so the
//! gate never rejects for absence, only for presented-and-invalid.
//!
//! Both stages consult the [`AccessPolicy`](super::policy::AccessPolicy)
//! first; an exempt path skips token processing entirely, so even a garbage
//! `Authorization` header cannot keep a request off an exempt route.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{claims::AuthenticatedPrincipal, error::AuthError};
use crate::state::AppState;

/// Scheme prefix the gate recognizes. Case-sensitive, single trailing space;
/// the candidate token is the exact remainder of the header value.
const BEARER_PREFIX: &str = "Bearer ";

/// Authentication gate.
///
/// One synchronous verdict per request, no retries. See the module docs for
/// the pass-through/reject split.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if state.auth.policy.is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    // No header, a header that is not valid UTF-8, or a scheme other than
    // `Bearer`: proceed without a principal and let the enforcer decide.
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return next.run(request).await;
    };
    let Ok(header) = header.to_str() else {
        return next.run(request).await;
    };
    let Some(token) = header.strip_prefix(BEARER_PREFIX) else {
        return next.run(request).await;
    };

    if !state.auth.validator.is_valid(token) {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid bearer token");
        return AuthError::InvalidToken.into_response();
    }

    match state.auth.validator.extract_subject(token) {
        Ok(subject) => {
            request
                .extensions_mut()
                .insert(AuthenticatedPrincipal::new(subject));
            next.run(request).await
        }
        Err(reason) => {
            // The token validated a moment ago, so this cannot happen while
            // the signing secret is immutable. Reject rather than let the
            // request continue unattributed.
            tracing::error!(%reason, "Token became undecodable after a positive verdict");
            AuthError::SubjectUnavailable.into_response()
        }
    }
}

/// Policy enforcement stage.
///
/// Every request on a non-exempt path must have picked up a principal by the
/// time it gets here; anything else is turned away before handler logic runs.
pub async fn require_principal(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.auth.policy.is_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    if request.extensions().get::<AuthenticatedPrincipal>().is_none() {
        tracing::warn!(path = %request.uri().path(), "Rejected unauthenticated request");
        return AuthError::MissingPrincipal.into_response();
    }

    next.run(request).await
}
