// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! Axum extractors for the authenticated principal.
//!
//! Handlers read the caller's identity by capability, never by digging
//! through extensions themselves:
//!
//! ```rust,ignore
//! async fn my_handler(Principal(principal): Principal) -> impl IntoResponse {
//!     // principal.subject is the token's `sub` claim
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{claims::AuthenticatedPrincipal, error::AuthError};

/// Requires an authenticated principal.
///
/// The gate middleware attaches the principal; this extractor only reads the
/// slot. On a protected route the enforcer has already guaranteed the slot is
/// filled, so the rejection here is reachable only on exempt routes.
pub struct Principal(pub AuthenticatedPrincipal);

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .map(Principal)
            .ok_or(AuthError::MissingPrincipal)
    }
}

/// Like [`Principal`], but yields `None` instead of rejecting.
///
/// For handlers on exempt routes that behave differently when a caller
/// happens to be authenticated.
pub struct OptionalPrincipal(pub Option<AuthenticatedPrincipal>);

impl<S> FromRequestParts<S> for OptionalPrincipal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalPrincipal(
            parts.extensions.get::<AuthenticatedPrincipal>().cloned(),
        ))
    }
}
