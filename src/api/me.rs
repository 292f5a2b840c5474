// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! Principal introspection endpoint.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{AuthenticatedPrincipal, Principal};

/// Response for GET /api/me
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    /// Subject the presented bearer token was issued to.
    pub subject: String,
}

impl From<AuthenticatedPrincipal> for MeResponse {
    fn from(principal: AuthenticatedPrincipal) -> Self {
        Self {
            subject: principal.subject,
        }
    }
}

/// Return the identity behind the presented bearer token.
///
/// Useful for clients to confirm which subject their token resolves to.
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Principal",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Authenticated principal", body = MeResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn current_principal(Principal(principal): Principal) -> Json<MeResponse> {
    Json(principal.into())
}
