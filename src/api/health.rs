// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Liveness response for monitoring probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe handler.
///
/// Always returns 200 while the process is running. The store is in-memory,
/// so there are no downstream dependencies to check.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
