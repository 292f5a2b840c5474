// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::{authenticate, require_principal},
    models::{CreateNoteRequest, HistoryNote, PatientId, UpsertNoteRequest},
    state::AppState,
};

pub mod health;
pub mod history;
pub mod me;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/history/{patient_id}", get(history::get_patient_history))
        .route("/history/{patient_id}/add", post(history::add_note))
        .route(
            "/history/note/{note_id}",
            get(history::get_note)
                .put(history::upsert_note)
                .delete(history::delete_note),
        )
        .route("/me", get(me::current_principal))
        .with_state(state.clone());

    // Layers run bottom-up for incoming requests: CORS first, then request-id
    // stamping and tracing, then the two authentication stages. Exempt paths
    // are honored inside both stages, so they never see a 401 from here.
    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_principal,
        ))
        .layer(middleware::from_fn_with_state(state, authenticate))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        history::get_patient_history,
        history::add_note,
        history::get_note,
        history::upsert_note,
        history::delete_note,
        me::current_principal
    ),
    components(
        schemas(
            HistoryNote,
            PatientId,
            CreateNoteRequest,
            UpsertNoteRequest,
            health::HealthResponse,
            me::MeResponse
        )
    ),
    tags(
        (name = "History", description = "Patient history notes"),
        (name = "Principal", description = "Bearer token introspection"),
        (name = "Health", description = "Service monitoring")
    )
)]
struct ApiDoc;
