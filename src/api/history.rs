// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! Patient history endpoints.
//!
//! Notes are free text written by practitioners during a visit. They are
//! grouped per patient and individually addressable for corrections.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::ApiError,
    models::{CreateNoteRequest, HistoryNote, PatientId, UpsertNoteRequest},
    state::AppState,
};

/// List every history note recorded for a patient.
#[utoipa::path(
    get,
    path = "/api/history/{patient_id}",
    params(
        ("patient_id" = i32, Path, description = "Identifier of the patient")
    ),
    tag = "History",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Notes for the patient", body = [HistoryNote]),
        (status = 204, description = "No history recorded for this patient"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_patient_history(
    Path(patient_id): Path<PatientId>,
    State(state): State<AppState>,
) -> Response {
    let store = state.store.read().await;
    let notes = store.find_by_patient(patient_id);
    if notes.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(notes).into_response()
}

/// Append a new note to a patient's history.
#[utoipa::path(
    post,
    path = "/api/history/{patient_id}/add",
    params(
        ("patient_id" = i32, Path, description = "Identifier of the patient")
    ),
    request_body = CreateNoteRequest,
    tag = "History",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Note recorded", body = HistoryNote),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn add_note(
    Path(patient_id): Path<PatientId>,
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<HistoryNote>), ApiError> {
    let mut store = state.store.write().await;
    let note = store.add_note(patient_id, request);
    Ok((StatusCode::CREATED, Json(note)))
}

/// Fetch a single history note by its identifier.
#[utoipa::path(
    get,
    path = "/api/history/note/{note_id}",
    params(
        ("note_id" = String, Path, description = "Identifier of the note")
    ),
    tag = "History",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The requested note", body = HistoryNote),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "No note with that identifier"),
    )
)]
pub async fn get_note(
    Path(note_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<HistoryNote>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get(&note_id)?))
}

/// Create or replace a note under the identifier in the path.
#[utoipa::path(
    put,
    path = "/api/history/note/{note_id}",
    params(
        ("note_id" = String, Path, description = "Identifier of the note")
    ),
    request_body = UpsertNoteRequest,
    tag = "History",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "The stored note", body = HistoryNote),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn upsert_note(
    Path(note_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpsertNoteRequest>,
) -> Result<Json<HistoryNote>, ApiError> {
    let note = HistoryNote {
        id: note_id,
        patient_id: request.patient_id,
        patient: request.patient,
        note: request.note,
    };
    let mut store = state.store.write().await;
    Ok(Json(store.upsert(note)))
}

/// Delete a note by its identifier.
#[utoipa::path(
    delete,
    path = "/api/history/note/{note_id}",
    params(
        ("note_id" = String, Path, description = "Identifier of the note")
    ),
    tag = "History",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "No note with that identifier"),
    )
)]
pub async fn delete_note(
    Path(note_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete(&note_id)?;
    Ok(StatusCode::NO_CONTENT)
}
