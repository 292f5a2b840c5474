// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`, `Deserialize`, and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! ## Patient Id Type
//!
//! The [`PatientId`] newtype wraps the numeric identifier patients carry
//! across the clinic's services. History notes are indexed by it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier a patient carries across the clinic's services.
///
/// The patient registry owns the numbering; this service only indexes by it.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct PatientId(pub i32);

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for PatientId {
    fn from(value: i32) -> Self {
        PatientId(value)
    }
}

impl From<PatientId> for i32 {
    fn from(value: PatientId) -> Self {
        value.0
    }
}

/// One free-text note in a patient's medical history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HistoryNote {
    /// Unique identifier for this note.
    pub id: String,
    /// The patient this note belongs to.
    pub patient_id: PatientId,
    /// The patient's display name as entered by the practitioner.
    pub patient: String,
    /// The note text.
    pub note: String,
}

/// Request to append a note to a patient's history.
///
/// The patient id comes from the request path, not the body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// The patient's display name.
    pub patient: String,
    /// The note text.
    pub note: String,
}

/// Request to store the full record under an existing note id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertNoteRequest {
    /// The patient this note belongs to.
    pub patient_id: PatientId,
    /// The patient's display name.
    pub patient: String,
    /// The note text.
    pub note: String,
}
