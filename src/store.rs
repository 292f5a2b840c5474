// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Abernathy Clinic

//! In-memory note repository.
//!
//! Stands in for the clinic's document store behind the same two-operation
//! contract the service actually relies on: "find by patient key" and
//! "upsert record". Nothing here survives a restart.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateNoteRequest, HistoryNote, PatientId};

#[derive(Default)]
pub struct NoteStore {
    notes: HashMap<String, HistoryNote>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notes recorded for a patient. Empty when the patient has none
    /// (or was never seen); those two cases are indistinguishable here.
    pub fn find_by_patient(&self, patient_id: PatientId) -> Vec<HistoryNote> {
        self.notes
            .values()
            .filter(|note| note.patient_id == patient_id)
            .cloned()
            .collect()
    }

    /// Append a note to a patient's history under a fresh id.
    ///
    /// The patient id always comes from the caller's path, never from the
    /// body, so a note cannot be filed under the wrong patient by a stale
    /// payload.
    pub fn add_note(&mut self, patient_id: PatientId, request: CreateNoteRequest) -> HistoryNote {
        let id = Uuid::new_v4().to_string();
        let note = HistoryNote {
            id: id.clone(),
            patient_id,
            patient: request.patient,
            note: request.note,
        };
        self.notes.insert(id, note.clone());
        note
    }

    /// Store `note` under its id, replacing any previous record.
    pub fn upsert(&mut self, note: HistoryNote) -> HistoryNote {
        self.notes.insert(note.id.clone(), note.clone());
        note
    }

    pub fn get(&self, note_id: &str) -> Result<HistoryNote, ApiError> {
        self.notes
            .get(note_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("History note not found"))
    }

    pub fn delete(&mut self, note_id: &str) -> Result<(), ApiError> {
        if self.notes.remove(note_id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("History note not found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(patient: &str, note: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            patient: patient.into(),
            note: note.into(),
        }
    }

    #[test]
    fn add_note_assigns_id_and_patient() {
        let mut store = NoteStore::new();
        let note = store.add_note(PatientId(7), request("Test TestNone", "Patient states that they feel fine"));

        assert!(!note.id.is_empty());
        assert_eq!(note.patient_id, PatientId(7));
        assert_eq!(store.find_by_patient(PatientId(7)), vec![note]);
    }

    #[test]
    fn find_by_patient_filters_other_patients() {
        let mut store = NoteStore::new();
        let kept = store.add_note(PatientId(1), request("Test TestA", "first"));
        store.add_note(PatientId(2), request("Test TestB", "second"));

        assert_eq!(store.find_by_patient(PatientId(1)), vec![kept]);
        assert!(store.find_by_patient(PatientId(99)).is_empty());
    }

    #[test]
    fn upsert_replaces_existing_record() {
        let mut store = NoteStore::new();
        let original = store.add_note(PatientId(1), request("Test TestA", "before"));

        let mut updated = original.clone();
        updated.note = "after".into();
        store.upsert(updated.clone());

        assert_eq!(store.get(&original.id).unwrap(), updated);
        assert_eq!(store.find_by_patient(PatientId(1)).len(), 1);
    }

    #[test]
    fn upsert_inserts_unknown_ids() {
        let mut store = NoteStore::new();
        let note = HistoryNote {
            id: "external-id".into(),
            patient_id: PatientId(3),
            patient: "Test TestC".into(),
            note: "imported".into(),
        };

        store.upsert(note.clone());
        assert_eq!(store.get("external-id").unwrap(), note);
    }

    #[test]
    fn get_and_delete_missing_note_error() {
        let mut store = NoteStore::new();
        assert_eq!(
            store.get("missing").unwrap_err().status,
            axum::http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            store.delete("missing").unwrap_err().status,
            axum::http::StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn delete_removes_the_note() {
        let mut store = NoteStore::new();
        let note = store.add_note(PatientId(1), request("Test TestA", "to be removed"));

        store.delete(&note.id).unwrap();
        assert!(store.find_by_patient(PatientId(1)).is_empty());
    }
}
