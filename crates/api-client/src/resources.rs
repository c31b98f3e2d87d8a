//! One accessor per REST operation.
//!
//! Each accessor issues exactly one request and returns the unwrapped resource. Failures are
//! propagated as [`ApiError`](crate::ApiError) without retries or translation.

use crate::client::HttpClient;
use crate::models::{CreateNoteBody, Note, NoteRef, NoteSummary, Patient, PatientSummary, UpdateNoteBody};
use crate::ApiResult;
use reqwest::multipart::{Form, Part};
use scribe_types::ResourceId;

/// The notes API as seen by pages.
///
/// Implemented by [`HttpClient`]; pages are generic over it so they can be exercised against an
/// in-memory double.
#[allow(async_fn_in_trait)]
pub trait ScribeApi {
    /// `GET /patients`
    async fn fetch_patients(&self) -> ApiResult<Vec<PatientSummary>>;

    /// `GET /notes`
    async fn fetch_notes(&self) -> ApiResult<Vec<NoteSummary>>;

    /// `GET /patient/{id}`
    async fn get_patient_by_id(&self, id: &ResourceId) -> ApiResult<Patient>;

    /// `GET /note/{id}`
    async fn get_note_by_id(&self, id: &ResourceId) -> ApiResult<Note>;

    /// `POST /note` with `patientId` and `audio` parts.
    async fn create_note(&self, body: CreateNoteBody) -> ApiResult<NoteRef>;

    /// `PUT /note/{id}` replacing all nine editable fields.
    async fn update_note(&self, id: &ResourceId, body: &UpdateNoteBody) -> ApiResult<NoteRef>;
}

impl ScribeApi for HttpClient {
    async fn fetch_patients(&self) -> ApiResult<Vec<PatientSummary>> {
        self.get("/patients", "patients").await
    }

    async fn fetch_notes(&self) -> ApiResult<Vec<NoteSummary>> {
        self.get("/notes", "notes").await
    }

    async fn get_patient_by_id(&self, id: &ResourceId) -> ApiResult<Patient> {
        self.get(&format!("/patient/{id}"), "patient").await
    }

    async fn get_note_by_id(&self, id: &ResourceId) -> ApiResult<Note> {
        self.get(&format!("/note/{id}"), "note").await
    }

    async fn create_note(&self, body: CreateNoteBody) -> ApiResult<NoteRef> {
        let audio = Part::bytes(body.audio.bytes)
            .file_name(body.audio.file_name)
            .mime_str(&body.audio.media_type)?;

        let form = Form::new()
            .text("patientId", body.patient_id.to_string())
            .part("audio", audio);

        self.post_multipart("/note", form, "note").await
    }

    async fn update_note(&self, id: &ResourceId, body: &UpdateNoteBody) -> ApiResult<NoteRef> {
        self.put_json(&format!("/note/{id}"), body, "note").await
    }
}
