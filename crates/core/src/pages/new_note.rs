//! "New Note" modal of the notes list.

use super::Pending;
use crate::audio::AudioFile;
use crate::constants::{NOTE_CREATED, NOTE_CREATE_FAILED};
use crate::forms::{CreateNoteField, CreateNoteForm, FormErrors};
use crate::notification::Notification;
use crate::router::{Navigation, Route};
use crate::{ScribeError, ScribeResult};
use api_client::{PatientSummary, ScribeApi};
use scribe_types::ResourceId;

/// Result of submitting the modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Validation failed; messages are in [`NewNoteModal::errors`]. No request was made.
    Invalid,
    /// The request failed; the form is kept for another attempt.
    Failed(Notification),
    Created {
        notification: Notification,
        navigation: Navigation,
    },
}

#[derive(Clone, Debug, Default)]
pub struct NewNoteModal {
    open: bool,
    pending: bool,
    patients: Vec<PatientSummary>,
    form: CreateNoteForm,
    errors: FormErrors<CreateNoteField>,
}

impl NewNoteModal {
    /// Opens the modal and loads the patients offered by the selection.
    ///
    /// The modal stays open with an empty selection if the patients cannot be loaded.
    pub async fn open<A: ScribeApi>(&mut self, api: &A) -> ScribeResult<()> {
        self.open = true;
        self.patients.clear();
        self.patients = api.fetch_patients().await?;
        Ok(())
    }

    /// Closes the modal unless a submission is pending. Returns whether it closed.
    pub fn close(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.open = false;
        self.form = CreateNoteForm::new();
        self.errors.clear();
        true
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn patients(&self) -> &[PatientSummary] {
        &self.patients
    }

    pub fn form(&self) -> &CreateNoteForm {
        &self.form
    }

    pub fn errors(&self) -> &FormErrors<CreateNoteField> {
        &self.errors
    }

    pub fn submit_label(&self) -> &'static str {
        if self.pending {
            "Creating..."
        } else {
            "Create Note"
        }
    }

    /// Selects one of the loaded patients.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::InvalidInput`] if `patient_id` is not among the loaded patients.
    pub fn select_patient(&mut self, patient_id: &str) -> ScribeResult<()> {
        let patient = self
            .patients
            .iter()
            .find(|p| p.id.as_str() == patient_id)
            .ok_or_else(|| ScribeError::InvalidInput(format!("unknown patient: '{patient_id}'")))?;
        self.form.set_patient(patient.id.clone());
        Ok(())
    }

    /// Sets the patient without going through the selection.
    pub fn set_patient_id(&mut self, patient_id: ResourceId) {
        self.form.set_patient(patient_id);
    }

    pub fn attach_audio(&mut self, audio: AudioFile) {
        self.form.set_audio(audio);
    }

    /// Validates and, if valid, uploads the note.
    ///
    /// `&mut self` keeps the modal from being closed or resubmitted while the upload runs; the
    /// pending flag only drives the submit label.
    pub async fn submit<A: ScribeApi>(&mut self, api: &A) -> CreateOutcome {
        let body = match self.form.validate() {
            Ok(body) => body,
            Err(errors) => {
                self.errors = errors;
                return CreateOutcome::Invalid;
            }
        };
        self.errors.clear();

        let result = {
            let _pending = Pending::start(&mut self.pending);
            api.create_note(body).await
        };

        match result {
            Ok(note) => {
                tracing::info!("created note {}", note.id);
                self.close();
                CreateOutcome::Created {
                    notification: Notification::success(NOTE_CREATED),
                    navigation: Navigation::To(Route::note(&note.id)),
                }
            }
            Err(e) => {
                tracing::warn!("create note failed: {}", e);
                CreateOutcome::Failed(Notification::error(NOTE_CREATE_FAILED))
            }
        }
    }
}
