//! Note detail page (`/note/:noteId`).
//!
//! Loading is a two-step pipeline: the note is fetched first, then its patient using the note's
//! `patientId`. Either record missing ends in a redirect to the notes list.

use super::Pending;
use crate::constants::{
    LONG_DATE_FORMAT, NOTE_NOT_FOUND, NOTE_UPDATED, NOTE_UPDATE_FAILED, PATIENT_NOT_FOUND,
    SHORT_DATE_FORMAT,
};
use crate::forms::{FormErrors, NoteField, UpdateNoteForm};
use crate::notification::Notification;
use crate::router::{Navigation, Route};
use crate::{ScribeError, ScribeResult};
use api_client::{ApiError, Note, Patient, ScribeApi};
use oasis::{Catalog, ItemCode};
use scribe_types::ResourceId;

/// Patient block shown above the note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientCard {
    pub name: String,
    /// `MM/DD/YYYY`
    pub date_of_birth: String,
    pub identification_number: String,
}

impl From<&Patient> for PatientCard {
    fn from(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            date_of_birth: patient.date_of_birth.format(SHORT_DATE_FORMAT).to_string(),
            identification_number: patient.patient_id.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    /// The request failed; edits are kept.
    Failed(Notification),
    Saved(Notification),
}

/// A loaded note with its patient and edit form.
#[derive(Clone, Debug)]
pub struct NoteDetails {
    note_id: ResourceId,
    patient: PatientCard,
    heading: String,
    created_on: String,
    form: UpdateNoteForm,
    errors: FormErrors<NoteField>,
    pending: bool,
}

impl NoteDetails {
    pub fn new(note: &Note, patient: &Patient) -> Self {
        let mut form = UpdateNoteForm::new();
        form.reset(note);
        Self {
            note_id: note.id.clone(),
            patient: PatientCard::from(patient),
            heading: format!("Note for {}", patient.name),
            created_on: note.created_at.format(LONG_DATE_FORMAT).to_string(),
            form,
            errors: FormErrors::new(),
            pending: false,
        }
    }

    pub fn note_id(&self) -> &ResourceId {
        &self.note_id
    }

    pub fn patient(&self) -> &PatientCard {
        &self.patient
    }

    /// `Note for <patient name>`
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Creation date, `Month D, YYYY`.
    pub fn created_on(&self) -> &str {
        &self.created_on
    }

    pub fn form(&self) -> &UpdateNoteForm {
        &self.form
    }

    pub fn errors(&self) -> &FormErrors<NoteField> {
        &self.errors
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn save_label(&self) -> &'static str {
        if self.pending {
            "Saving..."
        } else {
            "Save"
        }
    }

    /// Edits the transcription or the summary.
    ///
    /// # Errors
    ///
    /// Assessment answers go through [`NoteDetails::select`]; passing one here is
    /// [`ScribeError::InvalidInput`].
    pub fn set_text(&mut self, field: NoteField, value: impl Into<String>) -> ScribeResult<()> {
        if let NoteField::Assessment(code) = field {
            return Err(ScribeError::InvalidInput(format!(
                "{code} is answered by selecting an option"
            )));
        }
        self.form.set(field, value);
        Ok(())
    }

    pub fn select(&mut self, catalog: &Catalog, code: ItemCode, value: &str) -> ScribeResult<()> {
        self.form.select(catalog, code, value)
    }

    /// Validates and sends the full set of editable fields.
    pub async fn save<A: ScribeApi>(&mut self, api: &A) -> SaveOutcome {
        let body = match self.form.validate() {
            Ok(body) => body,
            Err(errors) => {
                self.errors = errors;
                return SaveOutcome::Invalid;
            }
        };
        self.errors.clear();

        let result = {
            let _pending = Pending::start(&mut self.pending);
            api.update_note(&self.note_id, &body).await
        };

        match result {
            Ok(saved) => {
                tracing::info!("updated note {}", saved.id);
                self.form.mark_saved();
                SaveOutcome::Saved(Notification::success(NOTE_UPDATED))
            }
            Err(e) => {
                tracing::warn!("update note {} failed: {}", self.note_id, e);
                SaveOutcome::Failed(Notification::error(NOTE_UPDATE_FAILED))
            }
        }
    }

    /// The "Return" button.
    pub fn go_back(&self) -> Navigation {
        Navigation::Back
    }
}

#[derive(Clone, Debug)]
pub enum NoteDetailsState {
    Loading,
    Ready(Box<NoteDetails>),
    Redirect {
        navigation: Navigation,
        notification: Notification,
    },
}

impl NoteDetailsState {
    /// Runs the note then patient fetch for the `:noteId` route segment.
    ///
    /// # Errors
    ///
    /// Only errors other than a missing record are returned; missing records end in
    /// [`NoteDetailsState::Redirect`].
    pub async fn load<A: ScribeApi>(api: &A, note_id: Option<&str>) -> ScribeResult<Self> {
        let Some(note_id) = note_id.and_then(|raw| ResourceId::parse(raw).ok()) else {
            return Ok(Self::redirect(NOTE_NOT_FOUND));
        };

        let note = match api.get_note_by_id(&note_id).await {
            Ok(note) => note,
            Err(e) if e.is_not_found() => return Ok(Self::not_found(NOTE_NOT_FOUND, &e)),
            Err(e) => return Err(e.into()),
        };

        let patient = match api.get_patient_by_id(&note.patient_id).await {
            Ok(patient) => patient,
            Err(e) if e.is_not_found() => return Ok(Self::not_found(PATIENT_NOT_FOUND, &e)),
            Err(e) => return Err(e.into()),
        };

        Ok(Self::Ready(Box::new(NoteDetails::new(&note, &patient))))
    }

    fn not_found(message: &str, error: &ApiError) -> Self {
        tracing::warn!("{}: {}", message, error);
        Self::redirect(message)
    }

    fn redirect(message: &str) -> Self {
        Self::Redirect {
            navigation: Navigation::To(Route::NotesList),
            notification: Notification::error(message),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}
