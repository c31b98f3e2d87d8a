//! Notes list page (`/`).

use super::new_note::NewNoteModal;
use crate::constants::{PREVIEW_LEN, SHORT_DATE_FORMAT};
use crate::router::{Navigation, Route};
use crate::ScribeResult;
use api_client::{NoteSummary, ScribeApi};
use scribe_types::ResourceId;

/// One table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteRow {
    pub note_id: ResourceId,
    pub patient_name: String,
    pub preview: String,
    /// `MM/DD/YYYY`
    pub created_at: String,
}

impl From<&NoteSummary> for NoteRow {
    fn from(note: &NoteSummary) -> Self {
        Self {
            note_id: note.id.clone(),
            patient_name: note.patient.name.clone(),
            preview: truncate_text(&note.summary, PREVIEW_LEN),
            created_at: note.created_at.format(SHORT_DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NotesListPage {
    rows: Vec<NoteRow>,
    modal: NewNoteModal,
}

impl NotesListPage {
    /// Fetches the notes.
    ///
    /// # Errors
    ///
    /// Propagates the API error unchanged.
    pub async fn load<A: ScribeApi>(api: &A) -> ScribeResult<Self> {
        let notes = api.fetch_notes().await?;
        tracing::debug!("loaded {} notes", notes.len());
        Ok(Self::from_notes(&notes))
    }

    pub fn from_notes(notes: &[NoteSummary]) -> Self {
        Self {
            rows: notes.iter().map(NoteRow::from).collect(),
            modal: NewNoteModal::default(),
        }
    }

    pub fn rows(&self) -> &[NoteRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Navigation for clicking the row at `index` (zero-based).
    pub fn open_row(&self, index: usize) -> Option<Navigation> {
        self.rows
            .get(index)
            .map(|row| Navigation::To(Route::note(&row.note_id)))
    }

    pub fn modal(&self) -> &NewNoteModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut NewNoteModal {
        &mut self.modal
    }
}

/// Shortens `text` to `max` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}
