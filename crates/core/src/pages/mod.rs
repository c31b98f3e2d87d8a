//! Page controllers.
//!
//! A page issues its read queries when it is loaded, owns its own form state, and answers user
//! actions with notifications and navigation requests. Nothing is shared between pages.

pub mod new_note;
pub mod note_details;
pub mod notes_list;

pub use new_note::{CreateOutcome, NewNoteModal};
pub use note_details::{NoteDetails, NoteDetailsState, PatientCard, SaveOutcome};
pub use notes_list::{truncate_text, NoteRow, NotesListPage};

/// Raises a page's pending flag for the lifetime of one request.
///
/// The flag is lowered on drop, so a request future dropped mid-flight does not leave the page
/// stuck in its pending state.
pub(crate) struct Pending<'a>(&'a mut bool);

impl<'a> Pending<'a> {
    pub(crate) fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
