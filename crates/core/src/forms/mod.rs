//! Form schemas for the two editable forms.
//!
//! Each form is a single state object over an enumerated set of fields. `validate` checks the
//! whole form at once and either yields the request body or the per-field messages to show
//! inline. A failed validation never reaches the network.

pub mod create_note;
pub mod update_note;

pub use create_note::{CreateNoteField, CreateNoteForm};
pub use update_note::{NoteField, UpdateNoteForm};

use std::collections::BTreeMap;

/// Field-level validation messages, ordered by field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord + Copy> FormErrors<F> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Records `message` for `field`, keeping the first message if one exists.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl<F: Ord + Copy> Default for FormErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}
