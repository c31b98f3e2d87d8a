//! Update-note form: transcription, summary and the seven Section G answers.

use super::FormErrors;
use crate::{ScribeError, ScribeResult};
use api_client::{Note, UpdateNoteBody};
use oasis::{Catalog, ItemCode};
use std::fmt;
use std::str::FromStr;

/// The nine editable fields of a note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoteField {
    Transcription,
    Summary,
    Assessment(ItemCode),
}

impl NoteField {
    /// All fields, in form order.
    pub const ALL: [NoteField; 9] = [
        NoteField::Transcription,
        NoteField::Summary,
        NoteField::Assessment(ItemCode::M1800),
        NoteField::Assessment(ItemCode::M1810),
        NoteField::Assessment(ItemCode::M1820),
        NoteField::Assessment(ItemCode::M1830),
        NoteField::Assessment(ItemCode::M1840),
        NoteField::Assessment(ItemCode::M1850),
        NoteField::Assessment(ItemCode::M1860),
    ];

    pub fn label(self) -> &'static str {
        match self {
            NoteField::Transcription => "Transcription",
            NoteField::Summary => "Summary",
            NoteField::Assessment(code) => code.label(),
        }
    }
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NoteField {
    type Err = ScribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transcription" => Ok(NoteField::Transcription),
            "summary" => Ok(NoteField::Summary),
            other => other
                .parse::<ItemCode>()
                .map(NoteField::Assessment)
                .map_err(|_| ScribeError::InvalidInput(format!("unknown note field: '{s}'"))),
        }
    }
}

/// Editable state of a note.
///
/// `baseline` is the last server state loaded into or saved from the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateNoteForm {
    values: UpdateNoteBody,
    baseline: UpdateNoteBody,
}

impl UpdateNoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every value with the server's copy, discarding unsaved edits.
    pub fn reset(&mut self, note: &Note) {
        self.values = note.editable_fields();
        self.baseline = self.values.clone();
    }

    pub fn value(&self, field: NoteField) -> &str {
        match field {
            NoteField::Transcription => &self.values.transcription,
            NoteField::Summary => &self.values.summary,
            NoteField::Assessment(code) => self.values.assessment.get(code),
        }
    }

    /// Sets any field without checking it against the catalog.
    pub fn set(&mut self, field: NoteField, value: impl Into<String>) {
        let value = value.into();
        match field {
            NoteField::Transcription => self.values.transcription = value,
            NoteField::Summary => self.values.summary = value,
            NoteField::Assessment(code) => self.values.assessment.set(code, value),
        }
    }

    /// Picks an answer for `code`, as a selection control would: only offered values are taken.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::InvalidInput`] if `value` is not an option of `code`.
    pub fn select(&mut self, catalog: &Catalog, code: ItemCode, value: &str) -> ScribeResult<()> {
        if !catalog.is_offered(code, value) {
            let item = catalog.item(code);
            return Err(ScribeError::InvalidInput(format!(
                "'{value}' is not an option for {}; choose 0-{}",
                item.heading(),
                item.options.len() - 1
            )));
        }
        self.set(NoteField::Assessment(code), value);
        Ok(())
    }

    /// Whether any value differs from the last loaded or saved state.
    pub fn is_dirty(&self) -> bool {
        self.values != self.baseline
    }

    /// Records the current values as saved.
    pub fn mark_saved(&mut self) {
        self.baseline = self.values.clone();
    }

    /// Requires every field to be non-empty.
    pub fn validate(&self) -> Result<UpdateNoteBody, FormErrors<NoteField>> {
        let mut errors = FormErrors::new();
        for field in NoteField::ALL {
            if self.value(field).is_empty() {
                errors.insert(field, format!("{} is required", field.label()));
            }
        }

        if errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_note;

    #[test]
    fn reset_replaces_unsaved_edits() {
        let note = sample_note("n1", "p1");
        let mut form = UpdateNoteForm::new();
        form.set(NoteField::Summary, "draft");

        form.reset(&note);

        assert_eq!(form.value(NoteField::Summary), note.summary);
        assert_eq!(form.value(NoteField::Assessment(ItemCode::M1830)), "3");
        assert!(!form.is_dirty());
    }

    #[test]
    fn every_empty_field_is_reported() {
        let errors = UpdateNoteForm::new().validate().unwrap_err();
        assert_eq!(errors.len(), 9);
        assert_eq!(
            errors.get(NoteField::Transcription),
            Some("Transcription is required")
        );
        assert_eq!(
            errors.get(NoteField::Assessment(ItemCode::M1850)),
            Some("M1850 is required")
        );
    }

    #[test]
    fn each_field_alone_blocks_submission() {
        let note = sample_note("n1", "p1");
        for field in NoteField::ALL {
            let mut form = UpdateNoteForm::new();
            form.reset(&note);
            form.set(field, "");

            let errors = form.validate().expect_err("empty field must block");
            assert_eq!(errors.len(), 1, "{field}");
            assert!(errors.get(field).is_some(), "{field}");
        }
    }

    #[test]
    fn whitespace_counts_as_content() {
        let mut form = UpdateNoteForm::new();
        form.reset(&sample_note("n1", "p1"));
        form.set(NoteField::Summary, " ");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn validation_does_not_check_options() {
        let mut form = UpdateNoteForm::new();
        form.reset(&sample_note("n1", "p1"));
        form.set(NoteField::Assessment(ItemCode::M1800), "9");

        let body = form.validate().unwrap();
        assert_eq!(body.assessment.m1800, "9");
    }

    #[test]
    fn select_only_takes_offered_values() {
        let catalog = Catalog::section_g().unwrap();
        let mut form = UpdateNoteForm::new();
        form.reset(&sample_note("n1", "p1"));

        form.select(&catalog, ItemCode::M1830, "6").unwrap();
        assert_eq!(form.value(NoteField::Assessment(ItemCode::M1830)), "6");
        assert!(form.is_dirty());

        let err = form.select(&catalog, ItemCode::M1800, "4").unwrap_err();
        assert!(matches!(err, ScribeError::InvalidInput(msg) if msg.contains("choose 0-3")));
        assert_eq!(form.value(NoteField::Assessment(ItemCode::M1800)), "2");
    }

    #[test]
    fn mark_saved_clears_dirty_state() {
        let mut form = UpdateNoteForm::new();
        form.reset(&sample_note("n1", "p1"));
        form.set(NoteField::Transcription, "Edited");
        assert!(form.is_dirty());

        form.mark_saved();
        assert!(!form.is_dirty());
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("Summary".parse::<NoteField>().unwrap(), NoteField::Summary);
        assert_eq!(
            "m1840".parse::<NoteField>().unwrap(),
            NoteField::Assessment(ItemCode::M1840)
        );
        assert!("m1845".parse::<NoteField>().is_err());
    }
}
