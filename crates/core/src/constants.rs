//! Constants used throughout the Scribe core crate.
//!
//! User-facing messages live here so the forms, pages and tests agree on the exact wording.

/// API base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "SCRIBE_API_URL";

/// Application name shown in the layout header.
pub const APP_NAME: &str = "Scribe";

/// Summary preview length on the notes list.
pub const PREVIEW_LEN: usize = 50;

/// Short date format (`04/21/2024`).
pub const SHORT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Long date format (`April 21, 2024`).
pub const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

pub const PATIENT_REQUIRED: &str = "Patient is required";
pub const AUDIO_REQUIRED: &str = "Audio file is required";
pub const AUDIO_NOT_SUPPORTED: &str = "File not supported";

pub const NOTE_CREATED: &str = "Note created successfully";
pub const NOTE_CREATE_FAILED: &str = "Failed to create note";
pub const NOTE_UPDATED: &str = "Note updated successfully";
pub const NOTE_UPDATE_FAILED: &str = "Failed to update note";
pub const NOTE_NOT_FOUND: &str = "Note not found";
pub const PATIENT_NOT_FOUND: &str = "Patient not found";
pub const NO_NOTES: &str = "No notes found :(";
