//! # Scribe Core
//!
//! Page controllers and session logic for the Scribe clinical notes client.
//!
//! This crate contains everything between the typed API client and the terminal:
//! - routing and back-navigation history
//! - the notes list, new-note modal and note detail pages
//! - the create-note and update-note form schemas
//! - plain-text rendering inside the layout shell
//!
//! **No transport concerns**: HTTP, envelopes and wire payloads belong in `api-client`.

pub mod app;
pub mod audio;
pub mod config;
pub mod constants;
pub mod error;
pub mod forms;
pub mod notification;
pub mod pages;
pub mod render;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{App, Page};
pub use audio::AudioFile;
pub use config::CoreConfig;
pub use error::{ScribeError, ScribeResult};
pub use forms::{CreateNoteField, CreateNoteForm, FormErrors, NoteField, UpdateNoteForm};
pub use notification::{Level, Notification};
pub use router::{Navigation, Route};
