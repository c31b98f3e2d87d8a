//! Maps URL paths to pages.
//!
//! Routes:
//! - `/` notes list (with the new-note modal)
//! - `/note/:noteId` note detail and edit
//!
//! Every route renders inside the same layout shell; see [`crate::render`].

use scribe_types::ResourceId;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    NotesList,
    /// The raw `:noteId` segment; the page decides whether it names a note.
    NoteDetails { note_id: String },
    NotFound { path: String },
}

impl Route {
    /// Resolves a path such as `/note/abc?tab=1`.
    ///
    /// Query strings, fragments and a trailing slash are ignored.
    pub fn parse(path: &str) -> Self {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Route::NotesList;
        }

        let segments: Vec<&str> = trimmed.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["note", note_id] if !note_id.is_empty() => Route::NoteDetails {
                note_id: (*note_id).to_owned(),
            },
            _ => Route::NotFound {
                path: path.to_owned(),
            },
        }
    }

    /// Route of a note's detail page.
    pub fn note(id: &ResourceId) -> Self {
        Route::NoteDetails {
            note_id: id.to_string(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::NotesList => "/".to_owned(),
            Route::NoteDetails { note_id } => format!("/note/{note_id}"),
            Route::NotFound { path } => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where a page asks the session to go next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    To(Route),
    /// One step back in history.
    Back,
}
