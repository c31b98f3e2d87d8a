//! # API Client
//!
//! Typed client for the Scribe notes REST API.
//!
//! Handles:
//! - a configured HTTP client bound to the API base URL
//! - envelope unwrapping (`{message, <resource>}`)
//! - one accessor per REST operation, behind the [`ScribeApi`] trait
//!
//! No retries, caching or pagination happen here.

#![warn(rust_2018_idioms)]

pub mod client;
pub mod models;
pub mod resources;

pub use client::HttpClient;
pub use models::{
    AssessmentFields, AudioUpload, CreateNoteBody, Note, NotePatient, NoteRef, NoteSummary,
    Patient, PatientSummary, UpdateNoteBody,
};
pub use reqwest::Url;
pub use resources::ScribeApi;

/// Errors returned by API accessors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method} {path} returned {status}: {message}")]
    Status {
        method: String,
        path: String,
        status: u16,
        message: String,
    },

    #[error("response envelope has no '{field}' field")]
    MissingField { field: &'static str },

    #[error("failed to decode '{field}': {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("response body is not JSON: {0}")]
    InvalidBody(serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the server answered 404 or the envelope carried no record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status: 404, .. } | ApiError::MissingField { .. }
        )
    }
}

/// Type alias for Results that can fail with an [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;
