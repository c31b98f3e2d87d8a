//! OASIS Section G support for Scribe notes.
//!
//! This crate provides the item codes and wording of the seven Section G functional status items
//! (M1800 to M1860) that a note captures, so that the assessment form and the CLI present the same
//! closed set of answers the instrument defines.
//!
//! This crate focuses on:
//! - item identity and the API field name each item is transmitted under
//! - the embedded catalog of titles, descriptions and response options
//! - strict parsing of that catalog

pub mod catalog;
pub mod item;

pub use catalog::{AssessmentItem, Catalog, ResponseOption};
pub use item::ItemCode;

/// Errors returned by the `oasis` crate.
#[derive(Debug, thiserror::Error)]
pub enum OasisError {
    #[error("unknown Section G item: {0}")]
    UnknownItem(String),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Type alias for Results that can fail with an [`OasisError`].
pub type OasisResult<T> = Result<T, OasisError>;
