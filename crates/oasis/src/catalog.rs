//! Section G catalog: item wording and response options.
//!
//! The catalog is embedded as YAML and translated into domain types on load.
//!
//! Responsibilities:
//! - Define public domain-level types for the assessment form
//! - Define a strict wire model for the embedded YAML
//! - Validate that every Section G item is present once, in order, with consecutive values

use crate::{ItemCode, OasisError, OasisResult};
use serde::Deserialize;

const SECTION_G_YAML: &str = include_str!("../catalog/section_g.yaml");

// ============================================================================
// Public domain-level types
// ============================================================================

/// One selectable answer of an item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseOption {
    /// Value sent to the API (`"0"`, `"1"`, ...).
    pub value: String,
    /// Clinical wording of the answer.
    pub text: String,
}

/// A Section G item with its wording and closed set of answers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssessmentItem {
    pub code: ItemCode,
    pub title: String,
    pub description: String,
    pub options: Vec<ResponseOption>,
}

impl AssessmentItem {
    /// Looks up the option with the given value.
    pub fn option(&self, value: &str) -> Option<&ResponseOption> {
        self.options.iter().find(|option| option.value == value)
    }

    /// `M1800. Grooming`
    pub fn heading(&self) -> String {
        format!("{}. {}", self.code.label(), self.title)
    }
}

/// The full Section G catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    pub title: String,
    items: Vec<AssessmentItem>,
}

impl Catalog {
    /// Loads the embedded Section G catalog.
    ///
    /// # Errors
    ///
    /// Returns [`OasisError`] if the embedded YAML does not match the wire schema or fails
    /// structural validation.
    pub fn section_g() -> OasisResult<Self> {
        Self::parse(SECTION_G_YAML)
    }

    /// Parse a catalog from YAML text.
    ///
    /// This uses `serde_path_to_error` to report the path of the failing field (for example
    /// `items[2].options`) when the YAML does not match the wire schema.
    pub fn parse(yaml_text: &str) -> OasisResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, CatalogWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(OasisError::Translation(format!(
                    "Catalog schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Items in presentation order.
    pub fn items(&self) -> &[AssessmentItem] {
        &self.items
    }

    /// Returns the item for `code`.
    ///
    /// Every code is present after a successful load.
    pub fn item(&self, code: ItemCode) -> &AssessmentItem {
        // Position in `items` equals position in `ItemCode::ALL`, checked in `wire_to_domain`.
        &self.items[code as usize]
    }

    /// Whether `value` is one of the answers offered for `code`.
    pub fn is_offered(&self, code: ItemCode, value: &str) -> bool {
        self.item(code).option(value).is_some()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogWire {
    section: String,
    title: String,
    items: Vec<ItemWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemWire {
    code: String,
    title: String,
    description: String,
    options: Vec<OptionWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionWire {
    value: String,
    text: String,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: CatalogWire) -> OasisResult<Catalog> {
    if wire.section != "G" {
        return Err(OasisError::InvalidCatalog(format!(
            "expected section G, got '{}'",
            wire.section
        )));
    }

    if wire.items.len() != ItemCode::ALL.len() {
        return Err(OasisError::InvalidCatalog(format!(
            "expected {} items, got {}",
            ItemCode::ALL.len(),
            wire.items.len()
        )));
    }

    let mut items = Vec::with_capacity(wire.items.len());
    for (expected, item) in ItemCode::ALL.into_iter().zip(wire.items) {
        let code: ItemCode = item.code.parse()?;
        if code != expected {
            return Err(OasisError::InvalidCatalog(format!(
                "expected {expected} at this position, got {code}"
            )));
        }

        if item.title.trim().is_empty() {
            return Err(OasisError::InvalidCatalog(format!("{code} has no title")));
        }

        if item.options.is_empty() {
            return Err(OasisError::InvalidCatalog(format!("{code} has no options")));
        }

        // Values are ordinal scores starting at zero.
        for (index, option) in item.options.iter().enumerate() {
            if option.value != index.to_string() {
                return Err(OasisError::InvalidCatalog(format!(
                    "{code} option {index} has value '{}'",
                    option.value
                )));
            }
            if option.text.trim().is_empty() {
                return Err(OasisError::InvalidCatalog(format!(
                    "{code} option {index} has no text"
                )));
            }
        }

        items.push(AssessmentItem {
            code,
            title: item.title,
            description: item.description.trim().to_owned(),
            options: item
                .options
                .into_iter()
                .map(|option| ResponseOption {
                    value: option.value,
                    text: option.text.trim().to_owned(),
                })
                .collect(),
        });
    }

    Ok(Catalog {
        title: wire.title,
        items,
    })
}
