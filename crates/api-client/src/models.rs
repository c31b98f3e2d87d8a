//! Request and response payloads of the notes API.
//!
//! Field names follow the API's camelCase JSON. Resource payloads arrive wrapped in an envelope
//! (`{"message": ..., "<resource>": ...}`); the types here describe the unwrapped resource.

use chrono::{DateTime, NaiveDate, Utc};
use oasis::ItemCode;
use scribe_types::ResourceId;
use serde::{Deserialize, Deserializer, Serialize};

/// Row of `GET /patients`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub id: ResourceId,
    pub name: String,
    /// External identification number.
    pub patient_id: String,
}

/// Patient reference embedded in a [`NoteSummary`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NotePatient {
    pub id: ResourceId,
    pub name: String,
}

/// Row of `GET /notes`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub id: ResourceId,
    pub patient: NotePatient,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Full patient record from `GET /patient/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: ResourceId,
    pub name: String,
    #[serde(deserialize_with = "date_or_timestamp")]
    pub date_of_birth: NaiveDate,
    /// External identification number.
    pub patient_id: String,
}

/// The seven Section G answers of a note, as transmitted (`"0"`, `"1"`, ...).
///
/// Values are kept as strings; the client never coerces them to numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub m1800: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub m1810: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub m1820: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub m1830: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub m1840: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub m1850: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub m1860: String,
}

impl AssessmentFields {
    pub fn get(&self, code: ItemCode) -> &str {
        match code {
            ItemCode::M1800 => &self.m1800,
            ItemCode::M1810 => &self.m1810,
            ItemCode::M1820 => &self.m1820,
            ItemCode::M1830 => &self.m1830,
            ItemCode::M1840 => &self.m1840,
            ItemCode::M1850 => &self.m1850,
            ItemCode::M1860 => &self.m1860,
        }
    }

    pub fn set(&mut self, code: ItemCode, value: impl Into<String>) {
        let slot = match code {
            ItemCode::M1800 => &mut self.m1800,
            ItemCode::M1810 => &mut self.m1810,
            ItemCode::M1820 => &mut self.m1820,
            ItemCode::M1830 => &mut self.m1830,
            ItemCode::M1840 => &mut self.m1840,
            ItemCode::M1850 => &mut self.m1850,
            ItemCode::M1860 => &mut self.m1860,
        };
        *slot = value.into();
    }
}

/// Full note record from `GET /note/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: ResourceId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub transcription: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(flatten)]
    pub assessment: AssessmentFields,
    pub patient_id: ResourceId,
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// The nine editable fields, as they would be sent back unchanged.
    pub fn editable_fields(&self) -> UpdateNoteBody {
        UpdateNoteBody {
            transcription: self.transcription.clone(),
            summary: self.summary.clone(),
            assessment: self.assessment.clone(),
        }
    }
}

/// Body of `PUT /note/{id}`: a full replacement of the editable fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNoteBody {
    pub transcription: String,
    pub summary: String,
    #[serde(flatten)]
    pub assessment: AssessmentFields,
}

/// Audio attachment of a create-note request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioUpload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Body of `POST /note`, sent as `multipart/form-data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateNoteBody {
    pub patient_id: ResourceId,
    pub audio: AudioUpload,
}

/// Identifier returned by create and update.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NoteRef {
    pub id: ResourceId,
}

/// Treats an explicit `null` like an absent string.
///
/// Notes can be listed before transcription has filled them in.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (dates serialised from JS `Date`).
fn date_or_timestamp<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc).date_naive())
        .map_err(|_| serde::de::Error::custom(format!("invalid date of birth: '{raw}'")))
}
