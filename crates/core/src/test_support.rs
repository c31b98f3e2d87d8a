//! In-memory API double and fixtures for page tests.

use api_client::{
    ApiError, ApiResult, AssessmentFields, CreateNoteBody, Note, NotePatient, NoteRef,
    NoteSummary, Patient, PatientSummary, ScribeApi, UpdateNoteBody,
};
use chrono::{DateTime, NaiveDate, Utc};
use scribe_types::ResourceId;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    FetchPatients,
    FetchNotes,
    GetPatient(String),
    GetNote(String),
    CreateNote { patient_id: String, media_type: String },
    UpdateNote(String),
}

#[derive(Debug, Default)]
pub struct FakeApi {
    notes: Vec<NoteSummary>,
    patient_list: Vec<PatientSummary>,
    records: Mutex<BTreeMap<String, Note>>,
    patients: BTreeMap<String, Patient>,
    created_id: Option<String>,
    failing_reads: AtomicBool,
    failing_writes: AtomicBool,
    stalled_writes: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn with_notes(mut self, notes: Vec<NoteSummary>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_patients(mut self, patients: Vec<PatientSummary>) -> Self {
        self.patient_list = patients;
        self
    }

    pub fn with_note(self, note: Note) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(note.id.to_string(), note);
        self
    }

    pub fn with_patient(mut self, patient: Patient) -> Self {
        self.patients.insert(patient.id.to_string(), patient);
        self
    }

    pub fn with_created_id(mut self, id: &str) -> Self {
        self.created_id = Some(id.to_owned());
        self
    }

    pub fn failing_reads(self) -> Self {
        self.set_failing_reads(true);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.failing_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Writes never complete.
    pub fn stalled_writes(mut self) -> Self {
        self.stalled_writes = true;
        self
    }

    /// Switches read failures on or off after construction.
    pub fn set_failing_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, failing: &AtomicBool, method: &str, path: &str) -> ApiResult<()> {
        if failing.load(Ordering::SeqCst) {
            return Err(status(method, path, 500, "Internal Server Error"));
        }
        Ok(())
    }
}

fn status(method: &str, path: &str, status: u16, message: &str) -> ApiError {
    ApiError::Status {
        method: method.to_owned(),
        path: path.to_owned(),
        status,
        message: message.to_owned(),
    }
}

impl ScribeApi for FakeApi {
    async fn fetch_patients(&self) -> ApiResult<Vec<PatientSummary>> {
        self.record(Call::FetchPatients);
        self.check(&self.failing_reads, "GET", "/patients")?;
        Ok(self.patient_list.clone())
    }

    async fn fetch_notes(&self) -> ApiResult<Vec<NoteSummary>> {
        self.record(Call::FetchNotes);
        self.check(&self.failing_reads, "GET", "/notes")?;
        Ok(self.notes.clone())
    }

    async fn get_patient_by_id(&self, id: &ResourceId) -> ApiResult<Patient> {
        self.record(Call::GetPatient(id.to_string()));
        let path = format!("/patient/{id}");
        self.check(&self.failing_reads, "GET", &path)?;
        self.patients
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| status("GET", &path, 404, "Patient not found"))
    }

    async fn get_note_by_id(&self, id: &ResourceId) -> ApiResult<Note> {
        self.record(Call::GetNote(id.to_string()));
        let path = format!("/note/{id}");
        self.check(&self.failing_reads, "GET", &path)?;
        self.records
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or(ApiError::MissingField { field: "note" })
    }

    async fn create_note(&self, body: CreateNoteBody) -> ApiResult<NoteRef> {
        self.record(Call::CreateNote {
            patient_id: body.patient_id.to_string(),
            media_type: body.audio.media_type.clone(),
        });
        if self.stalled_writes {
            std::future::pending::<()>().await;
        }
        self.check(&self.failing_writes, "POST", "/note")?;
        let id = self.created_id.as_deref().unwrap_or("n-created");
        Ok(NoteRef {
            id: ResourceId::parse(id).unwrap(),
        })
    }

    async fn update_note(&self, id: &ResourceId, body: &UpdateNoteBody) -> ApiResult<NoteRef> {
        self.record(Call::UpdateNote(id.to_string()));
        let path = format!("/note/{id}");
        if self.stalled_writes {
            std::future::pending::<()>().await;
        }
        self.check(&self.failing_writes, "PUT", &path)?;

        let mut records = self.records.lock().unwrap();
        let note = records
            .get_mut(id.as_str())
            .ok_or_else(|| status("PUT", &path, 404, "Note not found"))?;
        note.transcription = body.transcription.clone();
        note.summary = body.summary.clone();
        note.assessment = body.assessment.clone();
        Ok(NoteRef { id: id.clone() })
    }
}

fn timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

/// A fully filled note created on April 21, 2024 (M1800 = 2, M1830 = 3).
pub fn sample_note(id: &str, patient_id: &str) -> Note {
    Note {
        id: ResourceId::parse(id).unwrap(),
        transcription: "Patient states they need help getting in and out of the tub.".into(),
        summary: "Needs assistance with bathing.".into(),
        assessment: AssessmentFields {
            m1800: "2".into(),
            m1810: "1".into(),
            m1820: "1".into(),
            m1830: "3".into(),
            m1840: "0".into(),
            m1850: "1".into(),
            m1860: "2".into(),
        },
        patient_id: ResourceId::parse(patient_id).unwrap(),
        created_at: timestamp("2024-04-21T14:03:00Z"),
    }
}

pub fn note_summary(id: &str, patient_name: &str, summary: &str, created_at: &str) -> NoteSummary {
    NoteSummary {
        id: ResourceId::parse(id).unwrap(),
        patient: NotePatient {
            id: ResourceId::parse(&format!("p-{id}")).unwrap(),
            name: patient_name.into(),
        },
        summary: summary.into(),
        created_at: timestamp(created_at),
    }
}

pub fn patient(id: &str, name: &str, date_of_birth: &str, identification: &str) -> Patient {
    Patient {
        id: ResourceId::parse(id).unwrap(),
        name: name.into(),
        date_of_birth: NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d").unwrap(),
        patient_id: identification.into(),
    }
}

pub fn patient_summary(id: &str, name: &str) -> PatientSummary {
    PatientSummary {
        id: ResourceId::parse(id).unwrap(),
        name: name.into(),
        patient_id: format!("ID-{id}"),
    }
}
