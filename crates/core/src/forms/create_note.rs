//! Create-note form: a patient and an audio recording.

use super::FormErrors;
use crate::audio::AudioFile;
use crate::constants::{AUDIO_NOT_SUPPORTED, AUDIO_REQUIRED, PATIENT_REQUIRED};
use api_client::CreateNoteBody;
use scribe_types::ResourceId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CreateNoteField {
    PatientId,
    Audio,
}

impl CreateNoteField {
    pub fn label(self) -> &'static str {
        match self {
            CreateNoteField::PatientId => "Patient",
            CreateNoteField::Audio => "Upload audio file",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateNoteForm {
    patient_id: Option<ResourceId>,
    audio: Option<AudioFile>,
}

impl CreateNoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_patient(&mut self, patient_id: ResourceId) {
        self.patient_id = Some(patient_id);
    }

    pub fn set_audio(&mut self, audio: AudioFile) {
        self.audio = Some(audio);
    }

    pub fn patient_id(&self) -> Option<&ResourceId> {
        self.patient_id.as_ref()
    }

    pub fn audio(&self) -> Option<&AudioFile> {
        self.audio.as_ref()
    }

    /// Checks both fields and builds the multipart body.
    ///
    /// The patient is only checked for presence; whether it exists is up to the selection that
    /// produced it.
    pub fn validate(&self) -> Result<CreateNoteBody, FormErrors<CreateNoteField>> {
        let mut errors = FormErrors::new();

        if self.patient_id.is_none() {
            errors.insert(CreateNoteField::PatientId, PATIENT_REQUIRED);
        }

        match &self.audio {
            None => errors.insert(CreateNoteField::Audio, AUDIO_REQUIRED),
            Some(audio) if !audio.is_audio() => {
                errors.insert(CreateNoteField::Audio, AUDIO_NOT_SUPPORTED)
            }
            Some(_) => {}
        }

        match (&self.patient_id, &self.audio) {
            (Some(patient_id), Some(audio)) if errors.is_empty() => Ok(CreateNoteBody {
                patient_id: patient_id.clone(),
                audio: audio.to_upload(),
            }),
            _ => Err(errors),
        }
    }
}
