//! Audio files attached to new notes.
//!
//! The media type decides whether the create-note form accepts a file. It is detected from the
//! content first (magic bytes) and falls back to the file extension, which is what a browser
//! would report for a file picked from disk. Containers such as WebM hold audio or video, so for
//! those an audio extension wins over the sniffed `video/*` type.

use crate::{ScribeError, ScribeResult};
use api_client::AudioUpload;
use scribe_types::NonEmptyText;
use std::path::Path;

/// Media type sent when nothing better is known.
const OCTET_STREAM: &str = "application/octet-stream";

const AUDIO_EXTENSIONS: &[(&str, &str)] = &[
    ("aac", "audio/aac"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    ("mp3", "audio/mpeg"),
    ("oga", "audio/ogg"),
    ("ogg", "audio/ogg"),
    ("opus", "audio/opus"),
    ("wav", "audio/wav"),
    ("weba", "audio/webm"),
];

/// A file picked for upload, held in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioFile {
    file_name: NonEmptyText,
    media_type: Option<NonEmptyText>,
    bytes: Vec<u8>,
}

impl AudioFile {
    /// Reads `path` and detects its media type.
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::AudioRead`] if the file cannot be read, or
    /// [`ScribeError::InvalidInput`] if the path has no file name.
    pub fn load(path: &Path) -> ScribeResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ScribeError::InvalidInput(format!("not a file path: {}", path.display()))
            })?
            .to_owned();

        let bytes = std::fs::read(path).map_err(|source| ScribeError::AudioRead {
            path: path.to_path_buf(),
            source,
        })?;

        let file = Self::from_bytes(&file_name, bytes)?;
        tracing::debug!(
            "loaded {} ({} bytes, {})",
            file.file_name,
            file.bytes.len(),
            file.media_type().unwrap_or("unknown type")
        );
        Ok(file)
    }

    /// Wraps in-memory content under `file_name`.
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> ScribeResult<Self> {
        let file_name = NonEmptyText::new(file_name)?;
        let media_type = detect_media_type(file_name.as_str(), &bytes);
        Ok(Self {
            file_name,
            media_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Detected media type, if any.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_ref().map(NonEmptyText::as_str)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the media type starts with `audio/`.
    pub fn is_audio(&self) -> bool {
        self.media_type().is_some_and(|m| m.starts_with("audio/"))
    }

    pub fn to_upload(&self) -> AudioUpload {
        AudioUpload {
            file_name: self.file_name.to_string(),
            media_type: self.media_type().unwrap_or(OCTET_STREAM).to_owned(),
            bytes: self.bytes.clone(),
        }
    }
}

/// Containers that carry either audio or video; the content alone cannot tell which.
const SHARED_CONTAINERS: &[&str] = &["video/webm", "video/mp4", "video/ogg", "video/x-matroska"];

fn detect_media_type(file_name: &str, bytes: &[u8]) -> Option<NonEmptyText> {
    let by_extension = extension_media_type(file_name);

    match infer::get(bytes).map(|kind| kind.mime_type()) {
        Some(sniffed) if SHARED_CONTAINERS.contains(&sniffed) => {
            by_extension.or(Some(sniffed)).and_then(|m| NonEmptyText::new(m).ok())
        }
        Some(sniffed) => NonEmptyText::new(sniffed).ok(),
        None => by_extension.and_then(|m| NonEmptyText::new(m).ok()),
    }
}

fn extension_media_type(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    AUDIO_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}
