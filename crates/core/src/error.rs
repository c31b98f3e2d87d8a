use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScribeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("API error: {0}")]
    Api(#[from] api_client::ApiError),

    #[error("OASIS catalog error: {0}")]
    Oasis(#[from] oasis::OasisError),

    #[error("invalid text: {0}")]
    Text(#[from] scribe_types::TextError),

    #[error("failed to read audio file (path: {path}): {source}", path = path.display())]
    AudioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ScribeResult<T> = std::result::Result<T, ScribeError>;
