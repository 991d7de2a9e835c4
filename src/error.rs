use derive_more::{Display, From};

use crate::core::{GenerationError, TranscriptError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
    #[display("{_0}")]
    Custom(String),

    #[from]
    #[display("{_0}")]
    Transcript(TranscriptError),

    #[from]
    #[display("{_0}")]
    Generation(GenerationError),

    #[from]
    #[display("I/O error: {_0}")]
    Io(std::io::Error),

    #[from]
    #[display("JSON error: {_0}")]
    Json(serde_json::Error),
}

impl Error {
    pub fn custom(val: impl std::fmt::Display) -> Self {
        Self::Custom(val.to_string())
    }
}

impl std::error::Error for Error {}
