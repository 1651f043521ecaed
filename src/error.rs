use thiserror::Error;

use crate::document::DocumentError;
use crate::validate::ShapeError;

/// Why an import was declined. In every case the current state is kept.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read import file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Import file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Import file does not match the category layout: {0}")]
    Invalid(#[from] ShapeError),

    #[error("Failed to save imported data: {0:#}")]
    Store(anyhow::Error),
}

impl ImportError {
    /// The short message shown to the user; details go to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Read(_) | Self::Parse(_) => "Error while reading file.",
            Self::Invalid(_) => "Data invalid.",
            Self::Store(_) => "Could not save data.",
        }
    }
}

impl From<DocumentError> for ShapeError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::NotAnObject => Self::NotAnObject,
            DocumentError::Missing { path } => Self::NotAMapping { path },
            DocumentError::TotalOverflow => Self::TotalOverflow,
        }
    }
}

impl From<DocumentError> for ImportError {
    fn from(e: DocumentError) -> Self {
        Self::Invalid(e.into())
    }
}
