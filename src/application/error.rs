use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid request format: {0}")]
    InvalidRequestFormat(String),

    #[error("Upload exceeds the maximum size of {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    #[error("File type '{mime_type}' is not allowed for '{file_name}'")]
    UnsupportedFileType { mime_type: String, file_name: String },

    #[error("No file was provided")]
    NoFileProvided,

    #[error("Storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    StorageWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<multer::Error> for UploadError {
    fn from(error: multer::Error) -> Self {
        match error {
            multer::Error::StreamSizeExceeded { limit } => UploadError::PayloadTooLarge { limit },
            other => UploadError::InvalidRequestFormat(other.to_string()),
        }
    }
}
