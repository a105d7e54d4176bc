use std::{path::PathBuf, sync::Arc};

use crate::services::upload_service::UploadProcessor;

/// Router state for the upload handlers.
#[derive(Clone)]
pub struct UploadState {
    pub processor: Arc<UploadProcessor>,
    pub destination_directory: Arc<PathBuf>,
    pub rename_files: bool,
}

impl UploadState {
    pub fn new(
        processor: UploadProcessor,
        destination_directory: impl Into<PathBuf>,
        rename_files: bool,
    ) -> Self {
        Self {
            processor: Arc::new(processor),
            destination_directory: Arc::new(destination_directory.into()),
            rename_files,
        }
    }
}
