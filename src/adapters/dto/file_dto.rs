use serde::Serialize;

use crate::domain::models::uploaded_file::UploadedFile;

#[derive(Debug, Serialize)]
pub struct UploadedFileResponse {
    #[serde(rename = "originalFileName")]
    pub original_file_name: String,
    #[serde(rename = "newFileName")]
    pub new_file_name: String,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
}

impl From<UploadedFile> for UploadedFileResponse {
    fn from(file: UploadedFile) -> Self {
        Self {
            original_file_name: file.original_file_name,
            new_file_name: file.new_file_name,
            file_size: file.file_size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadFilesResponse {
    pub files: Vec<UploadedFileResponse>,
}

impl From<Vec<UploadedFile>> for UploadFilesResponse {
    fn from(files: Vec<UploadedFile>) -> Self {
        Self {
            files: files.into_iter().map(UploadedFileResponse::from).collect(),
        }
    }
}
