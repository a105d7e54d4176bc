use serde::{Deserialize, Serialize};

/// Metadata for one file part that was written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Name sent by the client, reduced to its final path component.
    #[serde(rename = "originalFileName")]
    pub original_file_name: String,
    /// Name the file was stored under.
    #[serde(rename = "newFileName")]
    pub new_file_name: String,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
}

impl UploadedFile {
    pub fn new(original_file_name: String, new_file_name: String, file_size: u64) -> Self {
        Self {
            original_file_name,
            new_file_name,
            file_size,
        }
    }

    pub fn was_renamed(&self) -> bool {
        self.original_file_name != self.new_file_name
    }
}
