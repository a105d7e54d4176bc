use serde::{Deserialize, Serialize};

/// Upload limit applied when `max_upload_size` is left at zero (1 GiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 1024 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ToolConfig {
    /// Maximum size of a whole multipart body in bytes. Zero means
    /// [`DEFAULT_MAX_UPLOAD_SIZE`].
    #[serde(rename = "maxUploadSize", default)]
    pub max_upload_size: u64,
    /// Sniffed MIME types accepted for upload. Empty accepts everything.
    #[serde(rename = "allowedFileTypes", default)]
    pub allowed_file_types: Vec<String>,
}

impl ToolConfig {
    pub fn new(max_upload_size: u64, allowed_file_types: Vec<String>) -> Self {
        Self {
            max_upload_size,
            allowed_file_types,
        }
    }

    pub fn effective_max_upload_size(&self) -> u64 {
        if self.max_upload_size == 0 {
            DEFAULT_MAX_UPLOAD_SIZE
        } else {
            self.max_upload_size
        }
    }

    /// Checks a sniffed type against the allow-list.
    ///
    /// An entry matches either the full sniffed value (`text/plain; charset=utf-8`)
    /// or its essence (`text/plain`), ignoring ASCII case.
    pub fn allows(&self, mime_type: &str) -> bool {
        if self.allowed_file_types.is_empty() {
            return true;
        }

        let essence = mime_type.split(';').next().unwrap_or(mime_type).trim();

        self.allowed_file_types.iter().any(|allowed| {
            let allowed = allowed.trim();
            allowed.eq_ignore_ascii_case(mime_type) || allowed.eq_ignore_ascii_case(essence)
        })
    }
}
