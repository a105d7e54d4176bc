use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::config::tool::ToolConfig;

/// Wire form of [`ToolConfig`]: every field optional, cleaned up by
/// [`ToolConfigDTO::sanitize`] before conversion.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ToolConfigDTO {
    #[serde(rename = "maxUploadSize")]
    pub max_upload_size: Option<u64>,
    #[serde(rename = "allowedFileTypes")]
    pub allowed_file_types: Option<Vec<String>>,
}

impl ToolConfigDTO {
    pub fn sanitize(&mut self) {
        if let Some(ref mut allowed_file_types) = self.allowed_file_types {
            for mime_type in allowed_file_types.iter_mut() {
                *mime_type = mime_type.trim().to_ascii_lowercase();
            }
            let mut seen = HashSet::new();
            allowed_file_types.retain(|s| !s.is_empty() && seen.insert(s.clone()));
        }
    }
}

impl From<ToolConfig> for ToolConfigDTO {
    fn from(value: ToolConfig) -> Self {
        ToolConfigDTO {
            max_upload_size: Some(value.max_upload_size),
            allowed_file_types: Some(value.allowed_file_types),
        }
    }
}

impl From<ToolConfigDTO> for ToolConfig {
    fn from(value: ToolConfigDTO) -> Self {
        ToolConfig {
            max_upload_size: value.max_upload_size.unwrap_or(0),
            allowed_file_types: value.allowed_file_types.unwrap_or_default(),
        }
    }
}

impl ToolConfig {
    /// Parses a JSON configuration document such as
    /// `{"maxUploadSize": 1048576, "allowedFileTypes": ["image/png"]}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut dto: ToolConfigDTO = serde_json::from_str(json)?;
        dto.sanitize();
        Ok(dto.into())
    }
}
