use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::UploadError;

impl UploadError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UploadError::InvalidRequestFormat(_) | UploadError::NoFileProvided => {
                StatusCode::BAD_REQUEST
            }
            UploadError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::UnsupportedFileType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            UploadError::StorageUnavailable { .. } | UploadError::StorageWriteFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage paths stay in the logs, never in the response body.
        let error_message = match self {
            UploadError::StorageUnavailable { .. } | UploadError::StorageWriteFailed { .. } => {
                error!("Upload storage error: {}", self);
                "Internal server error".to_string()
            }
            ref client_error => {
                warn!("Upload rejected: {}", client_error);
                client_error.to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
