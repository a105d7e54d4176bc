use axum::{
    extract::{Request, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::{
    adapters::{
        dto::file_dto::{UploadFilesResponse, UploadedFileResponse},
        state::UploadState,
    },
    application::error::UploadError,
};

pub struct UploadController;

impl UploadController {
    /// POST /files
    pub async fn upload_files(
        State(state): State<UploadState>,
        request: Request,
    ) -> Result<(StatusCode, Json<UploadFilesResponse>), UploadError> {
        let files = state
            .processor
            .upload_files(
                request,
                state.destination_directory.as_path(),
                state.rename_files,
            )
            .await?;

        info!("Upload request stored {} file(s)", files.len());

        Ok((StatusCode::CREATED, Json(UploadFilesResponse::from(files))))
    }

    /// POST /file
    pub async fn upload_file(
        State(state): State<UploadState>,
        request: Request,
    ) -> Result<(StatusCode, Json<UploadedFileResponse>), UploadError> {
        let file = state
            .processor
            .upload_one_file(
                request,
                state.destination_directory.as_path(),
                state.rename_files,
            )
            .await?;

        Ok((StatusCode::CREATED, Json(UploadedFileResponse::from(file))))
    }
}

/// Routes for embedding the upload handlers into a larger router.
pub fn upload_routes(state: UploadState) -> Router {
    Router::new()
        .route("/files", post(UploadController::upload_files))
        .route("/file", post(UploadController::upload_file))
        .with_state(state)
}
