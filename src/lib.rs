//! Building blocks for accepting file uploads over HTTP.
//!
//! [`UploadProcessor`] reads a `multipart/form-data` request, checks each file
//! against a sniffed-type allow-list and a size limit, and writes it to a
//! directory, optionally under a random collision-resistant name.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod services;

pub use adapters::{controllers::upload_controller::upload_routes, state::UploadState};
pub use application::{
    error::UploadError,
    services::{ByteStream, StorageService},
};
pub use domain::{
    config::tool::{ToolConfig, DEFAULT_MAX_UPLOAD_SIZE},
    models::uploaded_file::UploadedFile,
};
pub use services::{
    detect_content_type, random_string, LocalStorageService, RandomNameGenerator,
    UploadProcessor,
};
