pub mod local_storage;
pub mod random_name;
pub mod sniff;
pub mod upload_service;

pub use local_storage::LocalStorageService;
pub use random_name::{random_string, RandomNameGenerator};
pub use sniff::detect_content_type;
pub use upload_service::{UploadProcessor, RANDOM_NAME_LEN};
