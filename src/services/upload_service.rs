use std::path::Path;

use axum::{
    extract::Request,
    http::{header, HeaderMap},
};
use bytes::BytesMut;
use futures::{stream, StreamExt};
use multer::{Constraints, Field, Multipart, SizeLimit};
use tracing::{debug, info, warn};

use crate::{
    application::{error::UploadError, services::StorageService},
    domain::{config::tool::ToolConfig, models::uploaded_file::UploadedFile},
    services::{
        local_storage::LocalStorageService,
        random_name::RandomNameGenerator,
        sniff::{detect_content_type, SNIFF_LEN},
    },
};

/// Length of the random part of a renamed file.
pub const RANDOM_NAME_LEN: usize = 25;

/// Turns `multipart/form-data` requests into stored files.
///
/// Every part carrying a filename is treated as a file, whatever its field
/// name. Its type is sniffed from the first bytes of content and checked
/// against [`ToolConfig::allowed_file_types`]; the type declared by the client
/// is ignored. Processing stops at the first failing part. Files stored for
/// earlier parts of the same request are left in place, except when the body
/// exceeds the size limit: then every file of the request is removed.
#[derive(Debug, Clone, Default)]
pub struct UploadProcessor {
    pub config: ToolConfig,
    pub name_generator: RandomNameGenerator,
}

impl UploadProcessor {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            config,
            name_generator: RandomNameGenerator::default(),
        }
    }

    /// Stores every file part of `request` in `destination_directory`,
    /// creating the directory before the first file is written.
    ///
    /// With `rename_file` each file gets a random name that keeps the original
    /// extension; otherwise the client's name is used and an existing file of
    /// that name is overwritten.
    pub async fn upload_files(
        &self,
        request: Request,
        destination_directory: impl AsRef<Path>,
        rename_file: bool,
    ) -> Result<Vec<UploadedFile>, UploadError> {
        let storage = LocalStorageService::new(destination_directory.as_ref());
        self.upload_files_to(request, &storage, rename_file).await
    }

    /// Like [`upload_files`](Self::upload_files) but returns only the first
    /// stored file, failing with `NoFileProvided` when there is none.
    pub async fn upload_one_file(
        &self,
        request: Request,
        destination_directory: impl AsRef<Path>,
        rename_file: bool,
    ) -> Result<UploadedFile, UploadError> {
        let storage = LocalStorageService::new(destination_directory.as_ref());
        self.upload_one_file_to(request, &storage, rename_file).await
    }

    pub async fn upload_one_file_to(
        &self,
        request: Request,
        storage: &dyn StorageService,
        rename_file: bool,
    ) -> Result<UploadedFile, UploadError> {
        self.upload_files_to(request, storage, rename_file)
            .await?
            .into_iter()
            .next()
            .ok_or(UploadError::NoFileProvided)
    }

    pub async fn upload_files_to(
        &self,
        request: Request,
        storage: &dyn StorageService,
        rename_file: bool,
    ) -> Result<Vec<UploadedFile>, UploadError> {
        let limit = self.config.effective_max_upload_size();
        let boundary = multipart_boundary(request.headers())?;
        check_declared_length(request.headers(), limit)?;

        let constraints = Constraints::new().size_limit(SizeLimit::new().whole_stream(limit));
        let multipart = Multipart::with_constraints(
            request.into_body().into_data_stream(),
            boundary,
            constraints,
        );

        let mut uploaded_files = Vec::new();

        match self
            .store_parts(multipart, storage, rename_file, &mut uploaded_files)
            .await
        {
            Ok(()) => Ok(uploaded_files),
            Err(err @ UploadError::PayloadTooLarge { .. }) => {
                warn!(
                    "Request body exceeded {} bytes, discarding {} stored file(s)",
                    limit,
                    uploaded_files.len()
                );
                discard_stored(storage, &uploaded_files).await;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Stores file parts in stream order, pushing each record as soon as its
    /// content is written. The destination is prepared before the first write.
    async fn store_parts(
        &self,
        mut multipart: Multipart<'_>,
        storage: &dyn StorageService,
        rename_file: bool,
        uploaded_files: &mut Vec<UploadedFile>,
    ) -> Result<(), UploadError> {
        let mut prepared = false;

        while let Some(mut field) = multipart.next_field().await? {
            let Some(original_file_name) = client_file_name(field.file_name())? else {
                debug!("Skipping form field {:?}", field.name());
                continue;
            };

            let prefix = read_prefix(&mut field).await?;
            let mime_type = detect_content_type(&prefix);

            if !self.config.allows(mime_type) {
                warn!(
                    "Rejected '{}': sniffed type '{}' is not allowed",
                    original_file_name, mime_type
                );
                return Err(UploadError::UnsupportedFileType {
                    mime_type: mime_type.to_string(),
                    file_name: original_file_name,
                });
            }

            if !prepared {
                storage.prepare().await?;
                prepared = true;
            }

            let new_file_name = self.destination_name(&original_file_name, rename_file);

            // The sniffed prefix is replayed ahead of the rest of the part.
            let head = stream::iter((!prefix.is_empty()).then(|| Ok(prefix.freeze())));
            let rest = field.map(|chunk| chunk.map_err(UploadError::from));
            let file_size = storage
                .store(&new_file_name, head.chain(rest).boxed())
                .await?;

            info!(
                "Stored '{}' as '{}' ({} bytes, {})",
                original_file_name, new_file_name, file_size, mime_type
            );

            uploaded_files.push(UploadedFile::new(
                original_file_name,
                new_file_name,
                file_size,
            ));
        }

        Ok(())
    }

    fn destination_name(&self, original_file_name: &str, rename_file: bool) -> String {
        if !rename_file {
            return original_file_name.to_string();
        }

        let random = self.name_generator.generate(RANDOM_NAME_LEN);
        match file_extension(original_file_name) {
            Some(extension) => format!("{}.{}", random, extension),
            None => random,
        }
    }
}

fn multipart_boundary(headers: &HeaderMap) -> Result<String, UploadError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .ok_or_else(|| {
            UploadError::InvalidRequestFormat("missing Content-Type header".to_string())
        })?
        .to_str()
        .map_err(|_| {
            UploadError::InvalidRequestFormat("unreadable Content-Type header".to_string())
        })?;

    multer::parse_boundary(content_type).map_err(|e| {
        UploadError::InvalidRequestFormat(format!(
            "expected multipart/form-data with a boundary, got '{}': {}",
            content_type, e
        ))
    })
}

fn check_declared_length(headers: &HeaderMap, limit: u64) -> Result<(), UploadError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    match declared {
        Some(length) if length > limit => {
            warn!("Rejected upload of {} bytes, limit is {}", length, limit);
            Err(UploadError::PayloadTooLarge { limit })
        }
        _ => Ok(()),
    }
}

/// Reduces a client-supplied filename to its final path component.
///
/// `None` means the part is a plain form field.
fn client_file_name(raw: Option<&str>) -> Result<Option<String>, UploadError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    let base = raw
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(raw);

    let trimmed = base.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(UploadError::InvalidRequestFormat(format!(
            "invalid file name '{}'",
            raw
        )));
    }

    Ok(Some(base.to_string()))
}

/// Removes the files stored so far by a request that was cut short.
async fn discard_stored(storage: &dyn StorageService, uploaded_files: &[UploadedFile]) {
    for file in uploaded_files {
        if let Err(e) = storage.remove(&file.new_file_name).await {
            warn!("Failed to remove '{}': {}", file.new_file_name, e);
        }
    }
}

/// Last `.`-delimited segment of a file name, if non-empty.
fn file_extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension)
        .filter(|extension| !extension.is_empty())
}

async fn read_prefix(field: &mut Field<'_>) -> Result<BytesMut, UploadError> {
    let mut prefix = BytesMut::with_capacity(SNIFF_LEN);
    while prefix.len() < SNIFF_LEN {
        match field.chunk().await? {
            Some(chunk) => prefix.extend_from_slice(&chunk),
            None => break,
        }
    }
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_last_dot_segment() {
        assert_eq!(file_extension("img.png"), Some("png"));
        assert_eq!(file_extension("archive.tar.GZ"), Some("GZ"));
        assert_eq!(file_extension(".bashrc"), Some("bashrc"));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn client_file_name_strips_directories() {
        assert_eq!(
            client_file_name(Some("./test-data/img.png")).unwrap(),
            Some("img.png".to_string())
        );
        assert_eq!(
            client_file_name(Some("C:\\Users\\me\\photo.jpg")).unwrap(),
            Some("photo.jpg".to_string())
        );
        assert_eq!(
            client_file_name(Some("docs/ a b.txt ")).unwrap(),
            Some(" a b.txt ".to_string())
        );
        assert_eq!(client_file_name(None).unwrap(), None);
        assert_eq!(client_file_name(Some("")).unwrap(), None);
    }

    #[test]
    fn client_file_name_rejects_traversal_names() {
        for raw in ["..", "../", "uploads/.", "dir/", "dir/ ", " .. "] {
            assert!(matches!(
                client_file_name(Some(raw)),
                Err(UploadError::InvalidRequestFormat(_))
            ));
        }
    }

    #[test]
    fn renamed_files_keep_their_extension() {
        let processor = UploadProcessor::default();

        let name = processor.destination_name("img.png", true);
        assert_eq!(name.len(), RANDOM_NAME_LEN + ".png".len());
        assert!(name.ends_with(".png"));

        let name = processor.destination_name("Makefile", true);
        assert_eq!(name.len(), RANDOM_NAME_LEN);
        assert!(!name.contains('.'));

        assert_eq!(processor.destination_name("img.png", false), "img.png");
    }

    #[test]
    fn boundary_requires_multipart_content_type() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            multipart_boundary(&headers),
            Err(UploadError::InvalidRequestFormat(_))
        ));

        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert!(matches!(
            multipart_boundary(&headers),
            Err(UploadError::InvalidRequestFormat(_))
        ));

        headers.insert(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=XyZ".parse().unwrap(),
        );
        assert_eq!(multipart_boundary(&headers).unwrap(), "XyZ");
    }

    #[test]
    fn declared_length_over_limit_is_rejected() {
        let mut headers = HeaderMap::new();
        assert!(check_declared_length(&headers, 10).is_ok());

        headers.insert(header::CONTENT_LENGTH, "10".parse().unwrap());
        assert!(check_declared_length(&headers, 10).is_ok());

        headers.insert(header::CONTENT_LENGTH, "11".parse().unwrap());
        assert!(matches!(
            check_declared_length(&headers, 10),
            Err(UploadError::PayloadTooLarge { limit: 10 })
        ));
    }
}
