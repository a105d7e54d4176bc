use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};

use crate::application::{
    error::UploadError,
    services::{ByteStream, StorageService},
};

/// Stores uploads as plain files inside one directory.
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    async fn discard_partial(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            warn!("Could not remove partial upload {}: {}", path.display(), e);
        }
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn prepare(&self) -> Result<(), UploadError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| UploadError::StorageUnavailable {
                path: self.root.clone(),
                source,
            })?;

        let metadata =
            fs::metadata(&self.root)
                .await
                .map_err(|source| UploadError::StorageUnavailable {
                    path: self.root.clone(),
                    source,
                })?;

        if !metadata.is_dir() {
            return Err(UploadError::StorageUnavailable {
                path: self.root.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "destination is not a directory",
                ),
            });
        }

        Ok(())
    }

    async fn store(
        &self,
        file_name: &str,
        mut content: ByteStream<'_>,
    ) -> Result<u64, UploadError> {
        let path = self.path_for(file_name);

        let mut file = fs::File::create(&path).await.map_err(|source| {
            UploadError::StorageWriteFailed {
                path: path.clone(),
                source,
            }
        })?;

        let mut written: u64 = 0;
        while let Some(chunk) = content.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    drop(file);
                    self.discard_partial(&path).await;
                    return Err(e);
                }
            };

            file.write_all(&chunk)
                .await
                .map_err(|source| UploadError::StorageWriteFailed {
                    path: path.clone(),
                    source,
                })?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|source| UploadError::StorageWriteFailed {
                path: path.clone(),
                source,
            })?;

        debug!("Wrote {} bytes to {}", written, path.display());
        Ok(written)
    }

    async fn remove(&self, file_name: &str) -> Result<(), UploadError> {
        let path = self.path_for(file_name);
        fs::remove_file(&path)
            .await
            .map_err(|source| UploadError::StorageWriteFailed { path, source })
    }
}
