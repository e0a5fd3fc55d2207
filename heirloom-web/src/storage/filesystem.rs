//! Filesystem storage backend
//!
//! Lays assets out as `<media_root>/<destination>/<key>` and serves them
//! back through the service's static media route. Writes are atomic
//! (temp file + rename) so a crashed submission never leaves a
//! half-written object under a valid key.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use super::{Destination, StorageBackend, StorageError};

/// Filesystem-backed storage rooted in the configured media directory
pub struct FilesystemStore {
    media_root: PathBuf,
    /// URL prefix under which media_root is served (e.g. "/media")
    public_base: String,
}

impl FilesystemStore {
    pub fn new(media_root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            media_root: media_root.into(),
            public_base: public_base.into(),
        }
    }

    /// Create every destination directory, failing early on a
    /// misconfigured media root rather than on the first submission
    pub async fn ensure_destinations(&self) -> Result<(), StorageError> {
        for destination in Destination::ALL {
            let dir = self.media_root.join(destination.as_str());
            fs::create_dir_all(&dir).await.map_err(|e| {
                StorageError::DestinationUnavailable {
                    destination: destination.as_str(),
                    reason: format!("create_dir_all({}): {}", dir.display(), e),
                }
            })?;
        }
        Ok(())
    }

    fn object_path(&self, destination: Destination, key: &str) -> PathBuf {
        self.media_root.join(destination.as_str()).join(key)
    }

    fn public_url(&self, destination: Destination, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_base.trim_end_matches('/'),
            destination.as_str(),
            key
        )
    }
}

#[async_trait]
impl StorageBackend for FilesystemStore {
    async fn put(
        &self,
        destination: Destination,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.object_path(destination, key);
        debug!(
            destination = %destination,
            key = %key,
            size = data.len(),
            content_type = %content_type,
            "storage: put"
        );

        let dir = match path.parent() {
            Some(dir) => dir,
            None => {
                return Err(StorageError::DestinationUnavailable {
                    destination: destination.as_str(),
                    reason: "object path has no parent directory".to_string(),
                })
            }
        };
        if !dir.is_dir() {
            return Err(StorageError::DestinationUnavailable {
                destination: destination.as_str(),
                reason: format!("{} does not exist", dir.display()),
            });
        }

        if self.exists(destination, key).await? {
            return Err(StorageError::AlreadyExists {
                destination: destination.as_str(),
                key: key.to_string(),
            });
        }

        // Atomic write: temp file + rename
        let temp_path = path.with_extension("tmp");
        let write_result = async {
            fs::write(&temp_path, data).await?;
            fs::rename(&temp_path, &path).await
        }
        .await;

        if let Err(e) = write_result {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::WriteFailed {
                destination: destination.as_str(),
                key: key.to_string(),
                source: e,
            });
        }

        Ok(self.public_url(destination, key))
    }

    async fn exists(&self, destination: Destination, key: &str) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.object_path(destination, key))
            .await
            .unwrap_or(false))
    }
}

/// Path safety for storage keys: keep only the final path component so a
/// hostile filename hint cannot escape the destination directory
pub fn sanitize_key_component(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
