//! Asset storage destinations
//!
//! Stored binaries live in named destinations selected by content kind.
//! Writes go through the `StorageBackend` trait so tests can substitute
//! failing or in-memory backends for the filesystem implementation.

pub mod filesystem;

pub use filesystem::FilesystemStore;

use async_trait::async_trait;
use thiserror::Error;

/// Named storage destination for binary assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Photos,
    Audio,
    Video,
    Documents,
}

impl Destination {
    pub const ALL: [Destination; 4] = [
        Destination::Photos,
        Destination::Audio,
        Destination::Video,
        Destination::Documents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Photos => "photos",
            Destination::Audio => "audio",
            Destination::Video => "video",
            Destination::Documents => "documents",
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage errors
///
/// A failed asset write always propagates to the caller: a record pointing
/// at a missing asset is worse than no record.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Destination directory missing or not writable
    #[error("Destination {destination} unavailable: {reason}")]
    DestinationUnavailable {
        destination: &'static str,
        reason: String,
    },

    /// Write-once violation: the key is already present
    #[error("Object already exists: {destination}/{key}")]
    AlreadyExists {
        destination: &'static str,
        key: String,
    },

    /// Underlying write failure
    #[error("Storage write failed for {destination}/{key}: {source}")]
    WriteFailed {
        destination: &'static str,
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Durable address of a stored asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub destination: Destination,
    pub key: String,
    /// Publicly resolvable retrieval address
    pub url: String,
}

/// Write-once storage for binary assets
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Write `data` under `key` in `destination`, exactly once.
    ///
    /// Returns the public URL for later retrieval. An existing key is an
    /// error, never an overwrite; callers avoid collisions with
    /// timestamp-prefixed keys rather than retries.
    async fn put(
        &self,
        destination: Destination,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Check whether `key` is already present in `destination`
    async fn exists(&self, destination: Destination, key: &str) -> Result<bool, StorageError>;
}
