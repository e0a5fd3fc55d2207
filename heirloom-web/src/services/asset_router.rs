//! Asset routing
//!
//! Given a binary payload and its declared category, selects a storage
//! destination, generates a collision-resistant key, and writes the payload
//! exactly once through the storage backend.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::models::AssetUpload;
use crate::services::category_normalizer;
use crate::storage::{filesystem, Destination, StorageBackend, StorageError, StoredObject};

/// Extensions routed to the photos destination
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
/// Extensions routed to the audio destination
const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "ogg", "m4a", "webm"];
/// Extensions routed to the video destination
const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mov", "avi"];

/// Routes assets to storage destinations
#[derive(Clone)]
pub struct AssetRouter {
    backend: Arc<dyn StorageBackend>,
}

impl AssetRouter {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Store an asset and return its durable address
    ///
    /// The write happens exactly once; key collisions are avoided by the
    /// timestamp prefix, not by retries. A failed write propagates: a
    /// record referencing a missing asset is worse than no record.
    pub async fn store(
        &self,
        upload: &AssetUpload,
        declared_category: &str,
    ) -> Result<StoredObject, StorageError> {
        let destination =
            select_destination(declared_category, upload.filename_hint.as_deref());
        let key = storage_key(upload.filename_hint.as_deref(), Utc::now().timestamp_millis());
        let content_type = upload
            .content_type_hint
            .clone()
            .unwrap_or_else(|| content_type_for(&key).to_string());

        let url = self
            .backend
            .put(destination, &key, &upload.data, &content_type)
            .await?;

        info!(
            destination = %destination,
            key = %key,
            size = upload.data.len(),
            "Asset stored"
        );

        Ok(StoredObject {
            destination,
            key,
            url,
        })
    }
}

/// Select the storage destination for an asset
///
/// Precedence: declared category (normalized) for the asset-bearing
/// categories, then filename extension, then the generic documents
/// destination.
pub fn select_destination(declared_category: &str, filename_hint: Option<&str>) -> Destination {
    match category_normalizer::normalize(declared_category) {
        "photo" => return Destination::Photos,
        "audio_recording" => return Destination::Audio,
        "video" => return Destination::Video,
        _ => {}
    }

    if let Some(ext) = filename_hint.and_then(extension_of) {
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return Destination::Photos;
        }
        if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            return Destination::Audio;
        }
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            return Destination::Video;
        }
    }

    Destination::Documents
}

/// Generate a storage key: timestamp prefix plus the original filename,
/// or a synthetic recording name when no filename was given
pub fn storage_key(filename_hint: Option<&str>, timestamp_millis: i64) -> String {
    match filename_hint
        .map(filesystem::sanitize_key_component)
        .filter(|name| !name.is_empty())
    {
        Some(name) => format!("{}-{}", timestamp_millis, name),
        None => format!("recording-{}.webm", timestamp_millis),
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Content type hint derived from the key's extension
pub fn content_type_for(key: &str) -> &'static str {
    match extension_of(key).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("webm") => "audio/webm",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_category_takes_precedence_over_extension() {
        // A photo category routes to photos even with an audio extension
        assert_eq!(
            select_destination("photo", Some("voice-note.mp3")),
            Destination::Photos
        );
        // Alias spellings count as declared categories too
        assert_eq!(
            select_destination("recording", Some("notes.txt")),
            Destination::Audio
        );
        assert_eq!(select_destination("video", None), Destination::Video);
    }

    #[test]
    fn extension_routes_when_category_is_not_asset_bearing() {
        for name in ["a.jpg", "b.JPEG", "c.png", "d.gif"] {
            assert_eq!(
                select_destination("letter", Some(name)),
                Destination::Photos,
                "{name}"
            );
        }
        for name in ["a.mp3", "b.wav", "c.ogg", "d.m4a", "e.webm"] {
            assert_eq!(
                select_destination("letter", Some(name)),
                Destination::Audio,
                "{name}"
            );
        }
        for name in ["a.mp4", "b.mov", "c.avi"] {
            assert_eq!(
                select_destination("letter", Some(name)),
                Destination::Video,
                "{name}"
            );
        }
    }

    #[test]
    fn unrecognized_input_falls_back_to_documents() {
        assert_eq!(
            select_destination("letter", Some("scan.pdf")),
            Destination::Documents
        );
        assert_eq!(
            select_destination("letter", Some("no_extension")),
            Destination::Documents
        );
        assert_eq!(select_destination("letter", None), Destination::Documents);
    }

    #[test]
    fn storage_key_is_timestamp_prefixed() {
        assert_eq!(storage_key(Some("photo.jpg"), 1700000000000), "1700000000000-photo.jpg");
    }

    #[test]
    fn storage_key_without_hint_is_synthetic_recording_name() {
        assert_eq!(storage_key(None, 1700000000000), "recording-1700000000000.webm");
        assert_eq!(storage_key(Some(""), 1700000000000), "recording-1700000000000.webm");
    }

    #[test]
    fn storage_key_strips_directories_from_hints() {
        assert_eq!(
            storage_key(Some("../../etc/passwd"), 42),
            "42-passwd"
        );
    }

    #[test]
    fn content_types_for_common_extensions() {
        assert_eq!(content_type_for("1-photo.jpg"), "image/jpeg");
        assert_eq!(content_type_for("recording-1.webm"), "audio/webm");
        assert_eq!(content_type_for("1-letter.pdf"), "application/pdf");
        assert_eq!(content_type_for("mystery"), "application/octet-stream");
    }
}
