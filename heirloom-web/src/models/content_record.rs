//! Archived content record
//!
//! The unit of archived material. Created exactly once per submission by the
//! record assembler and never mutated by this pipeline afterward.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Submission channel that produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Typed memory submitted through the write form
    WebForm,
    /// Browser-recorded audio
    WebRecording,
    /// Generic file upload form
    WebUpload,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::WebForm => "web_form",
            Channel::WebRecording => "web_recording",
            Channel::WebUpload => "web_upload",
        }
    }
}

/// Contributor details, all independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Listing visibility flags
///
/// Contributed content is public by default; a future moderation step may
/// flip these, this pipeline never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub is_public: bool,
    pub is_sensitive: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            is_public: true,
            is_sensitive: false,
        }
    }
}

/// Stored asset reference, tagged by kind
///
/// Replaces the loose optional-field bag ("does it have an audio URL?") with
/// one tagged union: a record either has no asset or exactly one of a known
/// kind, with the fields that kind carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetKind {
    None,
    Audio {
        url: String,
        destination: String,
        key: String,
        duration_seconds: Option<u32>,
    },
    Image {
        url: String,
        destination: String,
        key: String,
    },
    Video {
        url: String,
        destination: String,
        key: String,
    },
    Document {
        url: String,
        destination: String,
        key: String,
    },
}

impl AssetKind {
    /// Stable discriminant string, matches the `asset_kind` column values
    pub fn kind_str(&self) -> &'static str {
        match self {
            AssetKind::None => "none",
            AssetKind::Audio { .. } => "audio",
            AssetKind::Image { .. } => "image",
            AssetKind::Video { .. } => "video",
            AssetKind::Document { .. } => "document",
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            AssetKind::None => None,
            AssetKind::Audio { url, .. }
            | AssetKind::Image { url, .. }
            | AssetKind::Video { url, .. }
            | AssetKind::Document { url, .. } => Some(url),
        }
    }

    pub fn destination(&self) -> Option<&str> {
        match self {
            AssetKind::None => None,
            AssetKind::Audio { destination, .. }
            | AssetKind::Image { destination, .. }
            | AssetKind::Video { destination, .. }
            | AssetKind::Document { destination, .. } => Some(destination),
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            AssetKind::None => None,
            AssetKind::Audio { key, .. }
            | AssetKind::Image { key, .. }
            | AssetKind::Video { key, .. }
            | AssetKind::Document { key, .. } => Some(key),
        }
    }

    pub fn duration_seconds(&self) -> Option<u32> {
        match self {
            AssetKind::Audio {
                duration_seconds, ..
            } => *duration_seconds,
            _ => None,
        }
    }
}

/// Which channel produced the record, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub channel: Channel,
    pub submitted_at: DateTime<Utc>,
}

/// The unit of archived material
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub guid: Uuid,

    /// Canonical category, never a raw UI alias. The content_items CHECK
    /// constraint is the enforcement point behind this invariant.
    pub category: String,

    /// Never empty; defaults to a category-derived label
    pub title: String,

    pub description: Option<String>,
    pub body_text: Option<String>,

    /// Date the content depicts, if known
    pub occurred_on: Option<NaiveDate>,
    pub date_is_approximate: bool,

    pub contributor: Contributor,

    pub location: Option<String>,
    pub people_mentioned: Option<String>,

    pub asset: AssetKind,
    pub visibility: Visibility,
    pub provenance: Provenance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_strings_match_source_column_values() {
        assert_eq!(Channel::WebForm.as_str(), "web_form");
        assert_eq!(Channel::WebRecording.as_str(), "web_recording");
        assert_eq!(Channel::WebUpload.as_str(), "web_upload");
    }

    #[test]
    fn asset_kind_accessors() {
        let audio = AssetKind::Audio {
            url: "/media/audio/recording-1.webm".to_string(),
            destination: "audio".to_string(),
            key: "recording-1.webm".to_string(),
            duration_seconds: Some(42),
        };
        assert_eq!(audio.kind_str(), "audio");
        assert_eq!(audio.url(), Some("/media/audio/recording-1.webm"));
        assert_eq!(audio.duration_seconds(), Some(42));

        assert_eq!(AssetKind::None.kind_str(), "none");
        assert_eq!(AssetKind::None.url(), None);
        assert_eq!(AssetKind::None.duration_seconds(), None);
    }
}
