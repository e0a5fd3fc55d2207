//! Record assembly
//!
//! Pure data transformation: merges normalized category, user-entered
//! fields, contributor metadata, and the stored asset address into one
//! content record ready for persistence. No I/O.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{AssetKind, ContentRecord, Provenance, SubmissionInput, Visibility};
use crate::services::category_normalizer;
use crate::storage::{Destination, StoredObject};

/// Build the content record for a submission
///
/// Field defaults: a missing title becomes a category-derived label;
/// missing optional fields are stored as absent, never as sentinel strings.
/// Visibility is public-by-default for contributed content.
pub fn assemble(
    input: &SubmissionInput,
    canonical_category: &str,
    stored: Option<&StoredObject>,
    duration_seconds: Option<u32>,
) -> ContentRecord {
    let title = match input.title.trim() {
        "" => category_normalizer::default_title(canonical_category).to_string(),
        trimmed => trimmed.to_string(),
    };

    ContentRecord {
        guid: Uuid::new_v4(),
        category: canonical_category.to_string(),
        title,
        description: optional_text(&input.description),
        body_text: optional_text(&input.body_text),
        occurred_on: input.occurred_on,
        date_is_approximate: input.date_is_approximate,
        contributor: input.contributor.clone(),
        location: input.location.as_deref().and_then(optional_text),
        people_mentioned: input.people_mentioned.as_deref().and_then(optional_text),
        asset: asset_kind(stored, duration_seconds),
        visibility: Visibility::default(),
        provenance: Provenance {
            channel: input.channel,
            submitted_at: Utc::now(),
        },
    }
}

/// Empty or whitespace-only text is absent, not an empty value
fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Tag the stored asset by the destination it was routed to
fn asset_kind(stored: Option<&StoredObject>, duration_seconds: Option<u32>) -> AssetKind {
    let Some(object) = stored else {
        return AssetKind::None;
    };
    let url = object.url.clone();
    let destination = object.destination.as_str().to_string();
    let key = object.key.clone();
    match object.destination {
        Destination::Photos => AssetKind::Image {
            url,
            destination,
            key,
        },
        Destination::Audio => AssetKind::Audio {
            url,
            destination,
            key,
            duration_seconds,
        },
        Destination::Video => AssetKind::Video {
            url,
            destination,
            key,
        },
        Destination::Documents => AssetKind::Document {
            url,
            destination,
            key,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, Contributor};

    fn input(channel: Channel) -> SubmissionInput {
        SubmissionInput {
            category: "recording".to_string(),
            title: String::new(),
            description: String::new(),
            body_text: String::new(),
            occurred_on: None,
            date_is_approximate: false,
            contributor: Contributor::default(),
            location: None,
            people_mentioned: None,
            channel,
        }
    }

    #[test]
    fn missing_title_defaults_to_category_label() {
        let record = assemble(&input(Channel::WebRecording), "audio_recording", None, None);
        assert_eq!(record.title, "Audio Recording");
        assert_eq!(record.category, "audio_recording");
    }

    #[test]
    fn empty_optionals_are_absent_not_empty_strings() {
        let mut raw = input(Channel::WebForm);
        raw.description = "   ".to_string();
        let record = assemble(&raw, "anecdote", None, None);
        assert_eq!(record.description, None);
        assert_eq!(record.body_text, None);
        assert_eq!(record.location, None);
        assert_eq!(record.asset, AssetKind::None);
    }

    #[test]
    fn visibility_defaults_to_public_and_not_sensitive() {
        let record = assemble(&input(Channel::WebUpload), "photo", None, None);
        assert!(record.visibility.is_public);
        assert!(!record.visibility.is_sensitive);
    }

    #[test]
    fn provenance_carries_the_submitting_channel() {
        let record = assemble(&input(Channel::WebRecording), "audio_recording", None, None);
        assert_eq!(record.provenance.channel, Channel::WebRecording);
    }

    #[test]
    fn audio_asset_carries_duration() {
        let stored = StoredObject {
            destination: Destination::Audio,
            key: "recording-1.webm".to_string(),
            url: "/media/audio/recording-1.webm".to_string(),
        };
        let record = assemble(
            &input(Channel::WebRecording),
            "audio_recording",
            Some(&stored),
            Some(95),
        );
        assert_eq!(
            record.asset,
            AssetKind::Audio {
                url: "/media/audio/recording-1.webm".to_string(),
                destination: "audio".to_string(),
                key: "recording-1.webm".to_string(),
                duration_seconds: Some(95),
            }
        );
    }

    #[test]
    fn photo_asset_is_tagged_image() {
        let stored = StoredObject {
            destination: Destination::Photos,
            key: "1-photo.jpg".to_string(),
            url: "/media/photos/1-photo.jpg".to_string(),
        };
        let record = assemble(&input(Channel::WebUpload), "photo", Some(&stored), None);
        assert_eq!(record.asset.kind_str(), "image");
        assert_eq!(record.asset.url(), Some("/media/photos/1-photo.jpg"));
    }
}
