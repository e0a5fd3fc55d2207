//! Data models for the archive service

pub mod content_record;
pub mod submission;

pub use content_record::{AssetKind, Channel, ContentRecord, Contributor, Provenance, Visibility};
pub use submission::{
    AssetUpload, StateChange, SubmissionAttempt, SubmissionInput, SubmissionState,
};
