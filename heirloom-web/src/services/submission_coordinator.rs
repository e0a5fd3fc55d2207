//! Submission coordination
//!
//! Sequences the pipeline for one submission: validate, store the asset
//! (if any), normalize the category, assemble the record, persist it.
//! Ordering invariant: a record is only ever persisted after its asset
//! write succeeded, so a stored record never points at a missing asset.
//! The converse (stored asset, failed insert) is an accepted
//! inconsistency; the orphan is logged, never silently cleaned up.

use std::sync::Arc;

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db;
use crate::models::{
    AssetUpload, Channel, SubmissionAttempt, SubmissionInput, SubmissionState,
};
use crate::services::{category_normalizer, record_assembler, AssetRouter};
use crate::storage::{StorageBackend, StorageError};

/// Submission failure cause, surfaced to the caller as-is; nothing is
/// retried inside the pipeline
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Asset write failed; no record was assembled or persisted
    #[error("Asset storage failed: {0}")]
    Storage(#[from] StorageError),

    /// Record insert failed; a stored asset (if any) is left orphaned
    #[error("Record persistence failed: {0}")]
    Persistence(#[from] heirloom_common::Error),

    /// Required field missing
    #[error("Invalid submission: {0}")]
    Validation(String),
}

/// Orchestrates the submission pipeline
#[derive(Clone)]
pub struct SubmissionCoordinator {
    db: SqlitePool,
    router: AssetRouter,
}

impl SubmissionCoordinator {
    pub fn new(db: SqlitePool, backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            db,
            router: AssetRouter::new(backend),
        }
    }

    /// Run one submission to a terminal state
    ///
    /// Returns the new record's identifier, or the failure cause. A failed
    /// submission must be retried in full by the caller; there is no
    /// partial or resume state.
    pub async fn submit(
        &self,
        input: SubmissionInput,
        asset: Option<AssetUpload>,
    ) -> Result<Uuid, SubmissionError> {
        let mut attempt = SubmissionAttempt::new(input.channel);

        if let Err(e) = validate(&input, asset.as_ref()) {
            attempt.transition_to(SubmissionState::Failed);
            return Err(e);
        }

        let stored = match &asset {
            Some(upload) => {
                attempt.transition_to(SubmissionState::AssetStoring);
                match self.router.store(upload, &input.category).await {
                    Ok(object) => Some(object),
                    Err(e) => {
                        attempt.transition_to(SubmissionState::Failed);
                        error!(
                            submission_id = %attempt.submission_id,
                            channel = input.channel.as_str(),
                            error = %e,
                            "Asset write failed; submission abandoned before assembly"
                        );
                        return Err(SubmissionError::Storage(e));
                    }
                }
            }
            None => None,
        };

        attempt.transition_to(SubmissionState::Normalizing);
        let canonical = category_normalizer::normalize(&input.category).to_string();

        attempt.transition_to(SubmissionState::Assembling);
        let duration_seconds = asset.as_ref().and_then(|a| a.duration_seconds);
        let record =
            record_assembler::assemble(&input, &canonical, stored.as_ref(), duration_seconds);

        attempt.transition_to(SubmissionState::Persisting);
        match db::content_items::insert_content_item(&self.db, &record).await {
            Ok(guid) => {
                attempt.transition_to(SubmissionState::Done);
                info!(
                    submission_id = %attempt.submission_id,
                    record_id = %guid,
                    category = %record.category,
                    channel = input.channel.as_str(),
                    "Submission persisted"
                );
                Ok(guid)
            }
            Err(e) => {
                attempt.transition_to(SubmissionState::Failed);
                if let Some(object) = &stored {
                    // Accepted inconsistency: keep the asset, log where it is
                    warn!(
                        submission_id = %attempt.submission_id,
                        destination = %object.destination,
                        key = %object.key,
                        "Record insert failed after asset write; stored asset left orphaned"
                    );
                }
                error!(
                    submission_id = %attempt.submission_id,
                    error = %e,
                    "Record persistence failed"
                );
                Err(SubmissionError::Persistence(e))
            }
        }
    }
}

/// Channel-specific requirements, checked before any I/O
fn validate(
    input: &SubmissionInput,
    asset: Option<&AssetUpload>,
) -> Result<(), SubmissionError> {
    match input.channel {
        Channel::WebForm | Channel::WebUpload => {
            if input.title.trim().is_empty() {
                return Err(SubmissionError::Validation("title is required".to_string()));
            }
        }
        Channel::WebRecording => {
            if asset.is_none() {
                return Err(SubmissionError::Validation(
                    "a recording is required".to_string(),
                ));
            }
        }
    }
    if input.category.trim().is_empty() {
        return Err(SubmissionError::Validation("category is required".to_string()));
    }
    Ok(())
}
