//! Submission input and per-submission state machine
//!
//! Each submission progresses through:
//! IDLE → ASSET_STORING (asset present only) → NORMALIZING → ASSEMBLING →
//! PERSISTING → DONE, with → FAILED reachable from any step.
//!
//! A failed submission is retried in full by the caller; there is no
//! partial or resume state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Channel, Contributor};

/// Raw form state handed to the submission coordinator
///
/// One immutable value per submission call; empty strings mean "not
/// provided" (the forms submit empty fields), the assembler turns them into
/// absent values.
#[derive(Debug, Clone)]
pub struct SubmissionInput {
    /// UI-selected or free-form category, possibly an alias
    pub category: String,
    pub title: String,
    pub description: String,
    pub body_text: String,
    pub occurred_on: Option<NaiveDate>,
    pub date_is_approximate: bool,
    pub contributor: Contributor,
    pub location: Option<String>,
    pub people_mentioned: Option<String>,
    pub channel: Channel,
}

/// Binary payload accompanying a submission
#[derive(Debug, Clone)]
pub struct AssetUpload {
    pub data: Vec<u8>,
    /// Original filename, used to derive an extension; None for recordings
    pub filename_hint: Option<String>,
    /// Caller-declared content type (e.g. audio/webm for recordings)
    pub content_type_hint: Option<String>,
    /// Recording length, when the capture page measured one
    pub duration_seconds: Option<u32>,
}

/// Submission pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    /// Input accepted, nothing started
    Idle,
    /// Writing the binary asset to its destination
    AssetStoring,
    /// Resolving the canonical category
    Normalizing,
    /// Building the content record
    Assembling,
    /// Inserting the record into the backing store
    Persisting,
    /// Record persisted, identifier available
    Done,
    /// Submission failed; must be retried in full
    Failed,
}

/// State transition record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChange {
    pub submission_id: Uuid,
    pub old_state: SubmissionState,
    pub new_state: SubmissionState,
    pub changed_at: DateTime<Utc>,
}

/// One submission attempt (in-memory state)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionAttempt {
    pub submission_id: Uuid,
    pub state: SubmissionState,
    pub channel: Channel,
    pub started_at: DateTime<Utc>,
    /// Set when a terminal state is reached
    pub ended_at: Option<DateTime<Utc>>,
}

impl SubmissionAttempt {
    pub fn new(channel: Channel) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            state: SubmissionState::Idle,
            channel,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: SubmissionState) -> StateChange {
        let change = StateChange {
            submission_id: self.submission_id,
            old_state: self.state,
            new_state,
            changed_at: Utc::now(),
        };
        self.state = new_state;

        // Stamp end time for terminal states
        match new_state {
            SubmissionState::Done | SubmissionState::Failed => {
                self.ended_at = Some(Utc::now());
            }
            _ => {}
        }

        change
    }

    /// Check if the attempt reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, SubmissionState::Done | SubmissionState::Failed)
    }
}
