//! Submission state machine tests
//!
//! The pipeline progresses IDLE → ASSET_STORING → NORMALIZING →
//! ASSEMBLING → PERSISTING → DONE, with FAILED reachable from any step.

use heirloom_web::models::{Channel, SubmissionAttempt, SubmissionState};

/// Helper to create a test attempt
fn create_attempt() -> SubmissionAttempt {
    SubmissionAttempt::new(Channel::WebUpload)
}

#[test]
fn new_attempt_starts_idle() {
    let attempt = create_attempt();
    assert_eq!(attempt.state, SubmissionState::Idle);
    assert_eq!(attempt.ended_at, None);
    assert!(!attempt.is_terminal());
}

#[test]
fn asset_storing_follows_idle_when_an_asset_is_present() {
    // Given: a fresh attempt with an asset
    let mut attempt = create_attempt();

    // When: the coordinator begins the asset write
    let change = attempt.transition_to(SubmissionState::AssetStoring);

    // Then: the attempt records the transition
    assert_eq!(attempt.state, SubmissionState::AssetStoring);
    assert_eq!(change.old_state, SubmissionState::Idle);
    assert_eq!(change.new_state, SubmissionState::AssetStoring);
    assert_eq!(change.submission_id, attempt.submission_id);
}

#[test]
fn full_pipeline_reaches_done() {
    let mut attempt = create_attempt();

    attempt.transition_to(SubmissionState::AssetStoring);
    attempt.transition_to(SubmissionState::Normalizing);
    attempt.transition_to(SubmissionState::Assembling);
    attempt.transition_to(SubmissionState::Persisting);
    let change = attempt.transition_to(SubmissionState::Done);

    assert_eq!(change.old_state, SubmissionState::Persisting);
    assert!(attempt.is_terminal());
    assert!(attempt.ended_at.is_some(), "terminal states are stamped");
}

#[test]
fn failure_is_terminal_from_any_step() {
    for intermediate in [
        SubmissionState::Idle,
        SubmissionState::AssetStoring,
        SubmissionState::Normalizing,
        SubmissionState::Assembling,
        SubmissionState::Persisting,
    ] {
        let mut attempt = create_attempt();
        if intermediate != SubmissionState::Idle {
            attempt.transition_to(intermediate);
        }
        attempt.transition_to(SubmissionState::Failed);

        assert!(attempt.is_terminal(), "failed from {intermediate:?}");
        assert!(attempt.ended_at.is_some());
    }
}

#[test]
fn intermediate_states_are_not_terminal() {
    let mut attempt = create_attempt();
    for state in [
        SubmissionState::AssetStoring,
        SubmissionState::Normalizing,
        SubmissionState::Assembling,
        SubmissionState::Persisting,
    ] {
        attempt.transition_to(state);
        assert!(!attempt.is_terminal(), "{state:?} must not be terminal");
        assert_eq!(attempt.ended_at, None);
    }
}
