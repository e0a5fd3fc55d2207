//! Service modules for the submission pipeline
//!
//! One module per pipeline component: category normalization, asset
//! routing, record assembly, and the coordinator that sequences them.

pub mod asset_router;
pub mod category_normalizer;
pub mod record_assembler;
pub mod submission_coordinator;

pub use asset_router::AssetRouter;
pub use submission_coordinator::{SubmissionCoordinator, SubmissionError};
