//! heirloom-web library interface
//!
//! Exposes the application state, router, and pipeline components for
//! integration testing.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use crate::error::{ApiError, ApiResult};

use std::path::Path;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::SubmissionCoordinator;
use crate::storage::StorageBackend;

/// Largest accepted submission body; covers photos and ten-minute
/// recordings with room to spare
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Submission pipeline entry point
    pub coordinator: SubmissionCoordinator,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            coordinator: SubmissionCoordinator::new(db.clone(), storage),
            db,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// `media_root` is the directory stored assets are served back from,
/// under the `/media` URL prefix the storage backend embeds in asset
/// addresses.
pub fn build_router(state: AppState, media_root: &Path) -> Router {
    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // API routes
        .merge(api::submission_routes())
        .merge(api::item_routes())
        .merge(api::health_routes())
        // Stored assets
        .nest_service("/media", ServeDir::new(media_root))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
