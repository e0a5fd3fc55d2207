//! heirloom-web - Family archive web service
//!
//! Serves the contribution pages (upload, write, record), the browse and
//! timeline views, and the submission API backing them. Stored media and
//! the SQLite database live under a single configurable root folder.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use heirloom_web::storage::FilesystemStore;
use heirloom_web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting heirloom-web (Family Archive)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Resolve root folder: CLI arg > env > config file > platform default
    let cli_root = std::env::args().nth(1);
    let root_folder =
        heirloom_common::config::resolve_root_folder(cli_root.as_deref(), "HEIRLOOM_ROOT");
    info!("Root folder: {}", root_folder.display());

    // Open or create database
    let db_path = heirloom_common::config::database_path(&root_folder);
    info!("Database: {}", db_path.display());
    let db_pool = heirloom_common::db::init_database(&db_path).await?;
    info!("Database connection established");

    // Prepare media destinations
    let media_root = heirloom_common::config::media_root(&root_folder);
    let store = FilesystemStore::new(&media_root, "/media");
    store
        .ensure_destinations()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare media destinations: {}", e))?;
    info!("Media root: {}", media_root.display());

    // Create application state
    let state = AppState::new(db_pool, Arc::new(store));

    // Build router
    let app = heirloom_web::build_router(state, &media_root);

    // Start server
    let bind_addr = heirloom_common::config::load_toml_config()
        .ok()
        .and_then(|c| c.bind_addr)
        .unwrap_or_else(|| "127.0.0.1:5741".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
