//! HTTP API handlers for the archive service

pub mod health;
pub mod items;
pub mod submissions;
pub mod ui;

pub use health::health_routes;
pub use items::item_routes;
pub use submissions::submission_routes;
pub use ui::ui_routes;
