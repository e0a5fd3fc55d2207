//! Database access shared across Heirloom crates

pub mod init;

pub use init::{create_content_items_table, init_database};
