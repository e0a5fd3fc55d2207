//! Database access for the archive service

pub mod content_items;
