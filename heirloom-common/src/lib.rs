//! # Heirloom Common Library
//!
//! Shared code for the Heirloom archive service:
//! - Error taxonomy
//! - Configuration loading and root folder resolution
//! - Database initialization and shared schema

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
