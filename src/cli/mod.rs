//! Command-line interface module.
//!
//! This module provides the CLI functionality for:
//! - Running the HTTP service
//! - Offline training from a CSV file
//! - One-off predictions against the persisted model

pub mod commands;
pub mod handlers;

pub use handlers::{handle_predict, handle_server, handle_train};
