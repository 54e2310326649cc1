//! Configuration module for Clinic Desk core
//!
//! Only exports pure data types. All loading logic is in the CLI layer.

pub mod types;

pub use types::{DeskConfig, MAX_HISTORY_LIMIT};
