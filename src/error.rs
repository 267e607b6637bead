//! Error types for gravctl.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GravctlError {
    #[error("Gravity database not found: {} (is Pi-hole installed?)", .0.display())]
    DatabaseMissing(PathBuf),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown domainlist type {0}")]
    UnknownEntryType(i64),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
