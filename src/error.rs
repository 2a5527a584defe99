//! Error types for RO-Crate reading, building, and packaging

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrateError {
    #[error("Failed to read crate at {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid crate metadata: {0}")]
    Metadata(String),

    #[error("Entity ID cannot be empty")]
    EmptyId,

    #[error("Entity @id is fixed at construction and cannot be set as a property")]
    ImmutableId,

    #[error("Destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
