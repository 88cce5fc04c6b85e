use std::path::PathBuf;

use thiserror::Error;
use wca_wcif::RegistryError;

#[derive(Error, Debug)]
pub enum DeskError {
    /// Activity code, preceding round or unlock code lookup miss
    #[error("not found: {0}")]
    NotFound(String),

    /// Registry, renderer, uploader or subprocess failure
    #[error("external failure: {0}")]
    ExternalFailure(String),

    /// Proceeding would corrupt competitor assignment
    #[error("data inconsistency: {0}")]
    DataInconsistency(String),

    #[error("no competition snapshot at {}; load one with --init", .0.display())]
    SnapshotNotFound(PathBuf),

    #[error("competition snapshot is malformed: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RegistryError> for DeskError {
    fn from(err: RegistryError) -> Self {
        DeskError::ExternalFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;
