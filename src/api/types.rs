/// API types for metadata-service file operations

/// Operation errors
///
/// Failures reported by the metadata store are passed through this taxonomy
/// unmodified; the creation path itself only ever raises `Internal` (no
/// storage targets / pattern construction failed).
#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Entry already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OpsResult<T> = Result<T, OpsError>;
