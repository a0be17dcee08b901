use serde_json::Error as SerdeJsonError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("File does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unreadable image {}: {reason}", path.display())]
    UnreadableImage { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] SerdeJsonError),

    #[error("Timestamp out of range: {0}")]
    Timestamp(f64),
}

/// Coarse classification used when reporting a failed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    UnreadableImage,
    Io,
    Unknown,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match *self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::UnreadableImage { .. } => ErrorKind::UnreadableImage,
            AppError::Io(_) => ErrorKind::Io,
            AppError::Config(_) => ErrorKind::Unknown,
            AppError::Json(_) => ErrorKind::Unknown,
            AppError::Timestamp(_) => ErrorKind::Unknown,
        }
    }

    pub(crate) fn unreadable(path: &std::path::Path, reason: impl ToString) -> Self {
        AppError::UnreadableImage {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
