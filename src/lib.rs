//! Writes a JSON sidecar of file attributes and camera EXIF tags next to each
//! image in a batch, with an optional per-file success/failure report.

pub mod attributes;
pub mod config;
pub mod error;
pub mod metadata;
pub mod processor;
pub mod tags;
pub mod timestamp;

pub use error::AppError;
pub use metadata::{assemble, sidecar_path, ImageRecord};
pub use processor::{BatchOutcome, BatchReporter, BatchRunner, BatchSummary, LogReporter};
