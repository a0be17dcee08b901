use crate::error::AppError;
use crate::timestamp::{epoch_seconds, to_iso8601_utc};
use serde::Serialize;
use std::fs::{self, Metadata};
use std::path::Path;
use std::time::SystemTime;

/// Filesystem-level facts about one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAttributes {
    pub filename: String,
    pub size: u64,
    pub created_time: String,
    pub modified_time: String,
}

/// Reads name, size and timestamps for a path the caller has already checked exists.
pub fn read_file_attributes(path: &Path) -> Result<FileAttributes, AppError> {
    log::trace!("Reading file attributes for: {:?}", path);
    let metadata = fs::metadata(path)?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let modified = metadata.modified()?;
    let created = creation_time(&metadata)?;

    Ok(FileAttributes {
        filename,
        size: metadata.len(),
        created_time: to_iso8601_utc(epoch_seconds(created))?,
        modified_time: to_iso8601_utc(epoch_seconds(modified))?,
    })
}

#[cfg(windows)]
fn creation_time(metadata: &Metadata) -> Result<SystemTime, AppError> {
    Ok(metadata.created()?)
}

// Birth time depends on the filesystem and kernel here. Without it, the
// modification time is reported instead, which can be later than the real
// creation time.
#[cfg(not(windows))]
fn creation_time(metadata: &Metadata) -> Result<SystemTime, AppError> {
    match metadata.created() {
        Ok(created) => Ok(created),
        Err(e) => {
            log::debug!("Birth time unavailable ({}), using modification time", e);
            Ok(metadata.modified()?)
        }
    }
}
