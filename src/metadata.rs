use crate::attributes::{read_file_attributes, FileAttributes};
use crate::error::AppError;
use crate::tags::{read_tags, TagFields};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything written to an image's sidecar. Tag fields appear only when the
/// image carries the tag.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRecord {
    #[serde(flatten)]
    pub attributes: FileAttributes,
    #[serde(flatten)]
    pub tags: TagFields,
}

impl ImageRecord {
    pub fn to_json(&self, pretty: bool) -> Result<String, AppError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

pub fn assemble(path: &Path) -> Result<ImageRecord, AppError> {
    let attributes = read_file_attributes(path)?;
    let tags = read_tags(path)?;
    log::debug!("Found {} mapped tags in {:?}", tags.len(), path);

    Ok(ImageRecord { attributes, tags })
}

/// `dir/photo.v2.jpg` becomes `dir/photo.v2.json`; a name without a dot keeps
/// its full name.
pub fn sidecar_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name.as_str(),
    };
    let file_name = format!("{}.json", stem);

    match path.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
