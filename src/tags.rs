use crate::error::AppError;
use exif::{Exif, Field, In, Reader, Tag, Value};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek};
use std::path::Path;

// Enough leading bytes for every magic number the format guesser knows.
const SNIFF_LEN: usize = 32;

/// Embedded tags copied into the sidecar, keyed by the output field name they map to.
/// Supporting another tag only needs another entry here.
pub const TAG_MAPPING: &[(Tag, &str)] = &[
    (Tag::Orientation, "orientation"),
    (Tag::DateTimeOriginal, "capture_time"),
    (Tag::Model, "camera_model"),
    (Tag::BodySerialNumber, "camera_serial"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Integer(i64),
    Text(String),
}

/// Output field name to tag value, holding only the tags the image carries.
pub type TagFields = BTreeMap<&'static str, TagValue>;

/// Read access to the embedded tags of one opened image.
pub trait TagSource {
    /// Tags that are stored with a non-empty value.
    fn present_tags(&self) -> HashSet<Tag>;
    fn tag_value(&self, tag: Tag) -> Option<TagValue>;
}

pub struct ExifTagSource {
    exif: Option<Exif>,
}

impl ExifTagSource {
    /// Opens `path` and parses its EXIF segment.
    ///
    /// Fails when the file cannot be read or its container is not a recognized
    /// image format. A recognized container without a usable EXIF segment
    /// opens successfully and reports no tags; a partly damaged segment keeps
    /// the fields that could still be read.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let mut file = File::open(path)?;
        let mut header = Vec::with_capacity(SNIFF_LEN);
        (&file).take(SNIFF_LEN as u64).read_to_end(&mut header)?;
        let format = image::guess_format(&header).map_err(|e| AppError::unreadable(path, e))?;
        log::trace!("Detected {:?} container for {:?}", format, path);

        file.rewind()?;
        let mut buf_reader = BufReader::new(file);
        let exif = match Reader::new()
            .continue_on_error(true)
            .read_from_container(&mut buf_reader)
        {
            Ok(exif) => Some(exif),
            Err(exif::Error::PartialResult(partial)) => {
                let (exif, errors) = partial.into_inner();
                log::debug!("Skipped {} damaged EXIF entries in {:?}", errors.len(), path);
                Some(exif)
            }
            Err(exif::Error::Io(e)) if e.kind() != ErrorKind::UnexpectedEof => {
                return Err(AppError::Io(e));
            }
            Err(e) => {
                log::debug!("No usable EXIF data in {:?}: {}", path, e);
                None
            }
        };

        Ok(Self { exif })
    }
}

impl TagSource for ExifTagSource {
    fn present_tags(&self) -> HashSet<Tag> {
        self.exif
            .iter()
            .flat_map(|exif| exif.fields())
            .filter(|field| field.ifd_num == In::PRIMARY && convert_value(field).is_some())
            .map(|field| field.tag)
            .collect()
    }

    fn tag_value(&self, tag: Tag) -> Option<TagValue> {
        let exif = self.exif.as_ref()?;
        exif.get_field(tag, In::PRIMARY).and_then(convert_value)
    }
}

/// Collects the mapped fields for every tag the source reports as present.
pub fn extract_tags<S: TagSource + ?Sized>(source: &S) -> TagFields {
    let present = source.present_tags();

    TAG_MAPPING
        .iter()
        .filter(|(tag, _)| present.contains(tag))
        .filter_map(|(tag, field_name)| {
            let value = source.tag_value(*tag)?;
            log::trace!("{}: {:?}", field_name, value);
            Some((*field_name, value))
        })
        .collect()
}

pub fn read_tags(path: &Path) -> Result<TagFields, AppError> {
    log::trace!("Extracting EXIF data for image: {:?}", path);
    let source = ExifTagSource::open(path)?;
    Ok(extract_tags(&source))
}

/// Integers stay integers and ASCII stays text, untouched apart from NUL padding.
fn convert_value(field: &Field) -> Option<TagValue> {
    let value = match &field.value {
        Value::Byte(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::Short(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::Long(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::SByte(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::SShort(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::SLong(v) => TagValue::Integer(i64::from(*v.first()?)),
        Value::Ascii(v) => {
            let text = String::from_utf8_lossy(v.first()?);
            TagValue::Text(text.trim_end_matches('\0').to_string())
        }
        _ => TagValue::Text(field.display_value().to_string()),
    };

    match &value {
        TagValue::Text(text) if text.is_empty() => None,
        _ => Some(value),
    }
}
