//! Synthesized JPEG fixtures carrying an EXIF segment.

use std::fs;
use std::path::{Path, PathBuf};

const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;

const TAG_MODEL: u16 = 0x0110;
const TAG_ORIENTATION: u16 = 0x0112;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TAG_BODY_SERIAL_NUMBER: u16 = 0xA431;

#[derive(Debug, Default, Clone, Copy)]
pub struct ExifFixture<'a> {
    pub orientation: Option<u16>,
    pub model: Option<&'a str>,
    pub capture_time: Option<&'a str>,
    pub serial: Option<&'a str>,
}

impl ExifFixture<'static> {
    /// The camera data of `JAM19896.jpg`.
    pub fn canon() -> Self {
        Self {
            orientation: Some(1),
            model: Some("Canon EOS 5D Mark IV"),
            capture_time: Some("2019:07:26 13:25:33"),
            serial: Some("025021000537"),
        }
    }
}

enum Entry {
    Short(u16, u16),
    Long(u16, u32),
    Ascii(u16, String),
}

/// A little-endian TIFF block with IFD0 and, when needed, an Exif IFD.
fn tiff(fixture: &ExifFixture) -> Vec<u8> {
    let mut exif_entries = Vec::new();
    if let Some(capture_time) = fixture.capture_time {
        exif_entries.push(Entry::Ascii(TAG_DATE_TIME_ORIGINAL, capture_time.to_string()));
    }
    if let Some(serial) = fixture.serial {
        exif_entries.push(Entry::Ascii(TAG_BODY_SERIAL_NUMBER, serial.to_string()));
    }

    let ifd0_len = |n: usize| 2 + 12 * n + 4;
    let mut ifd0_entries = Vec::new();
    if let Some(model) = fixture.model {
        ifd0_entries.push(Entry::Ascii(TAG_MODEL, model.to_string()));
    }
    if let Some(orientation) = fixture.orientation {
        ifd0_entries.push(Entry::Short(TAG_ORIENTATION, orientation));
    }
    let exif_ifd_offset = 8 + ifd0_len(ifd0_entries.len() + usize::from(!exif_entries.is_empty()));
    if !exif_entries.is_empty() {
        ifd0_entries.push(Entry::Long(TAG_EXIF_IFD, exif_ifd_offset as u32));
    }

    let exif_ifd_len = if exif_entries.is_empty() {
        0
    } else {
        ifd0_len(exif_entries.len())
    };
    let data_offset = exif_ifd_offset + exif_ifd_len;

    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&8u32.to_le_bytes());

    let mut data = Vec::new();
    write_ifd(&mut out, &ifd0_entries, data_offset, &mut data);
    if !exif_entries.is_empty() {
        write_ifd(&mut out, &exif_entries, data_offset, &mut data);
    }
    assert_eq!(out.len(), data_offset);
    out.extend_from_slice(&data);
    out
}

fn write_ifd(out: &mut Vec<u8>, entries: &[Entry], data_offset: usize, data: &mut Vec<u8>) {
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        match entry {
            Entry::Short(tag, value) => {
                out.extend_from_slice(&tag.to_le_bytes());
                out.extend_from_slice(&TYPE_SHORT.to_le_bytes());
                out.extend_from_slice(&1u32.to_le_bytes());
                out.extend_from_slice(&value.to_le_bytes());
                out.extend_from_slice(&[0, 0]);
            }
            Entry::Long(tag, value) => {
                out.extend_from_slice(&tag.to_le_bytes());
                out.extend_from_slice(&TYPE_LONG.to_le_bytes());
                out.extend_from_slice(&1u32.to_le_bytes());
                out.extend_from_slice(&value.to_le_bytes());
            }
            Entry::Ascii(tag, text) => {
                let mut bytes = text.as_bytes().to_vec();
                bytes.push(0);
                out.extend_from_slice(&tag.to_le_bytes());
                out.extend_from_slice(&TYPE_ASCII.to_le_bytes());
                out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
                if bytes.len() <= 4 {
                    bytes.resize(4, 0);
                    out.extend_from_slice(&bytes);
                } else {
                    let offset = (data_offset + data.len()) as u32;
                    out.extend_from_slice(&offset.to_le_bytes());
                    data.extend_from_slice(&bytes);
                    if data.len() % 2 == 1 {
                        data.push(0);
                    }
                }
            }
        }
    }
    out.extend_from_slice(&0u32.to_le_bytes());
}

/// SOI, an APP1 Exif segment, EOI.
pub fn jpeg_with_exif(fixture: &ExifFixture) -> Vec<u8> {
    jpeg_with_tiff(&tiff(fixture))
}

/// Like [`jpeg_with_exif`], with the Exif sub-IFD pointer aimed far past the end.
pub fn jpeg_with_dangling_exif_pointer(fixture: &ExifFixture) -> Vec<u8> {
    let mut tiff = tiff(fixture);
    let mut pattern = TAG_EXIF_IFD.to_le_bytes().to_vec();
    pattern.extend_from_slice(&TYPE_LONG.to_le_bytes());
    let entry = tiff
        .windows(pattern.len())
        .position(|w| w == pattern.as_slice())
        .expect("fixture has an Exif IFD pointer");
    tiff[entry + 8..entry + 12].copy_from_slice(&0xFFFF_0000u32.to_le_bytes());
    jpeg_with_tiff(&tiff)
}

/// An APP1 Exif segment whose TIFF block is not TIFF at all.
pub fn jpeg_with_garbage_exif() -> Vec<u8> {
    jpeg_with_tiff(b"not a tiff header, just noise")
}

/// An APP1 Exif segment that declares more bytes than the file holds.
pub fn jpeg_with_truncated_exif() -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&4096u16.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0II*\0");
    jpeg
}

fn jpeg_with_tiff(tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    jpeg.extend_from_slice(&payload);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// A JPEG with no metadata segment at all.
pub fn bare_jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}
