//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, SystemTime};

const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;

/// Little-endian TIFF block: IFD0 -> Exif IFD -> DateTimeOriginal
fn tiff_with_date_time_original(datetime: &str) -> Vec<u8> {
    let mut value = datetime.as_bytes().to_vec();
    value.push(0);

    let ifd0_offset: u32 = 8;
    let exif_ifd_offset: u32 = ifd0_offset + 2 + 12 + 4;
    let value_offset: u32 = exif_ifd_offset + 2 + 12 + 4;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&ifd0_offset.to_le_bytes());

    // IFD0
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&TAG_EXIF_IFD_POINTER.to_le_bytes());
    tiff.extend_from_slice(&TYPE_LONG.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&exif_ifd_offset.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&TAG_DATE_TIME_ORIGINAL.to_le_bytes());
    tiff.extend_from_slice(&TYPE_ASCII.to_le_bytes());
    tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&value_offset.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    tiff.extend_from_slice(&value);
    tiff
}

/// Write a minimal JPEG whose APP1 segment carries `DateTimeOriginal`
pub fn write_jpeg_with_exif(path: &Path, datetime: &str) {
    let tiff = tiff_with_date_time_original(datetime);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
    bytes.extend_from_slice(&segment_len.to_be_bytes());
    bytes.extend_from_slice(b"Exif\0\0");
    bytes.extend_from_slice(&tiff);
    bytes.extend_from_slice(&[0xFF, 0xD9]);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(&bytes).unwrap();
}

/// Write a JPEG-looking file without metadata and set its modification time
pub fn write_plain_jpeg(path: &Path, modified_unix_secs: u64) -> SystemTime {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut file = File::create(path).unwrap();
    file.write_all(&[0xFF, 0xD8, 0xFF, 0xD9]).unwrap();

    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(modified_unix_secs);
    file.set_modified(mtime).unwrap();
    mtime
}

/// Names of the directories directly inside `dir`, sorted
pub fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
