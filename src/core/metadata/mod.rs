//! # Metadata Module
//!
//! Determines when a photo was taken.
//!
//! ## Sources
//! 1. EXIF `DateTimeOriginal`, `DateTimeDigitized` and `DateTime`; the
//!    earliest parseable one wins.
//! 2. The file's last modification time, in local time.
//!
//! Metadata problems never surface as errors. They come back as
//! [`CaptureTime::Fallback`] carrying the reason, so callers can tell
//! which images were dated from the filesystem.

use crate::events::{Event, EventSender, ExtractEvent};
use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Pattern of EXIF date/time strings: "YYYY:MM:DD HH:MM:SS"
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Tags that may hold a capture time, in order of preference
const CAPTURE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// Why the metadata could not be used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// The file could not be opened
    Unreadable(String),
    /// The file carries no readable EXIF block
    NoExif(String),
    /// EXIF is present but has no date/time tag
    NoDateTag,
    /// A date/time tag is present but does not match the expected pattern
    Malformed(String),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::Unreadable(e) => write!(f, "file unreadable: {}", e),
            FallbackReason::NoExif(e) => write!(f, "no EXIF data: {}", e),
            FallbackReason::NoDateTag => write!(f, "no capture date tag"),
            FallbackReason::Malformed(raw) => write!(f, "malformed capture date {:?}", raw),
        }
    }
}

/// Best-effort capture time of one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTime {
    /// Read from embedded metadata
    Metadata(NaiveDateTime),
    /// Taken from the file modification time
    Fallback {
        timestamp: NaiveDateTime,
        reason: FallbackReason,
    },
}

impl CaptureTime {
    /// The timestamp, whichever source it came from
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            CaptureTime::Metadata(ts) => *ts,
            CaptureTime::Fallback { timestamp, .. } => *timestamp,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CaptureTime::Fallback { .. })
    }
}

/// Source of capture times.
///
/// Implement this trait to feed the range reducer from somewhere other than
/// the files themselves (e.g., in tests).
pub trait TimestampExtractor {
    /// Capture time of one image.
    ///
    /// Fails only when not even the file modification time is available.
    fn capture_time(&self, path: &Path, events: &EventSender) -> std::io::Result<CaptureTime>;
}

/// Reads EXIF first and falls back to the modification time
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifTimestampExtractor;

impl TimestampExtractor for ExifTimestampExtractor {
    fn capture_time(&self, path: &Path, events: &EventSender) -> std::io::Result<CaptureTime> {
        extract_capture_time(path, events)
    }
}

/// Extract the capture time of a photo, falling back to its modification time
pub fn extract_capture_time(path: &Path, events: &EventSender) -> std::io::Result<CaptureTime> {
    match read_exif_capture_time(path) {
        Ok(timestamp) => Ok(CaptureTime::Metadata(timestamp)),
        Err(reason) => {
            tracing::debug!(path = %path.display(), %reason, "falling back to modification time");
            events.send(Event::Extract(ExtractEvent::MetadataFallback {
                path: path.to_path_buf(),
                reason: reason.to_string(),
            }));

            let timestamp = modification_time(path)?;
            Ok(CaptureTime::Fallback { timestamp, reason })
        }
    }
}

/// Read the earliest EXIF capture time of a photo
pub fn read_exif_capture_time(path: &Path) -> Result<NaiveDateTime, FallbackReason> {
    // The handle lives only for the duration of this call
    let file = File::open(path).map_err(|e| FallbackReason::Unreadable(e.to_string()))?;
    let mut bufreader = BufReader::new(file);
    let exif_reader = Reader::new()
        .read_from_container(&mut bufreader)
        .map_err(|e| FallbackReason::NoExif(e.to_string()))?;

    let mut earliest: Option<NaiveDateTime> = None;
    let mut malformed: Option<String> = None;

    for tag in CAPTURE_TAGS {
        let Some(field) = exif_reader.get_field(tag, In::PRIMARY) else {
            continue;
        };
        let Some(raw) = get_ascii_value(&field.value) else {
            continue;
        };

        match parse_exif_datetime(&raw) {
            Some(ts) => earliest = Some(earliest.map_or(ts, |e| e.min(ts))),
            None => {
                malformed.get_or_insert(raw);
            }
        }
    }

    match (earliest, malformed) {
        (Some(ts), _) => Ok(ts),
        (None, Some(raw)) => Err(FallbackReason::Malformed(raw)),
        (None, None) => Err(FallbackReason::NoDateTag),
    }
}

/// Parse an EXIF date/time string ("YYYY:MM:DD HH:MM:SS")
pub fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim_end_matches('\0').trim();
    NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT).ok()
}

/// File modification time in local time, to whole seconds
pub fn modification_time(path: &Path) -> std::io::Result<NaiveDateTime> {
    let modified = fs::metadata(path)?.modified()?;
    let local: DateTime<Local> = modified.into();
    Ok(truncate_to_seconds(local.naive_local()))
}

/// Drop any sub-second part
pub fn truncate_to_seconds(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

fn get_ascii_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            return std::str::from_utf8(bytes).ok().map(str::to_string);
        }
    }
    None
}
