//! # Range Module
//!
//! Reduces the photos of one event folder to the earliest and latest
//! capture time among them.
//!
//! Photos are collected from the folder itself and, with the default depth
//! of 2, from its direct subfolders (batches imported into a subfolder of
//! the event). Only whole seconds are kept.

use crate::core::metadata::{truncate_to_seconds, ExifTimestampExtractor, TimestampExtractor};
use crate::core::naming::event_folder_name;
use crate::core::scanner::ImageFilter;
use crate::error::RangeError;
use crate::events::EventSender;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default scan depth: the folder plus one level of subfolders
pub const DEFAULT_NESTED_DEPTH: usize = 2;

/// Earliest and latest capture time of an event. `earliest <= latest` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRange {
    earliest: NaiveDateTime,
    latest: NaiveDateTime,
}

impl EventRange {
    /// Build a range from two timestamps given in any order
    pub fn new(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        let (a, b) = (truncate_to_seconds(a), truncate_to_seconds(b));
        Self {
            earliest: a.min(b),
            latest: a.max(b),
        }
    }

    /// Range covering every timestamp, `None` when there are none
    pub fn from_timestamps<I>(timestamps: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        timestamps.into_iter().fold(None, |range: Option<Self>, ts| {
            Some(match range {
                Some(r) => r.including(ts),
                None => Self::new(ts, ts),
            })
        })
    }

    /// Widen the range to include `ts`
    pub fn including(self, ts: NaiveDateTime) -> Self {
        let ts = truncate_to_seconds(ts);
        Self {
            earliest: self.earliest.min(ts),
            latest: self.latest.max(ts),
        }
    }

    pub fn earliest(&self) -> NaiveDateTime {
        self.earliest
    }

    pub fn latest(&self) -> NaiveDateTime {
        self.latest
    }

    pub fn first_day(&self) -> NaiveDate {
        self.earliest.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.latest.date()
    }

    pub fn is_single_day(&self) -> bool {
        self.first_day() == self.last_day()
    }

    /// Folder name for this event
    pub fn folder_name(&self) -> String {
        event_folder_name(self.first_day(), self.last_day())
    }
}

/// Date range of one event folder, with where the timestamps came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryRange {
    pub path: PathBuf,
    pub range: EventRange,
    pub image_count: usize,
    /// Images dated from EXIF
    pub metadata_count: usize,
    /// Images dated from their modification time
    pub fallback_count: usize,
}

/// Reduces event folders to their date range
pub struct RangeReducer<E = ExifTimestampExtractor> {
    extractor: E,
    filter: ImageFilter,
    depth: usize,
}

impl RangeReducer<ExifTimestampExtractor> {
    /// Reducer reading EXIF from disk
    pub fn new(filter: ImageFilter, depth: usize) -> Self {
        Self::with_extractor(ExifTimestampExtractor, filter, depth)
    }
}

impl Default for RangeReducer<ExifTimestampExtractor> {
    fn default() -> Self {
        Self::new(ImageFilter::default(), DEFAULT_NESTED_DEPTH)
    }
}

impl<E: TimestampExtractor> RangeReducer<E> {
    pub fn with_extractor(extractor: E, filter: ImageFilter, depth: usize) -> Self {
        Self {
            extractor,
            filter,
            depth: depth.max(1),
        }
    }

    /// List the photos belonging to an event folder
    pub fn images_in(&self, dir: &Path) -> Result<Vec<PathBuf>, RangeError> {
        let mut images = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(self.depth)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| RangeError::ReadDirectory {
                path: e.path().unwrap_or(dir).to_path_buf(),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
            })?;

            if entry.file_type().is_file() && self.filter.should_include(entry.path()) {
                images.push(entry.into_path());
            }
        }

        Ok(images)
    }

    /// Reduce an event folder to its date range
    pub fn reduce(&self, dir: &Path, events: &EventSender) -> Result<DirectoryRange, RangeError> {
        let images = self.images_in(dir)?;
        if images.is_empty() {
            return Err(RangeError::EmptyDirectory {
                path: dir.to_path_buf(),
            });
        }

        let mut range: Option<EventRange> = None;
        let mut fallback_count = 0;

        for image in &images {
            let capture = self
                .extractor
                .capture_time(image, events)
                .map_err(|source| RangeError::Timestamp {
                    path: image.clone(),
                    source,
                })?;

            if capture.is_fallback() {
                fallback_count += 1;
            }

            let ts = capture.timestamp();
            range = Some(range.map_or_else(|| EventRange::new(ts, ts), |r| r.including(ts)));
        }

        let range = range.ok_or_else(|| RangeError::EmptyDirectory {
            path: dir.to_path_buf(),
        })?;

        tracing::debug!(
            path = %dir.display(),
            earliest = %range.earliest(),
            latest = %range.latest(),
            images = images.len(),
            "reduced event folder"
        );

        Ok(DirectoryRange {
            path: dir.to_path_buf(),
            range,
            image_count: images.len(),
            metadata_count: images.len() - fallback_count,
            fallback_count,
        })
    }
}
