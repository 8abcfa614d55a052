//! # Scanner Module
//!
//! Finds event folders: directories that directly hold files.
//!
//! ## Rules
//! - Any path containing the sentinel marker (`date-unknown` by default) is
//!   never a candidate, and its subtree is not walked.
//! - A directory qualifies according to its [`LeafRule`].
//! - Candidates come back fully materialized, deepest first, so renaming
//!   one never invalidates a path that is still pending.
//!
//! ## Example
//! ```rust,ignore
//! use photo_event_namer::core::scanner::{LocatorConfig, WalkDirLocator, LeafLocator};
//!
//! let locator = WalkDirLocator::new(LocatorConfig::default());
//! let found = locator.locate(Path::new("/Users/photos"), &null_sender())?;
//! ```

mod filter;
mod walker;

pub use filter::{ImageFilter, DEFAULT_EXTENSIONS};
pub use walker::{LocatorConfig, WalkDirLocator};

use crate::error::ScanError;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Marker that permanently excludes a directory from processing
pub const DATE_UNKNOWN_SENTINEL: &str = "date-unknown";

/// How to decide whether a directory is an event folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafRule {
    /// At least one regular file anywhere in the direct listing
    #[default]
    AnyFile,
    /// The first entry of the listing (by name) is a regular file
    FirstEntry,
}

/// Outcome of locating event folders
#[derive(Debug, Default)]
pub struct LocateResult {
    /// Event folders, deepest first
    pub leaves: Vec<PathBuf>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for event folder locators
pub trait LeafLocator {
    /// Walk `root` and return every event folder beneath it.
    ///
    /// Fails only when `root` itself is unusable.
    fn locate(&self, root: &Path, events: &EventSender) -> Result<LocateResult, ScanError>;
}

/// Does the path carry the sentinel marker anywhere?
pub fn contains_sentinel(path: &Path, sentinel: &str) -> bool {
    !sentinel.is_empty() && path.to_string_lossy().contains(sentinel)
}
