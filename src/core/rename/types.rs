//! Types for the rename module.

use crate::core::range::{EventRange, DEFAULT_NESTED_DEPTH};
use crate::core::scanner::{ImageFilter, LeafRule, LocatorConfig, DEFAULT_EXTENSIONS};
use crate::events::RenameSummary;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a rename run
#[derive(Debug, Clone)]
pub struct RenameConfig {
    /// How event folders are found
    pub locator: LocatorConfig,
    /// Photo extensions (lowercase, without dot)
    pub extensions: Vec<String>,
    /// How deep below an event folder photos are collected
    pub nested_depth: usize,
    /// Plan only, touch nothing
    pub dry_run: bool,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            locator: LocatorConfig::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            nested_depth: DEFAULT_NESTED_DEPTH,
            dry_run: false,
        }
    }
}

impl RenameConfig {
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.locator.sentinel = sentinel.into();
        self
    }

    pub fn with_leaf_rule(mut self, rule: LeafRule) -> Self {
        self.locator.leaf_rule = rule;
        self
    }

    pub fn with_include_root(mut self, include: bool) -> Self {
        self.locator.include_root = include;
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.locator.follow_symlinks = follow;
        self
    }

    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.locator.include_hidden = include;
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_nested_depth(mut self, depth: usize) -> Self {
        self.nested_depth = depth;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Photo filter matching this configuration
    pub fn image_filter(&self) -> ImageFilter {
        ImageFilter::new()
            .with_extensions(self.extensions.clone())
            .with_hidden(self.locator.include_hidden)
    }
}

/// One folder and the name it should get
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedRename {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub new_name: String,
    pub range: EventRange,
    pub image_count: usize,
    pub metadata_count: usize,
    pub fallback_count: usize,
}

impl PlannedRename {
    /// Folder already carries its event name
    pub fn is_noop(&self) -> bool {
        self.source == self.destination
    }
}

/// A candidate that will not be renamed, and why
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFolder {
    pub path: PathBuf,
    pub reason: String,
}

/// Every rename of a run, computed before anything is touched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub id: String,
    pub root: PathBuf,
    /// In execution order (deepest folders first)
    pub renames: Vec<PlannedRename>,
    pub skipped: Vec<SkippedFolder>,
    /// Unreadable entries met while walking
    pub scan_errors: Vec<String>,
}

/// What happened to a planned rename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameOutcome {
    Renamed,
    /// Would have been renamed (dry run)
    Planned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedRename {
    pub from: PathBuf,
    pub to: PathBuf,
    pub outcome: RenameOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedRename {
    pub from: PathBuf,
    pub to: PathBuf,
    pub message: String,
}

/// Result of executing a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameReport {
    pub plan_id: String,
    pub dry_run: bool,
    pub renamed: Vec<CompletedRename>,
    pub unchanged: Vec<PathBuf>,
    pub skipped: Vec<SkippedFolder>,
    pub failed: Vec<FailedRename>,
    pub scan_errors: Vec<String>,
    pub duration_ms: u64,
}

impl RenameReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn summary(&self) -> RenameSummary {
        RenameSummary {
            renamed: self.renamed.len(),
            unchanged: self.unchanged.len(),
            skipped: self.skipped.len(),
            failed: self.failed.len(),
            duration_ms: self.duration_ms,
        }
    }
}
