//! Event type definitions for diagnostics and progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the renamer and the size report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Leaf directory discovery
    Locate(LocateEvent),
    /// Per-image timestamp extraction
    Extract(ExtractEvent),
    /// Planning and performing renames
    Rename(RenameEvent),
    /// Size statistics collection
    Stats(StatsEvent),
    /// Run-level events
    Run(RunEvent),
}

/// Events while walking the tree for event folders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LocateEvent {
    /// Walking has started
    Started { root: PathBuf },
    /// A directory qualified as an event folder
    LeafFound { path: PathBuf },
    /// A directory subtree was skipped because it carries the sentinel marker
    SentinelSkipped { path: PathBuf },
    /// An entry could not be read, walking continues
    Error { path: PathBuf, message: String },
    /// Walking completed
    Completed { total_leaves: usize },
}

/// Events while reading capture times
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExtractEvent {
    /// No usable metadata, the file modification time was used instead
    MetadataFallback { path: PathBuf, reason: String },
}

/// Events while planning and executing renames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenameEvent {
    /// Dating of candidate folders has started
    PlanningStarted { total_candidates: usize },
    /// A candidate folder received its event name
    Planned { from: PathBuf, to: PathBuf },
    /// A candidate folder could not be dated and is left alone
    Skipped { path: PathBuf, message: String },
    /// Progress update while renaming
    Progress(RenameProgress),
    /// A folder was renamed
    Renamed { from: PathBuf, to: PathBuf },
    /// A folder already carries its event name
    Unchanged { path: PathBuf },
    /// A rename failed, the batch continues
    Failed {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },
    /// All renames were attempted
    Completed { summary: RenameSummary },
}

/// Progress information while renaming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameProgress {
    /// Number of folders handled so far
    pub completed: usize,
    /// Total number of folders in the plan
    pub total: usize,
    /// Folder currently being handled
    pub current_path: PathBuf,
}

/// Summary of a rename run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameSummary {
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// Events while collecting image sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StatsEvent {
    /// Collection has started
    Started { root: PathBuf },
    /// Periodic progress update
    Progress { files_scanned: usize, images_found: usize },
    /// A file or directory could not be read
    Error { path: PathBuf, message: String },
    /// Collection completed
    Completed { total_images: usize },
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
    /// Moving to a new phase
    PhaseChanged { phase: RunPhase },
    /// The run hit a fatal error
    Error { message: String },
}

/// Phases of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Locating,
    Dating,
    Renaming,
    Measuring,
    Rendering,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::Locating => write!(f, "Locating event folders"),
            RunPhase::Dating => write!(f, "Reading capture times"),
            RunPhase::Renaming => write!(f, "Renaming"),
            RunPhase::Measuring => write!(f, "Measuring image sizes"),
            RunPhase::Rendering => write!(f, "Rendering chart"),
        }
    }
}
