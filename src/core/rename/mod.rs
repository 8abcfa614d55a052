//! Event folder renaming.
//!
//! Renames every event folder under a root after the date range of its
//! photos. A run is split in two steps:
//! - [`RenamePlanner`] walks the tree and computes every new name up front
//! - [`RenameExecutor`] performs the renames, isolating per-folder failures

mod executor;
mod planner;
mod types;

pub use executor::RenameExecutor;
pub use planner::RenamePlanner;
pub use types::*;

use crate::error::ScanError;
use crate::events::{Event, EventSender, RunEvent, RunPhase};
use std::path::Path;

/// Plans and executes a full rename run
pub struct EventRenamer {
    config: RenameConfig,
}

impl EventRenamer {
    pub fn new(config: RenameConfig) -> Self {
        Self { config }
    }

    /// Work out the new names without touching anything
    pub fn plan(&self, root: &Path, events: &EventSender) -> Result<RenamePlan, ScanError> {
        events.send(Event::Run(RunEvent::PhaseChanged {
            phase: RunPhase::Locating,
        }));
        RenamePlanner::create_plan(root, &self.config, events)
    }

    /// Rename every event folder under `root`.
    ///
    /// Only an unusable root is an error; everything else ends up in the report.
    pub fn run(&self, root: &Path, events: &EventSender) -> Result<RenameReport, ScanError> {
        let plan = self.plan(root, events).inspect_err(|e| {
            events.send(Event::Run(RunEvent::Error {
                message: e.to_string(),
            }));
        })?;

        events.send(Event::Run(RunEvent::PhaseChanged {
            phase: RunPhase::Renaming,
        }));
        Ok(RenameExecutor::execute(&plan, self.config.dry_run, events))
    }
}
