//! Executor for rename plans.

use super::types::*;
use crate::error::RenameError;
use crate::events::{Event, EventSender, RenameEvent, RenameProgress};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Executes rename plans
pub struct RenameExecutor;

impl RenameExecutor {
    /// Execute every planned rename in order.
    ///
    /// A failed rename is recorded and the run moves on to the next folder.
    pub fn execute(plan: &RenamePlan, dry_run: bool, events: &EventSender) -> RenameReport {
        let start = Instant::now();
        let total = plan.renames.len();

        let mut renamed = Vec::new();
        let mut unchanged = Vec::new();
        let mut failed = Vec::new();
        // Destinations handed out during this run
        let mut claimed: HashSet<PathBuf> = HashSet::new();

        for (i, planned) in plan.renames.iter().enumerate() {
            events.send(Event::Rename(RenameEvent::Progress(RenameProgress {
                completed: i,
                total,
                current_path: planned.source.clone(),
            })));

            if planned.is_noop() {
                tracing::debug!(path = %planned.source.display(), "already named");
                events.send(Event::Rename(RenameEvent::Unchanged {
                    path: planned.source.clone(),
                }));
                claimed.insert(planned.destination.clone());
                unchanged.push(planned.source.clone());
                continue;
            }

            let result = if claimed.contains(&planned.destination) {
                Err(RenameError::DestinationExists {
                    from: planned.source.clone(),
                    to: planned.destination.clone(),
                })
            } else if dry_run {
                Self::check_destination(&planned.source, &planned.destination)
            } else {
                Self::rename_dir(&planned.source, &planned.destination)
            };

            match result {
                Ok(()) => {
                    tracing::info!(
                        from = %planned.source.display(),
                        to = %planned.new_name,
                        "rename event"
                    );
                    if !dry_run {
                        events.send(Event::Rename(RenameEvent::Renamed {
                            from: planned.source.clone(),
                            to: planned.destination.clone(),
                        }));
                    }
                    claimed.insert(planned.destination.clone());
                    renamed.push(CompletedRename {
                        from: planned.source.clone(),
                        to: planned.destination.clone(),
                        outcome: if dry_run {
                            RenameOutcome::Planned
                        } else {
                            RenameOutcome::Renamed
                        },
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "rename failed");
                    events.send(Event::Rename(RenameEvent::Failed {
                        from: planned.source.clone(),
                        to: planned.destination.clone(),
                        message: e.to_string(),
                    }));
                    failed.push(FailedRename {
                        from: planned.source.clone(),
                        to: planned.destination.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let report = RenameReport {
            plan_id: plan.id.clone(),
            dry_run,
            renamed,
            unchanged,
            skipped: plan.skipped.clone(),
            failed,
            scan_errors: plan.scan_errors.clone(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        events.send(Event::Rename(RenameEvent::Completed {
            summary: report.summary(),
        }));

        report
    }

    /// Rename a directory in place, refusing to replace anything
    pub fn rename_dir(from: &Path, to: &Path) -> Result<(), RenameError> {
        Self::check_destination(from, to)?;

        fs::rename(from, to).map_err(|source| RenameError::Io {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
    }

    fn check_destination(from: &Path, to: &Path) -> Result<(), RenameError> {
        // symlink_metadata also catches dangling links
        if fs::symlink_metadata(to).is_ok() {
            return Err(RenameError::DestinationExists {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }
        if to.parent().is_none() {
            return Err(RenameError::NoParent {
                from: from.to_path_buf(),
            });
        }
        Ok(())
    }
}
