//! Plan generator for rename runs.

use super::types::*;
use crate::core::metadata::TimestampExtractor;
use crate::core::range::RangeReducer;
use crate::core::scanner::{LeafLocator, WalkDirLocator};
use crate::error::ScanError;
use crate::events::{Event, EventSender, RenameEvent, RunEvent, RunPhase};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Generates rename plans
pub struct RenamePlanner;

impl RenamePlanner {
    /// Locate event folders under `root` and work out their new names
    pub fn create_plan(
        root: &Path,
        config: &RenameConfig,
        events: &EventSender,
    ) -> Result<RenamePlan, ScanError> {
        let locator = WalkDirLocator::new(config.locator.clone());
        let reducer = RangeReducer::new(config.image_filter(), config.nested_depth);
        Self::plan_with(&locator, &reducer, root, events)
    }

    /// Same as [`create_plan`](Self::create_plan) with explicit collaborators
    pub fn plan_with<L, E>(
        locator: &L,
        reducer: &RangeReducer<E>,
        root: &Path,
        events: &EventSender,
    ) -> Result<RenamePlan, ScanError>
    where
        L: LeafLocator,
        E: TimestampExtractor,
    {
        let located = locator.locate(root, events)?;

        events.send(Event::Run(RunEvent::PhaseChanged {
            phase: RunPhase::Dating,
        }));
        events.send(Event::Rename(RenameEvent::PlanningStarted {
            total_candidates: located.leaves.len(),
        }));

        let mut renames = Vec::new();
        let mut skipped = Vec::new();

        for leaf in located.leaves {
            let reduced = match reducer.reduce(&leaf, events) {
                Ok(reduced) => reduced,
                Err(e) => {
                    tracing::warn!(path = %leaf.display(), error = %e, "skipping folder");
                    Self::skip(&mut skipped, leaf, e.to_string(), events);
                    continue;
                }
            };

            let new_name = reduced.range.folder_name();
            let Some(destination) = Self::destination_for(&leaf, &new_name) else {
                Self::skip(&mut skipped, leaf, "folder has no parent".to_string(), events);
                continue;
            };

            events.send(Event::Rename(RenameEvent::Planned {
                from: leaf.clone(),
                to: destination.clone(),
            }));

            renames.push(PlannedRename {
                source: leaf,
                destination,
                new_name,
                range: reduced.range,
                image_count: reduced.image_count,
                metadata_count: reduced.metadata_count,
                fallback_count: reduced.fallback_count,
            });
        }

        Ok(RenamePlan {
            id: Uuid::new_v4().to_string(),
            root: root.to_path_buf(),
            renames,
            skipped,
            scan_errors: located.errors.iter().map(|e| e.to_string()).collect(),
        })
    }

    /// Sibling path carrying the new name
    fn destination_for(source: &Path, new_name: &str) -> Option<PathBuf> {
        source.file_name()?;
        source.parent().map(|parent| parent.join(new_name))
    }

    fn skip(skipped: &mut Vec<SkippedFolder>, path: PathBuf, reason: String, events: &EventSender) {
        events.send(Event::Rename(RenameEvent::Skipped {
            path: path.clone(),
            message: reason.clone(),
        }));
        skipped.push(SkippedFolder { path, reason });
    }
}
