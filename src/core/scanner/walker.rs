//! Directory walking implementation using walkdir.

use super::{contains_sentinel, LeafLocator, LeafRule, LocateResult, DATE_UNKNOWN_SENTINEL};
use crate::error::ScanError;
use crate::events::{Event, EventSender, LocateEvent};
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the event folder locator
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Paths containing this marker are skipped
    pub sentinel: String,
    /// How a directory qualifies as an event folder
    pub leaf_rule: LeafRule,
    /// Whether the root itself may be a candidate
    pub include_root: bool,
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether hidden files count towards `LeafRule::AnyFile`
    pub include_hidden: bool,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            sentinel: DATE_UNKNOWN_SENTINEL.to_string(),
            leaf_rule: LeafRule::AnyFile,
            include_root: false,
            follow_symlinks: false,
            include_hidden: false,
        }
    }
}

/// Locator implementation using the walkdir crate
pub struct WalkDirLocator {
    config: LocatorConfig,
}

impl WalkDirLocator {
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    /// Check whether a directory is an event folder under the configured rule
    pub fn qualifies(&self, dir: &Path) -> std::io::Result<bool> {
        match self.config.leaf_rule {
            LeafRule::AnyFile => self.has_direct_file(dir),
            LeafRule::FirstEntry => first_entry_is_file(dir),
        }
    }

    fn has_direct_file(&self, dir: &Path) -> std::io::Result<bool> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !self.config.include_hidden && is_hidden(&entry.file_name()) {
                continue;
            }
            if entry.path().is_file() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// The first entry by file name decides
fn first_entry_is_file(dir: &Path) -> std::io::Result<bool> {
    let mut first: Option<PathBuf> = None;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if first.as_ref().map_or(true, |f| path.file_name() < f.file_name()) {
            first = Some(path);
        }
    }
    Ok(first.map_or(false, |p| p.is_file()))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map_or(false, |n| n.starts_with('.'))
}

impl LeafLocator for WalkDirLocator {
    fn locate(&self, root: &Path, events: &EventSender) -> Result<LocateResult, ScanError> {
        if !root.exists() {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        events.send(Event::Locate(LocateEvent::Started {
            root: root.to_path_buf(),
        }));

        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();
        if !self.config.include_root {
            walker = walker.min_depth(1);
        }

        let sentinel = self.config.sentinel.as_str();
        let mut found: Vec<(usize, PathBuf)> = Vec::new();
        let mut errors = Vec::new();

        let entries = walker.into_iter().filter_entry(|entry| {
            if entry.file_type().is_dir() && contains_sentinel(entry.path(), sentinel) {
                tracing::debug!(path = %entry.path().display(), "skipping sentinel directory");
                events.send(Event::Locate(LocateEvent::SentinelSkipped {
                    path: entry.path().to_path_buf(),
                }));
                return false;
            }
            true
        });

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                    events.send(Event::Locate(LocateEvent::Error {
                        path: path.clone(),
                        message: source.to_string(),
                    }));
                    errors.push(ScanError::ReadDirectory { path, source });
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            match self.qualifies(path) {
                Ok(true) => {
                    tracing::info!(path = %path.display(), "reached event folder");
                    events.send(Event::Locate(LocateEvent::LeafFound {
                        path: path.to_path_buf(),
                    }));
                    found.push((entry.depth(), path.to_path_buf()));
                }
                Ok(false) => {}
                Err(source) => {
                    events.send(Event::Locate(LocateEvent::Error {
                        path: path.to_path_buf(),
                        message: source.to_string(),
                    }));
                    errors.push(ScanError::ReadDirectory {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        // Stable: siblings keep their walk order
        found.sort_by_key(|(depth, _)| Reverse(*depth));
        let leaves: Vec<PathBuf> = found.into_iter().map(|(_, path)| path).collect();

        events.send(Event::Locate(LocateEvent::Completed {
            total_leaves: leaves.len(),
        }));

        Ok(LocateResult { leaves, errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::null_sender;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap();
    }

    fn locate(root: &Path, config: LocatorConfig) -> Vec<PathBuf> {
        WalkDirLocator::new(config)
            .locate(root, &null_sender())
            .unwrap()
            .leaves
    }

    #[test]
    fn empty_tree_has_no_leaves() {
        let temp = TempDir::new().unwrap();
        assert!(locate(temp.path(), LocatorConfig::default()).is_empty());
    }

    #[test]
    fn finds_directory_with_files() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("trip/a.jpg"));
        fs::create_dir_all(temp.path().join("structure/only")).unwrap();

        let leaves = locate(temp.path(), LocatorConfig::default());
        assert_eq!(leaves, vec![temp.path().join("trip")]);
    }

    #[test]
    fn sentinel_directories_are_never_candidates() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("date-unknown/a.jpg"));
        touch(&temp.path().join("date-unknown/nested/b.jpg"));
        touch(&temp.path().join("scans-date-unknown/c.jpg"));
        touch(&temp.path().join("trip/d.jpg"));

        let leaves = locate(temp.path(), LocatorConfig::default());
        assert_eq!(leaves, vec![temp.path().join("trip")]);
    }

    #[test]
    fn root_is_excluded_unless_configured() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("loose.jpg"));

        assert!(locate(temp.path(), LocatorConfig::default()).is_empty());

        let config = LocatorConfig {
            include_root: true,
            ..Default::default()
        };
        assert_eq!(locate(temp.path(), config), vec![temp.path().to_path_buf()]);
    }

    #[test]
    fn deeper_folders_come_first() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a/a.jpg"));
        touch(&temp.path().join("a/inner/b.jpg"));
        touch(&temp.path().join("b/c.jpg"));

        let leaves = locate(temp.path(), LocatorConfig::default());
        assert_eq!(
            leaves,
            vec![
                temp.path().join("a/inner"),
                temp.path().join("a"),
                temp.path().join("b"),
            ]
        );
    }

    #[test]
    fn any_file_rule_sees_files_behind_subdirectories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("mixed/aaa")).unwrap();
        touch(&temp.path().join("mixed/zzz.jpg"));

        let leaves = locate(temp.path(), LocatorConfig::default());
        assert_eq!(leaves, vec![temp.path().join("mixed")]);
    }

    #[test]
    fn first_entry_rule_skips_when_first_entry_is_a_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("mixed/aaa")).unwrap();
        touch(&temp.path().join("mixed/zzz.jpg"));
        touch(&temp.path().join("plain/a.jpg"));

        let config = LocatorConfig {
            leaf_rule: LeafRule::FirstEntry,
            ..Default::default()
        };
        let leaves = locate(temp.path(), config);
        assert_eq!(leaves, vec![temp.path().join("plain")]);
    }

    #[test]
    fn hidden_files_alone_do_not_qualify() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("junk/.DS_Store"));

        assert!(locate(temp.path(), LocatorConfig::default()).is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let locator = WalkDirLocator::new(LocatorConfig::default());
        let result = locator.locate(Path::new("/nonexistent/path/12345"), &null_sender());
        assert!(matches!(result, Err(ScanError::RootNotFound { .. })));
    }

    #[test]
    fn file_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.jpg");
        touch(&file);

        let locator = WalkDirLocator::new(LocatorConfig::default());
        let result = locator.locate(&file, &null_sender());
        assert!(matches!(result, Err(ScanError::NotADirectory { .. })));
    }
}
