//! # Stats Module
//!
//! One-shot diagnostic report: how large are the photos under a root?
//!
//! Sizes are measured in MiB, binned into equal-width buckets, and drawn
//! as a PNG bar chart. Paths containing the sentinel marker are ignored.

mod chart;
mod histogram;

pub use chart::{render_histogram, save_histogram_png};
pub use histogram::SizeHistogram;

use crate::core::scanner::{contains_sentinel, ImageFilter, DATE_UNKNOWN_SENTINEL, DEFAULT_EXTENSIONS};
use crate::error::{ReportError, ScanError};
use crate::events::{Event, EventSender, RunEvent, RunPhase, StatsEvent};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Configuration for the size report
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub sentinel: String,
    pub extensions: Vec<String>,
    pub bins: usize,
    /// Where the chart is written
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            sentinel: DATE_UNKNOWN_SENTINEL.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            bins: 30,
            output: PathBuf::from("Distribution.png"),
            width: 800,
            height: 480,
        }
    }
}

/// Outcome of a size report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeReport {
    pub root: PathBuf,
    pub total_images: usize,
    pub total_bytes: u64,
    pub mean_mib: f64,
    pub median_mib: f64,
    pub max_mib: f64,
    pub histogram: SizeHistogram,
    pub chart_path: PathBuf,
}

/// Sizes of all photos under `root`, in MiB
pub fn collect_image_sizes(
    root: &Path,
    config: &StatsConfig,
    events: &EventSender,
) -> Result<Vec<f64>, ScanError> {
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

    events.send(Event::Stats(StatsEvent::Started {
        root: root.to_path_buf(),
    }));

    let filter = ImageFilter::new().with_extensions(config.extensions.clone());
    let sentinel = config.sentinel.as_str();
    let mut sizes = Vec::new();
    let mut files_scanned = 0usize;

    let entries = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !contains_sentinel(e.path(), sentinel));

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                report_unreadable(events, path, e.to_string());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        files_scanned += 1;
        if files_scanned % 500 == 0 {
            events.send(Event::Stats(StatsEvent::Progress {
                files_scanned,
                images_found: sizes.len(),
            }));
        }

        if !filter.should_include(entry.path()) {
            continue;
        }
        match fs::metadata(entry.path()) {
            Ok(metadata) => sizes.push(metadata.len() as f64 / BYTES_PER_MIB),
            Err(e) => report_unreadable(events, entry.into_path(), e.to_string()),
        }
    }

    events.send(Event::Stats(StatsEvent::Completed {
        total_images: sizes.len(),
    }));

    Ok(sizes)
}

fn report_unreadable(events: &EventSender, path: PathBuf, message: String) {
    tracing::warn!(path = %path.display(), error = %message, "cannot measure");
    events.send(Event::Stats(StatsEvent::Error { path, message }));
}

/// Measure every photo under `root`, then write the histogram chart
pub fn size_report(
    root: &Path,
    config: &StatsConfig,
    events: &EventSender,
) -> crate::Result<SizeReport> {
    events.send(Event::Run(RunEvent::PhaseChanged {
        phase: RunPhase::Measuring,
    }));
    let sizes = collect_image_sizes(root, config, events)?;

    let histogram =
        SizeHistogram::from_sizes(&sizes, config.bins.max(1)).ok_or_else(|| ReportError::NoImages {
            path: root.to_path_buf(),
        })?;

    events.send(Event::Run(RunEvent::PhaseChanged {
        phase: RunPhase::Rendering,
    }));
    save_histogram_png(&histogram, &config.output, config.width, config.height)?;
    tracing::info!(
        images = sizes.len(),
        chart = %config.output.display(),
        "distribution of picture sizes written"
    );

    let mut sorted = sizes.clone();
    sorted.sort_by(f64::total_cmp);
    let total_mib: f64 = sorted.iter().sum();

    Ok(SizeReport {
        root: root.to_path_buf(),
        total_images: sorted.len(),
        total_bytes: (total_mib * BYTES_PER_MIB).round() as u64,
        mean_mib: total_mib / sorted.len() as f64,
        median_mib: median(&sorted),
        max_mib: sorted.last().copied().unwrap_or(0.0),
        histogram,
        chart_path: config.output.clone(),
    })
}

/// Median of an ascending, non-empty slice
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::null_sender;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_file(path: &Path, size: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = fs::File::create(path).unwrap();
        file.write_all(&vec![0u8; size]).unwrap();
    }

    #[test]
    fn collects_jpeg_sizes_outside_sentinel() {
        let temp = TempDir::new().unwrap();
        create_test_file(&temp.path().join("a/one.jpg"), 1024 * 1024);
        create_test_file(&temp.path().join("a/two.JPG"), 512 * 1024);
        create_test_file(&temp.path().join("a/clip.mp4"), 2048);
        create_test_file(&temp.path().join("date-unknown/three.jpg"), 4096);

        let mut sizes =
            collect_image_sizes(temp.path(), &StatsConfig::default(), &null_sender()).unwrap();
        sizes.sort_by(f64::total_cmp);

        assert_eq!(sizes, vec![0.5, 1.0]);
    }

    #[test]
    fn report_writes_chart() {
        let temp = TempDir::new().unwrap();
        create_test_file(&temp.path().join("a/one.jpg"), 1024 * 1024);
        create_test_file(&temp.path().join("a/two.jpg"), 3 * 1024 * 1024);

        let config = StatsConfig {
            output: temp.path().join("chart.png"),
            ..Default::default()
        };
        let report = size_report(temp.path(), &config, &null_sender()).unwrap();

        assert_eq!(report.total_images, 2);
        assert_eq!(report.total_bytes, 4 * 1024 * 1024);
        assert!((report.mean_mib - 2.0).abs() < 1e-9);
        assert!((report.median_mib - 2.0).abs() < 1e-9);
        assert!((report.max_mib - 3.0).abs() < 1e-9);
        assert_eq!(report.histogram.total(), 2);
        assert!(report.chart_path.exists());
    }

    #[test]
    fn report_without_images_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config = StatsConfig {
            output: temp.path().join("chart.png"),
            ..Default::default()
        };
        let result = size_report(temp.path(), &config, &null_sender());
        assert!(matches!(
            result,
            Err(crate::EventNamerError::Report(ReportError::NoImages { .. }))
        ));
    }

    #[test]
    fn missing_root_is_an_error() {
        let result = collect_image_sizes(
            Path::new("/nonexistent/photos/12345"),
            &StatsConfig::default(),
            &null_sender(),
        );
        assert!(matches!(result, Err(ScanError::RootNotFound { .. })));
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let photo = temp.path().join("one.jpg");
        create_test_file(&photo, 1024);

        let result = collect_image_sizes(&photo, &StatsConfig::default(), &null_sender());
        assert!(matches!(result, Err(ScanError::NotADirectory { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_reported() {
        use crate::events::EventChannel;
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        create_test_file(&temp.path().join("a/one.jpg"), 1024 * 1024);
        let locked = temp.path().join("locked");
        create_test_file(&locked.join("two.jpg"), 1024);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permissions do not apply to root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let (sender, receiver) = EventChannel::new();
        let sizes = collect_image_sizes(temp.path(), &StatsConfig::default(), &sender).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(sizes, vec![1.0]);
        let errors: Vec<_> = receiver
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                Event::Stats(StatsEvent::Error { path, .. }) => Some(path),
                _ => None,
            })
            .collect();
        assert_eq!(errors, vec![locked]);
    }

    #[test]
    fn median_of_even_and_odd() {
        assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }
}
