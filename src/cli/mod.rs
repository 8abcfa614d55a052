//! # CLI Module
//!
//! Command-line interface for the event folder renamer.
//!
//! ## Usage
//! ```bash
//! # Preview the new folder names
//! photo-events rename ~/Photos --dry-run
//!
//! # Rename, reproducing the old "first entry must be a file" check
//! photo-events rename ~/Photos --leaf-rule first-entry
//!
//! # JSON report
//! photo-events rename ~/Photos --output json
//!
//! # Size histogram of all photos
//! photo-events stats ~/Photos --chart Distribution.png
//! ```
//!
//! Set `RUST_LOG=photo_event_namer=debug` for detailed diagnostics.

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_event_namer::core::rename::{EventRenamer, RenameConfig, RenameOutcome, RenameReport};
use photo_event_namer::core::scanner::{LeafRule, DATE_UNKNOWN_SENTINEL};
use photo_event_namer::core::stats::{size_report, SizeReport, StatsConfig};
use photo_event_namer::events::{
    Event, EventChannel, EventReceiver, ExtractEvent, RenameEvent, RunEvent, StatsEvent,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

/// Photo Event Namer - name event folders after when their photos were taken
#[derive(Parser, Debug)]
#[command(name = "photo-events")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rename every event folder after the date range of its photos
    Rename {
        /// Root of the photo tree
        root: PathBuf,

        /// Show the new names without renaming anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// How a folder qualifies as an event folder
        #[arg(long, default_value = "any-file")]
        leaf_rule: Rule,

        /// Folders whose path contains this marker are left alone
        #[arg(long, default_value = DATE_UNKNOWN_SENTINEL)]
        sentinel: String,

        /// How deep below an event folder photos are collected
        #[arg(long, default_value = "2")]
        depth: usize,

        /// Allow the root folder itself to be renamed
        #[arg(long)]
        include_root: bool,

        /// Follow symbolic links
        #[arg(long)]
        follow_symlinks: bool,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Plot the distribution of photo sizes
    Stats {
        /// Root of the photo tree
        root: PathBuf,

        /// Number of histogram bins
        #[arg(short, long, default_value = "30")]
        bins: usize,

        /// Where to write the PNG chart
        #[arg(short, long, default_value = "Distribution.png")]
        chart: PathBuf,

        /// Chart width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Chart height in pixels
        #[arg(long, default_value = "480")]
        height: u32,

        /// Paths containing this marker are not measured
        #[arg(long, default_value = DATE_UNKNOWN_SENTINEL)]
        sentinel: String,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Rule {
    /// Any regular file in the folder's listing qualifies it
    AnyFile,
    /// Only the first entry of the listing is checked
    FirstEntry,
}

impl From<Rule> for LeafRule {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::AnyFile => LeafRule::AnyFile,
            Rule::FirstEntry => LeafRule::FirstEntry,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (one `old -> new` line per rename)
    Minimal,
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let term = Term::stderr();

    let result = match cli.command {
        Commands::Rename {
            root,
            dry_run,
            leaf_rule,
            sentinel,
            depth,
            include_root,
            follow_symlinks,
            include_hidden,
            output,
            verbose,
        } => {
            let config = RenameConfig::default()
                .with_dry_run(dry_run)
                .with_leaf_rule(leaf_rule.into())
                .with_sentinel(sentinel)
                .with_nested_depth(depth)
                .with_include_root(include_root)
                .with_follow_symlinks(follow_symlinks)
                .with_include_hidden(include_hidden);
            run_rename(&term, &root, config, output, verbose)
        }
        Commands::Stats {
            root,
            bins,
            chart,
            width,
            height,
            sentinel,
            output,
        } => {
            let config = StatsConfig {
                sentinel,
                bins,
                output: chart,
                width,
                height,
                ..Default::default()
            };
            run_stats(&term, &root, config, output)
        }
    };

    match result {
        Ok(code) => code,
        Err(message) => {
            term.write_line(&format!("{} {}", style("error:").red().bold(), message))
                .ok();
            ExitCode::FAILURE
        }
    }
}

fn progress_bar(output: OutputFormat) -> Option<ProgressBar> {
    if !matches!(output, OutputFormat::Pretty) {
        return None;
    }
    let pb = ProgressBar::new(0);
    if let Ok(bar_style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(bar_style.progress_chars("█▓░"));
    }
    Some(pb)
}

/// Feed events to the progress bar until the sender side is dropped
fn spawn_event_thread(
    receiver: EventReceiver,
    progress: Option<ProgressBar>,
    verbose: bool,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress else {
                continue;
            };
            match event {
                Event::Run(RunEvent::PhaseChanged { phase }) => {
                    pb.set_message(phase.to_string());
                }
                Event::Rename(RenameEvent::PlanningStarted { total_candidates }) => {
                    pb.set_length(total_candidates as u64);
                    pb.set_position(0);
                }
                Event::Rename(RenameEvent::Planned { .. })
                | Event::Rename(RenameEvent::Skipped { .. }) => {
                    pb.inc(1);
                }
                Event::Rename(RenameEvent::Progress(p)) => {
                    pb.set_length(p.total as u64);
                    pb.set_position(p.completed as u64);
                }
                Event::Extract(ExtractEvent::MetadataFallback { path, reason }) if verbose => {
                    pb.println(format!(
                        "  {} {} ({})",
                        style("no EXIF date:").dim(),
                        display_path(&path),
                        reason
                    ));
                }
                Event::Stats(StatsEvent::Error { path, message }) => {
                    pb.println(format!(
                        "  {} {}: {}",
                        style("unreadable").yellow(),
                        display_path(&path),
                        message
                    ));
                }
                Event::Stats(StatsEvent::Progress { images_found, .. }) => {
                    pb.set_message(format!("{} photos measured", images_found));
                }
                Event::Rename(RenameEvent::Completed { .. })
                | Event::Stats(StatsEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    })
}

fn run_rename(
    term: &Term,
    root: &Path,
    config: RenameConfig,
    output: OutputFormat,
    verbose: bool,
) -> Result<ExitCode, String> {
    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Event Namer").bold().cyan(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let (sender, receiver) = EventChannel::new();
    let event_thread = spawn_event_thread(receiver, progress_bar(output), verbose);

    let result = EventRenamer::new(config).run(root, &sender);

    drop(sender);
    event_thread.join().ok();

    let report = result.map_err(|e| e.to_string())?;

    match output {
        OutputFormat::Pretty => print_pretty_report(term, &report, verbose),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Minimal => print_minimal_report(&report),
    }

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_pretty_report(term: &Term, report: &RenameReport, verbose: bool) {
    let heading = if report.dry_run {
        "Dry Run Complete (nothing was renamed)"
    } else {
        "Rename Complete"
    };
    term.write_line(&format!("{} {}", style("✓").green().bold(), heading))
        .ok();
    term.write_line("").ok();

    let summary = report.summary();
    term.write_line(&format!(
        "  {} folders {}",
        style(summary.renamed).cyan(),
        if report.dry_run { "to rename" } else { "renamed" }
    ))
    .ok();
    term.write_line(&format!(
        "  {} folders already named",
        style(summary.unchanged).cyan()
    ))
    .ok();
    if summary.skipped > 0 {
        term.write_line(&format!(
            "  {} folders skipped",
            style(summary.skipped).yellow()
        ))
        .ok();
    }
    if summary.failed > 0 {
        term.write_line(&format!("  {} renames failed", style(summary.failed).red()))
            .ok();
    }
    term.write_line("").ok();

    for rename in &report.renamed {
        let marker = match rename.outcome {
            RenameOutcome::Renamed => style("→").green().to_string(),
            RenameOutcome::Planned => style("⇢").dim().to_string(),
        };
        term.write_line(&format!(
            "  {} {} {}",
            display_path(&rename.from),
            marker,
            rename
                .to
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
        ))
        .ok();
    }

    if verbose {
        for path in &report.unchanged {
            term.write_line(&format!("  {} {}", style("=").dim(), display_path(path)))
                .ok();
        }
    }

    for skipped in &report.skipped {
        term.write_line(&format!(
            "  {} {}: {}",
            style("skipped").yellow(),
            display_path(&skipped.path),
            skipped.reason
        ))
        .ok();
    }

    for error in &report.scan_errors {
        term.write_line(&format!("  {} {}", style("unreadable").yellow(), error))
            .ok();
    }

    if !report.failed.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!("{}", style("Failed renames:").bold().underlined()))
            .ok();
        for failure in &report.failed {
            term.write_line(&format!("  {} {}", style("✗").red(), failure.message))
                .ok();
        }
    }
}

fn print_minimal_report(report: &RenameReport) {
    for rename in &report.renamed {
        println!("{} -> {}", rename.from.display(), rename.to.display());
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn run_stats(
    term: &Term,
    root: &Path,
    config: StatsConfig,
    output: OutputFormat,
) -> Result<ExitCode, String> {
    let (sender, receiver) = EventChannel::new();
    let event_thread = spawn_event_thread(receiver, progress_bar(output), false);

    let result = size_report(root, &config, &sender);

    drop(sender);
    event_thread.join().ok();

    let report = result.map_err(|e| e.to_string())?;

    match output {
        OutputFormat::Pretty => print_pretty_stats(term, &report),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Minimal => println!("{}", report.chart_path.display()),
    }

    Ok(ExitCode::SUCCESS)
}

fn print_pretty_stats(term: &Term, report: &SizeReport) {
    term.write_line(&format!(
        "{} ({}) Distribution of picture sizes",
        style("✓").green().bold(),
        report.total_images
    ))
    .ok();
    term.write_line("").ok();
    term.write_line(&format!(
        "  mean {:.2} MB, median {:.2} MB, max {:.2} MB, total {}",
        report.mean_mib,
        report.median_mib,
        report.max_mib,
        format_bytes(report.total_bytes)
    ))
    .ok();
    term.write_line("").ok();

    const BAR_WIDTH: usize = 40;
    let peak = report.histogram.peak().max(1);
    for (i, &count) in report.histogram.counts.iter().enumerate() {
        let (lower, upper) = report.histogram.bin_edges(i);
        let filled = count * BAR_WIDTH / peak;
        term.write_line(&format!(
            "  {:>6.2}-{:<6.2} MB {} {}",
            lower,
            upper,
            style("█".repeat(filled)).cyan(),
            count
        ))
        .ok();
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "  chart written to {}",
        style(report.chart_path.display()).yellow()
    ))
    .ok();
}

/// Shorten paths under the home directory to `~/...`
fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
