//! # Photo Event Namer
//!
//! Renames photo "event" folders after the dates their pictures were taken.
//!
//! A folder holding photos shot from March 2nd to March 4th 2019 becomes
//! `2019-03-02__to__03-04`; a single-day event becomes `2019-03-02`.
//! Folders whose path contains `date-unknown` are never touched.
//!
//! ## Architecture
//! - `core` - Capture times, date ranges, folder names, renaming, size stats
//! - `events` - Injected diagnostics (no global logging from the core)
//! - `error` - Typed error hierarchy

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{EventNamerError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }
}
