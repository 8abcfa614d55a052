//! # photo-events CLI
//!
//! ## Usage
//! ```bash
//! photo-events rename ~/Photos --dry-run
//! photo-events rename ~/Photos --output json
//! photo-events stats ~/Photos --bins 30 --chart Distribution.png
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    photo_event_namer::init_tracing();
    cli::run()
}
