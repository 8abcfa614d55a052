//! # Events Module
//!
//! Injected diagnostics for the renamer.
//!
//! ## Design
//! Components never print. They emit events through an `EventSender` passed
//! in by the caller, and the CLI (or a test) decides what to do with them.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Rename(RenameEvent::Renamed { from, to }) = event {
//!             println!("{} -> {}", from.display(), to.display());
//!         }
//!     }
//! });
//!
//! EventRenamer::new(RenameConfig::default()).run(&root, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
