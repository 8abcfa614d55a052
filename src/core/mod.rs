//! # Core Module
//!
//! The UI-agnostic event folder engine.
//!
//! ## Modules
//! - `metadata` - Reads the capture time of a photo
//! - `range` - Reduces an event folder to its earliest and latest capture time
//! - `naming` - Formats event folder names
//! - `scanner` - Finds event folders in a photo tree
//! - `rename` - Plans and performs the renames
//! - `stats` - Photo size histogram report

pub mod metadata;
pub mod naming;
pub mod range;
pub mod rename;
pub mod scanner;
pub mod stats;

// Re-export commonly used types
pub use metadata::CaptureTime;
pub use naming::event_folder_name;
pub use range::{DirectoryRange, EventRange};
pub use rename::{EventRenamer, RenameConfig, RenameReport};
pub use scanner::{LeafRule, DATE_UNKNOWN_SENTINEL};
pub use stats::{SizeReport, StatsConfig};
