//! Startup-loaded lookup datasets.
//!
//! # Data Flow
//! ```text
//! dataset file (line-oriented)
//!     → vendors.rs / prices.rs (parse, skip malformed lines)
//!     → immutable table owned by the service state
//!     → shared via Arc to all request handlers, never written again
//! ```
//!
//! # Design Decisions
//! - Tables are built once at startup and injected; no globals, no reload
//! - Malformed lines are diagnostics, a missing file is fatal
//! - Read-only after construction, so concurrent readers need no locking

pub mod prices;
pub mod vendors;

pub use prices::PriceTable;
pub use vendors::VendorTable;

use std::path::PathBuf;

/// Error type for dataset loading.
#[derive(Debug)]
pub enum DatasetError {
    Io { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io { path, source } => {
                write!(f, "Failed to read dataset {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for DatasetError {}
