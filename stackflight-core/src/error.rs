//! Error types for StackFlight.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use crate::provider::ProviderError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for StackFlight operations.
pub type Result<T> = std::result::Result<T, FlightError>;

/// Main error type for StackFlight.
#[derive(Error, Debug)]
pub enum FlightError {
    // Configuration errors are fatal and reported before any worker is spawned
    #[error("stack count {count} is outside the allowed range 1..={max}")]
    StackCountOutOfRange { count: usize, max: usize },

    #[error("failed to read {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parameter file {path:?}: {reason}")]
    InvalidParameters { path: PathBuf, reason: String },

    #[error("provider rejected request: {0}")]
    Provider(#[from] ProviderError),
}
