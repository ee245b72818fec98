//! Error types for the takeoff engine.

use thiserror::Error;

/// Errors that can abort an extraction.
///
/// Empty drawings, drawings without closed loops, unlabeled shapes and
/// unclassifiable pieces are not errors; they produce an empty or partial
/// catalogue instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input primitive is malformed (non-finite coordinates, bad radius, ...).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for takeoff operations.
pub type Result<T> = std::result::Result<T, Error>;
