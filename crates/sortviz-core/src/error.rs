//! Error type shared by every fallible core operation.
//!
//! Only caller contract violations surface here. Derived-data noise (stray
//! indices, mismatched snapshot lengths) is tolerated where it occurs and never
//! becomes an error.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VizError {
    /// A compare session needs at least one algorithm after deduplication.
    #[error("compare run requires at least one selected algorithm")]
    EmptySelection,

    /// An algorithm identifier outside the closed set of five.
    #[error("unknown algorithm id: {id}")]
    UnknownAlgorithm { id: String },

    /// Random input bounds are inverted.
    #[error("max_value ({max}) must be greater than or equal to min_value ({min})")]
    InvalidValueRange { min: i64, max: i64 },

    /// The drawing collaborator could not hand out a context.
    #[error("unable to initialize drawing surface: {reason}")]
    SurfaceUnavailable { reason: String },
}
