//! Locus: immutable 3-D coordinates in Cartesian and spherical form
//!
//! This crate provides a point in 3-D space that can be held either as
//! Cartesian `(x, y, z)` or as spherical `(radius, latitude, longitude)`,
//! together with distance, central angle, equality and persistence operations
//! that behave the same regardless of which representation a caller holds.

use thiserror::Error;

pub mod constants;
pub mod coordinates;
pub mod location;
pub mod persistence;

// Re-export commonly used types
pub use coordinates::{AnyCoordinate, Cartesian3, Coordinate, Spherical};
pub use location::Location;
pub use persistence::{MemoryRecord, Record, RecordError};

/// Main error type for the locus library
#[derive(Debug, Error)]
pub enum CoordinateError {
    /// A constructor or reader was handed a value outside its declared range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A distance, angle or conversion produced a non-finite or out-of-range value
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// An internal consistency verification failed
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// The backing record store rejected a read or write
    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

/// Result type for locus operations
pub type Result<T> = std::result::Result<T, CoordinateError>;
