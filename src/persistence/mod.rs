//! Tabular record store seam
//!
//! Coordinates are persisted into three numeric columns of a record owned by
//! the caller. The store itself lives outside this crate; only the column
//! contract is consumed, expressed here as the [`Record`] trait.
//! [`MemoryRecord`] is a small in-memory implementation that can also be
//! round-tripped through JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by a record store
#[derive(Error, Debug)]
pub enum RecordError {
    /// The requested column holds no value
    #[error("Column not present in record: {0}")]
    MissingColumn(String),

    /// The record could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A single row of a tabular store exposing named floating-point columns
pub trait Record {
    /// Read the value stored in `column`
    fn get_f64(&self, column: &str) -> Result<f64, RecordError>;

    /// Store `value` in `column`, replacing any previous value
    fn set_f64(&mut self, column: &str, value: f64) -> Result<(), RecordError>;
}

/// In-memory record keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    columns: BTreeMap<String, f64>,
}

impl MemoryRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of populated columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if no column has been written
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over `(column, value)` pairs in column order
    pub fn columns(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Serialize the record as a JSON object
    ///
    /// Non-finite values have no JSON representation and are written as `null`,
    /// which [`MemoryRecord::from_json`] will refuse to read back.
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a record previously produced by [`MemoryRecord::to_json`]
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Record for MemoryRecord {
    fn get_f64(&self, column: &str) -> Result<f64, RecordError> {
        self.columns
            .get(column)
            .copied()
            .ok_or_else(|| RecordError::MissingColumn(column.to_string()))
    }

    fn set_f64(&mut self, column: &str, value: f64) -> Result<(), RecordError> {
        self.columns.insert(column.to_string(), value);
        Ok(())
    }
}
