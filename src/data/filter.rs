use std::fmt;

use super::model::{format_float, Dataset, Record};
use crate::error::OpError;

/// Column compared by [`Predicate::StateEquals`].
pub const STATE_COLUMN: &str = "State";

// ---------------------------------------------------------------------------
// Filter predicate: which records survive a filter step
// ---------------------------------------------------------------------------

/// A single row predicate applied by a filter operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `State` equals the value exactly (case-sensitive).
    StateEquals(String),
    /// The column, read as a float, is strictly greater than the threshold.
    GreaterThan { field: String, threshold: f64 },
    /// The column, read as a float, is strictly less than the threshold.
    LessThan { field: String, threshold: f64 },
}

impl Predicate {
    /// Evaluate against one record. `row` only feeds error messages.
    pub fn matches(&self, record: &Record, row: usize) -> Result<bool, OpError> {
        match self {
            Predicate::StateEquals(state) => match record.get(STATE_COLUMN) {
                Some(value) => Ok(value == state),
                None => Err(OpError::MissingField {
                    field: STATE_COLUMN.to_string(),
                    row,
                }),
            },
            Predicate::GreaterThan { field, threshold } => {
                Ok(record.float(field, row)? > *threshold)
            }
            Predicate::LessThan { field, threshold } => {
                Ok(record.float(field, row)? < *threshold)
            }
        }
    }
}

/// `state == AL`, `Population gt 150.0`
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::StateEquals(state) => write!(f, "state == {state}"),
            Predicate::GreaterThan { field, threshold } => {
                write!(f, "{field} gt {}", format_float(*threshold))
            }
            Predicate::LessThan { field, threshold } => {
                write!(f, "{field} lt {}", format_float(*threshold))
            }
        }
    }
}

/// Return a new dataset holding the records that pass `predicate`, in order.
///
/// Any record that cannot be evaluated (missing column, non-numeric cell) fails
/// the whole step and leaves the caller's dataset in place.
pub fn apply(dataset: &Dataset, predicate: &Predicate) -> Result<Dataset, OpError> {
    dataset.select(|row, record| predicate.matches(record, row))
}
