use std::fmt;

use crate::data::model::{format_float, Dataset};
use crate::error::OpError;

/// Column holding each county's head count.
pub const POPULATION_COLUMN: &str = "Population";

// ---------------------------------------------------------------------------
// Aggregates over the current dataset
// ---------------------------------------------------------------------------

/// Sum of the integer `Population` column.
pub fn population_total(dataset: &Dataset) -> Result<i64, OpError> {
    dataset
        .iter()
        .enumerate()
        .try_fold(0i64, |acc, (row, record)| {
            let pop = record.integer(POPULATION_COLUMN, row)?;
            acc.checked_add(pop).ok_or_else(|| OpError::Overflow {
                field: POPULATION_COLUMN.to_string(),
            })
        })
}

/// Head count implied by a percentage column: Σ (field / 100) × Population.
///
/// `None` when there are no records to sum.
pub fn sub_population(dataset: &Dataset, field: &str) -> Result<Option<f64>, OpError> {
    if dataset.is_empty() {
        return Ok(None);
    }
    let mut total = 0.0;
    for (row, record) in dataset.iter().enumerate() {
        let share = record.float(field, row)? / 100.0;
        let pop = record.integer(POPULATION_COLUMN, row)?;
        total += share * pop as f64;
    }
    Ok(Some(total))
}

/// Sub-population as a percentage of the total; `None` when the total is zero.
pub fn percent(dataset: &Dataset, field: &str) -> Result<Option<f64>, OpError> {
    let total = population_total(dataset)?;
    let sub = sub_population(dataset, field)?.unwrap_or(0.0);
    if total == 0 {
        return Ok(None);
    }
    Ok(Some(sub / total as f64 * 100.0))
}

// ---------------------------------------------------------------------------
// Report lines
// ---------------------------------------------------------------------------

/// One line of statistics output.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    PopulationTotal(i64),
    SubPopulation { field: String, total: Option<f64> },
    Percent { field: String, percentage: Option<f64> },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // An absent float (nothing summed, or zero total) prints as a bare `0`.
        let amount = |v: &Option<f64>| v.map(format_float).unwrap_or_else(|| "0".to_string());
        match self {
            Report::PopulationTotal(total) => write!(f, "2014 population: {total}"),
            Report::SubPopulation { field, total } => {
                write!(f, "2014 {field} population: {}", amount(total))
            }
            Report::Percent { field, percentage } => {
                write!(f, "2014 {field} percentage: {}", amount(percentage))
            }
        }
    }
}
