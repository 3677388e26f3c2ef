use crate::data::filter::{self, Predicate};
use crate::data::model::Dataset;
use crate::error::OpError;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Tally of what a script run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Physical lines read, including blanks and comments.
    pub lines: usize,
    /// Operations that completed.
    pub applied: usize,
    /// Lines whose tag was not recognised.
    pub invalid: usize,
    /// Lines that failed and were rolled back.
    pub malformed: usize,
}

/// The interpreter's working state, independent of any output.
#[derive(Debug, Clone)]
pub struct Session {
    /// The current view; each successful filter replaces it.
    pub dataset: Dataset,

    /// Counters for the run so far.
    pub summary: RunSummary,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            summary: RunSummary::default(),
        }
    }

    /// Narrow the current dataset. On error the previous dataset stays in place.
    pub fn refilter(&mut self, predicate: &Predicate) -> Result<usize, OpError> {
        let narrowed = filter::apply(&self.dataset, predicate)?;
        self.dataset = narrowed;
        Ok(self.dataset.len())
    }
}
