use crate::data::filter::Predicate;
use crate::data::model::parse_float;
use crate::error::OpError;

/// Marks a comment line in an operations script.
pub const COMMENT_PREFIX: char = '#';
/// Separates the tag and arguments of a script line.
pub const FIELD_SEPARATOR: char = ':';

// ---------------------------------------------------------------------------
// Operation – one parsed script instruction
// ---------------------------------------------------------------------------

/// A recognised instruction with its arguments already decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// `display`
    Display,
    /// `filter-state:<state>`, `filter-gt:<field>:<n>`, `filter-lt:<field>:<n>`
    Filter(Predicate),
    /// `population-total`
    PopulationTotal,
    /// `population:<field>`
    Population(String),
    /// `percent:<field>`
    Percent(String),
}

impl Operation {
    /// The script tag this operation was written with.
    pub fn tag(&self) -> &'static str {
        match self {
            Operation::Display => "display",
            Operation::Filter(Predicate::StateEquals(_)) => "filter-state",
            Operation::Filter(Predicate::GreaterThan { .. }) => "filter-gt",
            Operation::Filter(Predicate::LessThan { .. }) => "filter-lt",
            Operation::PopulationTotal => "population-total",
            Operation::Population(_) => "population",
            Operation::Percent(_) => "percent",
        }
    }
}

/// What a single physical script line turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Blank or `#` comment.
    Skip,
    /// A tag outside the known set.
    Unknown(String),
    Op(Operation),
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// Parse one physical script line.
///
/// The line is trimmed, then split on `:`. Arguments are taken verbatim (no
/// further trimming) and any beyond those the operation needs are ignored.
/// Thresholds are decoded here, so a bad number fails before any record is read.
pub fn parse_line(raw: &str) -> Result<Instruction, OpError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return Ok(Instruction::Skip);
    }

    let mut parts = line.split(FIELD_SEPARATOR);
    let tag = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();
    let arg = |idx: usize, op: &'static str, what: &'static str| {
        args.get(idx)
            .map(|s| s.to_string())
            .ok_or(OpError::MissingArgument { op, what })
    };

    let op = match tag {
        "display" => Operation::Display,
        "filter-state" => {
            Operation::Filter(Predicate::StateEquals(arg(0, "filter-state", "state")?))
        }
        "filter-gt" => Operation::Filter(Predicate::GreaterThan {
            field: arg(0, "filter-gt", "field")?,
            threshold: parse_float(&arg(1, "filter-gt", "threshold")?)?,
        }),
        "filter-lt" => Operation::Filter(Predicate::LessThan {
            field: arg(0, "filter-lt", "field")?,
            threshold: parse_float(&arg(1, "filter-lt", "threshold")?)?,
        }),
        "population-total" => Operation::PopulationTotal,
        "population" => Operation::Population(arg(0, "population", "field")?),
        "percent" => Operation::Percent(arg(0, "percent", "field")?),
        other => return Ok(Instruction::Unknown(other.to_string())),
    };
    Ok(Instruction::Op(op))
}
