use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use log::{debug, warn};

use super::parser::{parse_line, Instruction, Operation};
use super::report::{self, Report};
use crate::data::model::Dataset;
use crate::error::{OpError, ScriptError};
use crate::state::{RunSummary, Session};

/// First line of every `display` listing.
pub const DISPLAY_HEADER: &str = "Displaying county information:";

/// What a successful operation asks the run loop to print.
enum Outcome {
    /// The full current dataset, one record per line.
    Listing,
    Message(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Run the operations script at `script` against `dataset`, writing all
/// output (diagnostics included) to `out`.
///
/// Only a script that cannot be opened, or an I/O failure while reading it or
/// writing output, ends the run early. Bad lines are reported and skipped.
pub fn run<W: Write>(
    dataset: Dataset,
    script: &Path,
    out: &mut W,
) -> Result<RunSummary, ScriptError> {
    let file = File::open(script).map_err(|source| ScriptError::NotFound {
        path: script.to_path_buf(),
        source,
    })?;
    debug!("running operations from {}", script.display());

    let mut session = Session::new(dataset);
    run_lines(&mut session, BufReader::new(file), out)?;
    Ok(session.summary)
}

/// Apply every line of `reader` to `session` in order.
///
/// `\n`, `\r\n` and a bare `\r` all end a line.
pub fn run_lines<R: Read, W: Write>(
    session: &mut Session,
    mut reader: R,
    out: &mut W,
) -> Result<(), ScriptError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    for (idx, line) in script_lines(&text).enumerate() {
        let line_no = idx + 1;
        session.summary.lines += 1;

        let result = parse_line(line).and_then(|instruction| match instruction {
            Instruction::Skip => Ok(None),
            Instruction::Unknown(tag) => Ok(Some(Err(tag))),
            Instruction::Op(op) => {
                debug!("line {line_no}: {}", op.tag());
                execute(session, &op).map(|outcome| Some(Ok(outcome)))
            }
        });

        match result {
            Ok(None) => {}
            Ok(Some(Ok(outcome))) => {
                session.summary.applied += 1;
                emit(out, &session.dataset, outcome)?;
            }
            Ok(Some(Err(tag))) => {
                session.summary.invalid += 1;
                warn!("line {line_no}: unknown operation '{tag}'");
                writeln!(out, "Error: Invalid operation on line {line_no}")?;
            }
            Err(err) => {
                session.summary.malformed += 1;
                warn!("line {line_no}: {err}");
                writeln!(out, "Error: Malformed line {line_no} - {}", line.trim())?;
            }
        }
    }
    Ok(())
}

/// Split script text into physical lines. A trailing terminator does not
/// start an extra empty line.
fn script_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                let line = &rest[..end];
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
                Some(line)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn execute(session: &mut Session, op: &Operation) -> Result<Outcome, OpError> {
    let line = match op {
        Operation::Display => return Ok(Outcome::Listing),
        Operation::Filter(predicate) => {
            let n = session.refilter(predicate)?;
            return Ok(Outcome::Message(format!(
                "Filter: {predicate} ({n} entries)"
            )));
        }
        Operation::PopulationTotal => {
            Report::PopulationTotal(report::population_total(&session.dataset)?)
        }
        Operation::Population(field) => Report::SubPopulation {
            field: field.clone(),
            total: report::sub_population(&session.dataset, field)?,
        },
        Operation::Percent(field) => Report::Percent {
            field: field.clone(),
            percentage: report::percent(&session.dataset, field)?,
        },
    };
    Ok(Outcome::Message(line.to_string()))
}

fn emit<W: Write>(out: &mut W, dataset: &Dataset, outcome: Outcome) -> std::io::Result<()> {
    match outcome {
        Outcome::Listing => {
            writeln!(out, "{DISPLAY_HEADER}")?;
            for record in dataset {
                writeln!(out, "{record}")?;
            }
        }
        Outcome::Message(text) => writeln!(out, "{text}")?,
    }
    Ok(())
}
