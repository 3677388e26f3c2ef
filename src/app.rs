use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::info;

use crate::cli::Cli;
use crate::data::loader::load_file;
use crate::error::{LoadError, ScriptError};
use crate::script;

// ---------------------------------------------------------------------------
// Top-level run: load the dataset, then interpret the script
// ---------------------------------------------------------------------------

/// How the process should exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// A required file could not be opened; the diagnostic is already written.
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::from(1),
        }
    }
}

/// Load `cli.data`, run `cli.operations_file` against it, and write every
/// user-facing line (diagnostics included) to `out`.
///
/// Missing files are reported on `out` and yield [`Status::Failure`]; other
/// failures (unreadable CSV, broken pipe) come back as errors.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<Status> {
    let dataset = match load_file(&cli.data) {
        Ok(ds) => ds,
        Err(LoadError::NotFound { path, source }) => {
            info!("data file {}: {source}", path.display());
            writeln!(out, "Error: Could not open data file '{}'", path.display())?;
            return Ok(Status::Failure);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("reading data file '{}'", cli.data.display()))
        }
    };
    writeln!(out, "Loaded {} entries from the dataset.", dataset.len())?;

    match script::run(dataset, &cli.operations_file, out) {
        Ok(summary) => {
            info!(
                "{} lines: {} applied, {} invalid, {} malformed",
                summary.lines, summary.applied, summary.invalid, summary.malformed
            );
            Ok(Status::Success)
        }
        Err(ScriptError::NotFound { path, source }) => {
            info!("operations file {}: {source}", path.display());
            writeln!(
                out,
                "Error: Could not open operations file '{}'",
                path.display()
            )?;
            Ok(Status::Failure)
        }
        Err(err) => Err(err).context("running operations script"),
    }
}
