use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

/// Dataset read when `--data` is not given.
pub const DEFAULT_DATA_FILE: &str = "demographics.csv";

/// Printed for any malformed command line.
pub const USAGE: &str = "Usage: county-ops <operations_file>";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "county-ops",
    version,
    about = "Filter county demographics and report population statistics"
)]
pub struct Cli {
    /// Operations script, one `tag:arg:arg` instruction per line
    pub operations_file: PathBuf,

    /// County dataset (CSV, or JSON array of records)
    #[arg(long, env = "COUNTY_OPS_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,
}

/// Result of reading the command line.
#[derive(Debug)]
pub enum Invocation {
    Run(Cli),
    /// `--help` / `--version`: clap's text, then exit successfully.
    Info(clap::Error),
    /// Wrong argument count or unknown flag.
    Usage(clap::Error),
}

/// Parse `args` (including the program name).
pub fn parse<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Run(cli),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Invocation::Info(err),
            _ => Invocation::Usage(err),
        },
    }
}
