use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use county_ops::app::{self, Status};
use county_ops::cli::{self, Invocation, USAGE};
use log::{debug, error};

fn main() -> ExitCode {
    env_logger::init();

    let cli = match cli::parse(std::env::args_os()) {
        Invocation::Run(cli) => cli,
        Invocation::Info(info) => {
            // Help text goes to stdout; nothing useful to do if that fails.
            let _ = info.print();
            return ExitCode::SUCCESS;
        }
        Invocation::Usage(err) => {
            debug!("{err}");
            println!("{USAGE}");
            return Status::Failure.into();
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = app::run(&cli, &mut out).and_then(|status| {
        out.flush()?;
        Ok(status)
    });

    match result {
        Ok(status) => status.into(),
        Err(err) => {
            let _ = out.flush();
            error!("{err:#}");
            println!("Error: {err:#}");
            Status::Failure.into()
        }
    }
}
