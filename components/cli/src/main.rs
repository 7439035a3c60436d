use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use mxsan::check::check_well_formed;
use mxsan::{sanitize_to, sanitize_with_summary, Utf8Writer};

use crate::cli::Cli;
use crate::error::CliError;

mod cli;
mod error;

fn read_input(cli: &Cli) -> Result<String, CliError> {
    match cli.input_path() {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| CliError::io(format!("reading {}", path.display()), err)),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|err| CliError::io("reading stdin", err))?;
            Ok(input)
        }
    }
}

fn open_output(cli: &Cli) -> Result<Box<dyn Write>, CliError> {
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| CliError::io(format!("creating {}", path.display()), err))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let input = read_input(cli)?;
    let snippet = cli.options().prepare(&input);
    let mut output = open_output(cli)?;

    let summary = if cli.check {
        let (sanitized, summary) = sanitize_with_summary(snippet);
        output
            .write_all(sanitized.as_bytes())
            .and_then(|_| output.flush())
            .map_err(|err| CliError::io("writing output", err))?;
        check_well_formed(&sanitized)?;
        summary
    } else {
        sanitize_to(snippet, Utf8Writer::new(&mut output))
            .map_err(|err| CliError::io("writing output", err))?
    };

    let escapes = &summary.escapes;
    info!(
        "escaped {} characters ({} <, {} >, {} &, {} \", {} ')",
        escapes.total(),
        escapes.lt,
        escapes.gt,
        escapes.amp,
        escapes.quot,
        escapes.apos
    );

    if !summary.is_complete() {
        if cli.strict {
            return Err(CliError::incomplete(summary.final_state));
        }
        warn!("input ends inside a {}", summary.final_state);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
