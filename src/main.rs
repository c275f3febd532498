#![deny(clippy::all)]
#![forbid(unsafe_code)]

use colored::Colorize;
use error_iter::ErrorIter as _;
use std::{path::Path, process::ExitCode};
use tfi2opm::{consts::OUTPUT_FILENAME, tfi::instrument_name, Batch, Error as TfiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to convert")]
    Convert(#[from] TfiError),
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<_> = std::env::args_os().skip(1).collect();
    if args.is_empty() {
        usage();
        return ExitCode::SUCCESS;
    }

    match convert(args) {
        Err(e) => {
            report("error:".red(), &e);
            ExitCode::FAILURE
        }
        Ok(code) => code,
    }
}

fn usage() {
    println!("TFI2OPM by raphaelgoulart.");
    println!(
        "Usage: Drag and drop one or multiple .tfi files into this executable file, \
         and the program will write an '{}' file.",
        OUTPUT_FILENAME
    );
    println!(
        "You can drag up to 128 .tfi files, since that's the maximum amount of patches \
         VOPM supports."
    );
}

fn convert(args: Vec<std::ffi::OsString>) -> Result<ExitCode, Error> {
    let batch = Batch::new(args)?;

    println!("Starting program...");

    let mut reader = batch.reader();
    for outcome in reader.by_ref() {
        let name = instrument_name(&outcome.path)
            .unwrap_or_else(|_| outcome.path.display().to_string());
        println!("Reading file: {}...", name);

        match outcome.result {
            Ok(_) => println!("Finished reading file."),
            Err(e) => report("Error reading file:".yellow(), &e),
        }
    }
    let bank = reader.into_bank();

    println!("Writing {} file...", OUTPUT_FILENAME);
    let code = match bank.save(Path::new(OUTPUT_FILENAME)) {
        Ok(()) => {
            println!("Finished writing file.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report("Error writing file:".red(), &e);
            ExitCode::FAILURE
        }
    };

    println!("Finished!");

    Ok(code)
}

fn report<E>(label: colored::ColoredString, error: &E)
where
    E: std::error::Error + 'static,
{
    eprintln!("{} {}", label, error);

    for cause in error.sources().skip(1) {
        eprintln!("{} {}", "caused by:".bright_red(), cause);
    }
}
