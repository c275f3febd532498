use std::{io, path::PathBuf};
use thiserror::Error;

use crate::consts::{MAX_INSTRUMENTS, TFI_LENGTH};

/// Possible errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid .tfi file: expected {} bytes, found {}", TFI_LENGTH, .0)]
    InvalidFormat(usize),

    #[error("Invalid .tfi file name: {}", .0.display())]
    InvalidName(PathBuf),

    #[error("Unable to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No .tfi files given")]
    NoInputs,

    #[error(
        "You cannot convert more than {} patches into a single .opm file! Got {}.",
        MAX_INSTRUMENTS,
        .0
    )]
    TooManyInputs(usize),

    #[error("Bank is full ({} instruments)", MAX_INSTRUMENTS)]
    BankFull,

    #[error("Malformed .opm file on line {line}: {reason}")]
    Opm { line: usize, reason: &'static str },
}
