use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::consts::MAX_INSTRUMENTS;
use crate::errors::Error;
use crate::natural;
use crate::opm::Bank;
use crate::tfi::read_instrument;

/// A validated set of TFI inputs, kept in natural order.
#[derive(Debug)]
pub struct Batch {
    inputs: Vec<PathBuf>,
}

/// What happened to one input file. `result` holds the bank slot on success.
#[derive(Debug)]
pub struct Outcome {
    pub path: PathBuf,
    pub result: Result<usize, Error>,
}

/// Everything a full conversion produced.
#[derive(Debug)]
pub struct Conversion {
    pub outcomes: Vec<Outcome>,
    pub bank: Bank,
    pub written: Result<(), Error>,
}

/// Decodes the inputs of a `Batch` one at a time. `Reader` implements
/// `Iterator`; each call to `next` reads one file and reports the outcome.
/// Successfully decoded instruments are collected into a `Bank`.
#[derive(Debug)]
pub struct Reader<'a> {
    inputs: std::slice::Iter<'a, PathBuf>,
    bank: Bank,
}

impl Batch {
    /// Validate and sort the inputs. Nothing is read yet.
    pub fn new<I, P>(inputs: I) -> Result<Batch, Error>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut inputs: Vec<PathBuf> = inputs.into_iter().map(Into::into).collect();

        if inputs.is_empty() {
            return Err(Error::NoInputs);
        }
        if inputs.len() > MAX_INSTRUMENTS {
            return Err(Error::TooManyInputs(inputs.len()));
        }

        natural::sort(&mut inputs);

        Ok(Batch { inputs })
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    pub fn reader(&self) -> Reader<'_> {
        info!("Reading {} .tfi files", self.inputs.len());

        Reader {
            inputs: self.inputs.iter(),
            bank: Bank::new(),
        }
    }

    /// Read every input, then write the bank to `output` once.
    pub fn convert(&self, output: &Path) -> Conversion {
        let mut reader = self.reader();
        let outcomes = reader.by_ref().collect();
        let bank = reader.into_bank();
        let written = bank.save(output);

        Conversion {
            outcomes,
            bank,
            written,
        }
    }
}

impl<'a> Reader<'a> {
    pub fn into_bank(self) -> Bank {
        self.bank
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = Outcome;

    fn next(&mut self) -> Option<Outcome> {
        let path = self.inputs.next()?;
        let slot = self.bank.len();

        let result = read_instrument(path, slot).and_then(|instrument| {
            self.bank.push(instrument)?;
            Ok(slot)
        });

        if let Err(e) = &result {
            warn!("Skipping {}: {}", path.display(), e);
        }

        Some(Outcome {
            path: path.clone(),
            result,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inputs.size_hint()
    }
}

impl Conversion {
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }
}
