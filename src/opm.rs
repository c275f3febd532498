//! OPM bank text, as read by VOPM.
//!
//! Each voice is written as:
//!
//! ```text
//! @:<slot> <name>
//! LFO: 0 0 0 0 0
//! CH: 64 <fb> <al> 0 0 120 0
//! M1: <ar> <dr> <sr> <rr> <sl> <tl> <rs> <mt> <dt> 0 <eg>
//! C1: ...
//! M2: ...
//! C2: ...
//! ```
//!
//! followed by a blank line.

use arrayvec::ArrayVec;
use log::info;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::consts::*;
use crate::errors::Error;
use crate::tfi::{Instrument, Operator, OperatorSlot};

/// An ordered collection of up to 128 instruments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bank {
    instruments: ArrayVec<Instrument, MAX_INSTRUMENTS>,
}

impl Bank {
    pub fn new() -> Bank {
        Bank::default()
    }

    pub fn push(&mut self, instrument: Instrument) -> Result<(), Error> {
        self.instruments
            .try_push(instrument)
            .map_err(|_| Error::BankFull)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Write the whole bank as OPM text.
    pub fn write_opm<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{}", OPM_PREAMBLE)?;
        writeln!(w)?;

        for ins in self {
            writeln!(w, "@:{} {}", ins.slot, ins.name)?;
            writeln!(w, "{}", OPM_LFO)?;

            let [ams, pms, mask, noise] = OPM_CH_TAIL;
            writeln!(
                w,
                "CH: {} {} {} {} {} {} {}",
                OPM_CH_PAN, ins.fb, ins.al, ams, pms, mask, noise
            )?;

            for &op in &OperatorSlot::OUTPUT_ORDER {
                let o = ins.operator(op);
                writeln!(
                    w,
                    "{}: {} {} {} {} {} {} {} {} {} {} {}",
                    op,
                    o.ar,
                    o.dr,
                    o.sr,
                    o.rr,
                    o.sl,
                    o.tl,
                    o.rs,
                    o.mt,
                    o.dt,
                    OPM_OPERATOR_DT2,
                    o.eg
                )?;
            }

            writeln!(w)?;
        }

        Ok(())
    }

    /// Create (or truncate) `path` and write the bank into it.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let to_error = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(to_error)?;
        let mut writer = BufWriter::new(file);
        self.write_opm(&mut writer).map_err(to_error)?;
        writer.flush().map_err(to_error)?;

        info!("Wrote {} instruments to {}", self.len(), path.display());

        Ok(())
    }

    /// Parse OPM text in the layout produced by `write_opm`.
    ///
    /// Blank lines and `//` comments are skipped. Values that are constant in
    /// our output (LFO, pan, DT2 and so on) are accepted but not kept.
    pub fn from_opm(text: &str) -> Result<Bank, Error> {
        let eof = text.lines().count() + 1;
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with("//")
            })
            .collect::<Vec<_>>()
            .into_iter();

        let mut bank = Bank::new();

        while let Some((number, header)) = lines.next() {
            let (slot, name) = parse_header(number, header)?;

            let (number, lfo) = next_line(&mut lines, eof)?;
            expect_values::<5>(number, lfo, "LFO")?;

            let (number, ch) = next_line(&mut lines, eof)?;
            let ch = expect_values::<OPM_CH_VALUES>(number, ch, "CH")?;
            let (fb, al) = (ch[1], ch[2]);

            let mut operators = [Operator::default(); NUM_OPERATORS];
            for &op in &OperatorSlot::OUTPUT_ORDER {
                let (number, line) = next_line(&mut lines, eof)?;
                let [ar, dr, sr, rr, sl, tl, rs, mt, dt, _dt2, eg] =
                    expect_values::<OPM_OPERATOR_VALUES>(number, line, op.label())?;
                operators[op.index()] = Operator {
                    mt,
                    dt,
                    tl,
                    rs,
                    ar,
                    dr,
                    sr,
                    rr,
                    sl,
                    eg,
                };
            }

            let instrument = Instrument::new(slot, name.to_string(), al, fb, operators);
            bank.push(instrument).map_err(|_| Error::Opm {
                line: number,
                reason: "more than 128 voices",
            })?;
        }

        Ok(bank)
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = Vec::new();
        self.write_opm(&mut buf).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

impl<'a> IntoIterator for &'a Bank {
    type Item = &'a Instrument;
    type IntoIter = std::slice::Iter<'a, Instrument>;

    fn into_iter(self) -> Self::IntoIter {
        self.instruments.iter()
    }
}

fn next_line<'a>(
    lines: &mut std::vec::IntoIter<(usize, &'a str)>,
    eof: usize,
) -> Result<(usize, &'a str), Error> {
    lines.next().ok_or(Error::Opm {
        line: eof,
        reason: "unexpected end of file",
    })
}

/// `@:<slot> <name>`. The name is everything after the first space.
fn parse_header(line: usize, header: &str) -> Result<(usize, &str), Error> {
    let rest = header.strip_prefix("@:").ok_or(Error::Opm {
        line,
        reason: "expected a voice header",
    })?;
    let (slot, name) = match rest.find(' ') {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, ""),
    };
    let slot = slot.trim().parse().map_err(|_| Error::Opm {
        line,
        reason: "invalid voice number",
    })?;

    Ok((slot, name))
}

/// `<label>: v0 v1 ...` with exactly `N` byte values.
fn expect_values<const N: usize>(
    line: usize,
    text: &str,
    label: &str,
) -> Result<[u8; N], Error> {
    let rest = text
        .trim_start()
        .strip_prefix(label)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or(Error::Opm {
            line,
            reason: "unexpected line label",
        })?;

    let mut values = [0; N];
    let mut fields = rest.split_whitespace();
    for value in values.iter_mut() {
        let field = fields.next().ok_or(Error::Opm {
            line,
            reason: "too few values",
        })?;
        *value = field.parse().map_err(|_| Error::Opm {
            line,
            reason: "value is not a byte",
        })?;
    }
    if fields.next().is_some() {
        return Err(Error::Opm {
            line,
            reason: "too many values",
        });
    }

    Ok(values)
}
