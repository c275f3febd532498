use log::debug;
use std::fmt;
use std::path::Path;

use crate::consts::*;
use crate::errors::Error;

/// One of the four FM operators of an `Instrument`, kept as raw bytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Operator {
    pub mt: u8, // Multiplier
    pub dt: u8, // Detune
    pub tl: u8, // Total level
    pub rs: u8, // Rate scaling
    pub ar: u8, // Attack rate
    pub dr: u8, // Decay rate
    pub sr: u8, // Sustain rate
    pub rr: u8, // Release rate
    pub sl: u8, // Sustain level
    pub eg: u8, // SSG-EG
}

/// Operator positions. Declared in TFI storage order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperatorSlot {
    M1,
    M2,
    C1,
    C2,
}

impl OperatorSlot {
    /// Storage order in a TFI file.
    pub const ALL: [OperatorSlot; NUM_OPERATORS] = [Self::M1, Self::M2, Self::C1, Self::C2];

    /// Line order in an OPM voice.
    pub const OUTPUT_ORDER: [OperatorSlot; NUM_OPERATORS] =
        [Self::M1, Self::C1, Self::M2, Self::C2];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M2 => "M2",
            Self::C1 => "C1",
            Self::C2 => "C2",
        }
    }
}

impl fmt::Display for OperatorSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single FM voice: algorithm, feedback and four operators, plus the bank
/// slot and display name it was loaded with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instrument {
    pub(crate) slot: usize,
    pub(crate) name: String,
    pub(crate) al: u8,                               // Algorithm
    pub(crate) fb: u8,                               // Feedback
    pub(crate) operators: [Operator; NUM_OPERATORS], // M1, M2, C1, C2
}

impl Operator {
    /// Decode one operator block. `slice` must hold `OPERATOR_LENGTH` bytes.
    pub(crate) fn from_slice(slice: &[u8]) -> Operator {
        Operator {
            mt: slice[0],
            dt: slice[1],
            tl: slice[2],
            rs: slice[3],
            ar: slice[4],
            dr: slice[5],
            sr: slice[6],
            rr: slice[7],
            sl: slice[8],
            eg: slice[9],
        }
    }

    pub(crate) fn to_bytes(self) -> [u8; OPERATOR_LENGTH] {
        [
            self.mt, self.dt, self.tl, self.rs, self.ar, self.dr, self.sr, self.rr, self.sl,
            self.eg,
        ]
    }
}

impl Instrument {
    pub(crate) fn new(
        slot: usize,
        name: String,
        al: u8,
        fb: u8,
        operators: [Operator; NUM_OPERATORS],
    ) -> Instrument {
        Instrument {
            slot,
            name,
            al,
            fb,
            operators,
        }
    }

    /// Create a new `Instrument` from the contents of a TFI file.
    ///
    /// ```
    /// use tfi2opm::Instrument;
    ///
    /// let mut data = [0; 42];
    /// data[0] = 5;
    /// let instrument = Instrument::from_slice(0, "kick", &data).unwrap();
    /// assert_eq!(instrument.algorithm(), 5);
    /// ```
    pub fn from_slice<S: Into<String>>(
        slot: usize,
        name: S,
        slice: &[u8],
    ) -> Result<Instrument, Error> {
        if slice.len() != TFI_LENGTH {
            return Err(Error::InvalidFormat(slice.len()));
        }

        let load_operator = |op: OperatorSlot| -> Operator {
            let i = HEADER_LENGTH + op.index() * OPERATOR_LENGTH;
            Operator::from_slice(&slice[i..i + OPERATOR_LENGTH])
        };

        let operators = OperatorSlot::ALL.map(load_operator);

        Ok(Instrument::new(slot, name.into(), slice[0], slice[1], operators))
    }

    /// Encode back into the 42-byte TFI layout.
    pub fn to_bytes(&self) -> [u8; TFI_LENGTH] {
        let mut data = [0; TFI_LENGTH];
        data[0] = self.al;
        data[1] = self.fb;

        for (op, chunk) in self
            .operators
            .iter()
            .zip(data[HEADER_LENGTH..].chunks_exact_mut(OPERATOR_LENGTH))
        {
            chunk.copy_from_slice(&op.to_bytes());
        }

        data
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn algorithm(&self) -> u8 {
        self.al
    }

    pub fn feedback(&self) -> u8 {
        self.fb
    }

    pub fn operator(&self, op: OperatorSlot) -> &Operator {
        &self.operators[op.index()]
    }
}

/// Instrument name for a TFI path: the file name without its last four
/// characters.
///
/// ```
/// use std::path::Path;
///
/// let name = tfi2opm::tfi::instrument_name(Path::new("patches/Bass 10.tfi")).unwrap();
/// assert_eq!(name, "Bass 10");
/// ```
pub fn instrument_name(path: &Path) -> Result<String, Error> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidName(path.to_path_buf()))?
        .to_string_lossy();

    let len = file_name.chars().count();
    if len < EXTENSION_LENGTH {
        return Err(Error::InvalidName(path.to_path_buf()));
    }

    Ok(file_name.chars().take(len - EXTENSION_LENGTH).collect())
}

/// Read and decode a TFI file into the given bank slot.
///
/// Errors are checked in order: unreadable file, wrong length, then a file
/// name too short to carry an extension.
pub fn read_instrument(path: &Path, slot: usize) -> Result<Instrument, Error> {
    let data = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if data.len() != TFI_LENGTH {
        return Err(Error::InvalidFormat(data.len()));
    }
    let name = instrument_name(path)?;

    let instrument = Instrument::from_slice(slot, name, &data)?;
    debug!("Decoded {} into slot {}", path.display(), slot);

    Ok(instrument)
}
