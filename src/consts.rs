pub const NUM_OPERATORS: usize = 4;
pub const MAX_INSTRUMENTS: usize = 128;

pub const HEADER_LENGTH: usize = 2;
pub const OPERATOR_LENGTH: usize = 10;
pub const TFI_LENGTH: usize = HEADER_LENGTH + OPERATOR_LENGTH * NUM_OPERATORS;

/// Characters dropped from a file name to get the instrument name (".tfi").
pub(crate) const EXTENSION_LENGTH: usize = 4;

pub const OUTPUT_FILENAME: &str = "output.opm";

pub(crate) const OPM_PREAMBLE: &str = "//TFI2OPM by raphaelgoulart";
pub(crate) const OPM_LFO: &str = "LFO: 0 0 0 0 0";

// Fixed CH fields: pan, then AMS/PMS/slot mask/noise after algorithm.
pub(crate) const OPM_CH_PAN: u8 = 64;
pub(crate) const OPM_CH_TAIL: [u8; 4] = [0, 0, 120, 0];
pub(crate) const OPM_CH_VALUES: usize = 7;

// DT2 is not part of the TFI layout and is always written as zero.
pub(crate) const OPM_OPERATOR_DT2: u8 = 0;
pub(crate) const OPM_OPERATOR_VALUES: usize = 11;
