//! Convert TFI instrument patches (42-byte FM voices) into a single OPM bank
//! file for VOPM.
//!
//! ```no_run
//! use std::path::Path;
//! use tfi2opm::Batch;
//!
//! let batch = Batch::new(vec!["bass.tfi", "lead2.tfi", "lead10.tfi"])?;
//! let conversion = batch.convert(Path::new("output.opm"));
//! conversion.written?;
//! # Ok::<(), tfi2opm::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod batch;
pub mod consts;
mod errors;
pub mod natural;
pub mod opm;
pub mod tfi;

pub use batch::{Batch, Conversion, Outcome, Reader};
pub use errors::Error;
pub use opm::Bank;
pub use tfi::{Instrument, Operator, OperatorSlot};
