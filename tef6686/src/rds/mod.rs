//! RDS decoding.
//!
//! The tuner hands over one group at a time as four 16-bit blocks plus a
//! 2-bit error-correction code per block. [`RdsDecoder`] folds these into
//! the fields a receiver usually displays:
//!
//! | Field | Source | Accepted when |
//! |-------|--------|---------------|
//! | PI (program identification) | block A | block A clean |
//! | PTY (program type) | block B bits 9..5 | block B clean or corrected |
//! | PS (program service name) | type 0 groups, block D | see [`ps`] |
//! | RT (radio text) | type 2 groups, blocks C and D | block B clean |
//!
//! Everything is fixed-size and allocation free. Text fields only ever hold
//! printable ASCII.

mod decoder;
pub mod ps;
mod pty;
mod rt;
mod text;

pub use decoder::{DecodeOutcome, Group, GroupVersion, RdsDecoder, RdsSnapshot};
pub use ps::{PsAssembler, SlotConfidence, SlotHistory};
pub use pty::{ProgramType, PtyRegion, PTY_ERROR};
pub use rt::{RtAssembler, RtUpdate};
pub use text::sanitize;
