//! Command codec for the TEF6686.
//!
//! Turns typed requests into bus frames and raw responses into typed
//! values. Bus I/O itself lives in [`Tef6686`](crate::Tef6686).

pub(crate) mod registers;
mod request;
mod response;

pub use request::{Blend, Command, Frame, Module, OperationMode, Query, MAX_FRAME_LEN};
pub use response::{
    BlockError, BootState, Identification, QualityData, QualityStatus, RdsRaw, SignalStatus,
};
