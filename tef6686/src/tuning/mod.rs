//! Frequency stepping and station search.

mod seek;
mod stepper;

pub use seek::{
    CheckPhase, QualityLimits, Seek, SeekPhase, SeekPoll, SeekRequest, StationCheck, StationProbe,
};
pub use stepper::{Band, Direction, FrequencyStepper, StepSize};
