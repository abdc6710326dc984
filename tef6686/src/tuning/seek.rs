//! Station search.
//!
//! A seek is a loop of four phases:
//!
//! ```text
//!   Step ──► Settle ──► Evaluate ──► Done
//!    ▲                     │
//!    └──── rejected ───────┘
//! ```
//!
//! `Step` advances one [`StepSize`] and tunes. `Settle` runs the
//! [`StationCheck`] one step per call until it reaches a verdict.
//! `Evaluate` either accepts the frequency, gives up once the band has
//! wrapped back to the start, or steps again. `Done` re-commits the final
//! frequency.
//!
//! [`Seek::poll`] advances one phase per call so a host loop is never
//! blocked; [`Seek::run`] loops the same machine to completion.

use crate::command::{Module, QualityData};
use crate::constants::{
    CHECK_LEVEL_RETRY_MS, CHECK_QUALITY_MS, CHECK_START_MS, SEEK_SETTLE_MS, STATION_OFFSET_MAX,
    STATION_USN_MAX, STATION_WAM_MAX,
};

use super::stepper::{Band, Direction, FrequencyStepper, StepSize};

/// Hardware access needed while searching.
///
/// Implemented by the driver's bus handle; tests supply a scripted fake.
pub trait StationProbe {
    type Error;

    /// Commit `frequency` to the tuner.
    fn tune(&mut self, module: Module, frequency: u16) -> Result<(), Self::Error>;

    /// Current signal level (0.1 dBuV).
    fn level(&mut self, module: Module) -> Result<i16, Self::Error>;

    /// Noise, multipath and offset figures.
    fn quality(&mut self, module: Module) -> Result<QualityData, Self::Error>;

    fn delay_ms(&mut self, ms: u32);
}

/// Upper bounds a station must stay below to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QualityLimits {
    /// Ultrasonic noise (%).
    pub usn: u8,
    /// Wideband AM / multipath (%).
    pub wam: u8,
    /// Frequency offset magnitude (0.1 kHz).
    pub offset: u16,
}

impl QualityLimits {
    pub fn accepts(&self, q: &QualityData) -> bool {
        q.usn < self.usn && q.wam < self.wam && q.offset < self.offset
    }
}

impl Default for QualityLimits {
    fn default() -> Self {
        Self {
            usn: STATION_USN_MAX,
            wam: STATION_WAM_MAX,
            offset: STATION_OFFSET_MAX,
        }
    }
}

/// Progress of a [`StationCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CheckPhase {
    Start,
    /// Waiting for the tuner to lock after a retune.
    Wait,
    /// Level sample `n` of two.
    Level(u8),
    Quality,
    Rejected,
    Found,
}

impl CheckPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, CheckPhase::Rejected | CheckPhase::Found)
    }
}

/// Decides whether the current frequency carries a usable station.
///
/// The level must clear the threshold on two consecutive samples before
/// the slower noise, multipath and offset figures are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StationCheck {
    phase: CheckPhase,
    limits: QualityLimits,
}

impl StationCheck {
    /// Samples taken before moving on to the quality figures.
    const LEVEL_SAMPLES: u8 = 2;

    pub const fn new(limits: QualityLimits) -> Self {
        Self {
            phase: CheckPhase::Start,
            limits,
        }
    }

    pub fn phase(&self) -> CheckPhase {
        self.phase
    }

    pub fn restart(&mut self) {
        self.phase = CheckPhase::Start;
    }

    /// Advance one step. Finished checks stay put.
    pub fn poll<P: StationProbe>(
        &mut self,
        probe: &mut P,
        module: Module,
        threshold: i16,
    ) -> Result<CheckPhase, P::Error> {
        self.phase = match self.phase {
            CheckPhase::Start => CheckPhase::Wait,
            CheckPhase::Wait => {
                probe.delay_ms(CHECK_START_MS);
                CheckPhase::Level(0)
            }
            CheckPhase::Level(sample) => {
                if probe.level(module)? < threshold {
                    CheckPhase::Rejected
                } else if sample + 1 >= Self::LEVEL_SAMPLES {
                    probe.delay_ms(CHECK_QUALITY_MS);
                    CheckPhase::Quality
                } else {
                    probe.delay_ms(CHECK_LEVEL_RETRY_MS);
                    CheckPhase::Level(sample + 1)
                }
            }
            CheckPhase::Quality => {
                if self.limits.accepts(&probe.quality(module)?) {
                    CheckPhase::Found
                } else {
                    CheckPhase::Rejected
                }
            }
            done @ (CheckPhase::Rejected | CheckPhase::Found) => done,
        };
        Ok(self.phase)
    }
}

/// What a seek is looking for. A different request aborts the one in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SeekRequest {
    pub direction: Direction,
    pub band: Band,
    /// Minimum level (0.1 dBuV).
    pub threshold: i16,
}

/// Phase of the seek machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeekPhase {
    Idle,
    Step,
    Settle,
    Evaluate,
    Done,
}

/// Result of one [`Seek::poll`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeekPoll {
    Pending,
    /// A station passed the check.
    Found(u16),
    /// The whole band was swept; tuned back to the start frequency.
    Exhausted(u16),
}

impl SeekPoll {
    pub fn is_done(&self) -> bool {
        !matches!(self, SeekPoll::Pending)
    }

    pub fn frequency(&self) -> Option<u16> {
        match *self {
            SeekPoll::Pending => None,
            SeekPoll::Found(f) | SeekPoll::Exhausted(f) => Some(f),
        }
    }
}

/// The single in-flight seek slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Seek {
    phase: SeekPhase,
    request: Option<SeekRequest>,
    start: u16,
    /// Steps left before the sweep has covered the whole band.
    remaining: u16,
    step: StepSize,
    check: StationCheck,
}

impl Seek {
    pub const fn new(step: StepSize, limits: QualityLimits) -> Self {
        Self {
            phase: SeekPhase::Idle,
            request: None,
            start: 0,
            remaining: 0,
            step,
            check: StationCheck::new(limits),
        }
    }

    pub fn phase(&self) -> SeekPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SeekPhase::Idle
    }

    /// Drop any seek in flight. The tuner stays wherever it was.
    pub fn cancel(&mut self) {
        self.phase = SeekPhase::Idle;
        self.request = None;
    }

    /// Run one phase.
    ///
    /// An idle machine, or one busy with a different request, starts over
    /// from the stepper's current frequency, snapped into the band. The
    /// sweep ends after one lap of the band even when the step grid never
    /// lands on the start again.
    pub fn poll<P: StationProbe>(
        &mut self,
        probe: &mut P,
        stepper: &mut FrequencyStepper,
        request: SeekRequest,
    ) -> Result<SeekPoll, P::Error> {
        if self.phase == SeekPhase::Idle || self.request != Some(request) {
            let band = request.band;
            self.request = Some(request);
            self.start = band.snap(stepper.current());
            self.remaining = band.high.saturating_sub(band.low) / self.step.units() + 1;
            self.phase = SeekPhase::Step;
        }
        let module = request.band.module;

        match self.phase {
            SeekPhase::Idle | SeekPhase::Step => {
                let frequency = stepper.step(request.direction, self.step, &request.band);
                probe.tune(module, frequency)?;
                self.remaining = self.remaining.saturating_sub(1);
                self.check.restart();
                self.phase = SeekPhase::Settle;
            }
            SeekPhase::Settle => {
                probe.delay_ms(SEEK_SETTLE_MS);
                if self.check.poll(probe, module, request.threshold)?.is_finished() {
                    self.phase = SeekPhase::Evaluate;
                }
            }
            SeekPhase::Evaluate => {
                self.phase = match self.check.phase() {
                    CheckPhase::Rejected if stepper.current() != self.start && self.remaining > 0 => {
                        SeekPhase::Step
                    }
                    _ => SeekPhase::Done,
                };
            }
            SeekPhase::Done => {
                let found = self.check.phase() == CheckPhase::Found;
                let frequency = if found {
                    stepper.current()
                } else {
                    stepper.set(self.start, &request.band)
                };
                probe.tune(module, frequency)?;
                self.cancel();
                #[cfg(feature = "defmt")]
                defmt::debug!("seek: {} at {}", if found { "found" } else { "exhausted" }, frequency);
                return Ok(if found {
                    SeekPoll::Found(frequency)
                } else {
                    SeekPoll::Exhausted(frequency)
                });
            }
        }
        Ok(SeekPoll::Pending)
    }

    /// Search until a station is found or the band is exhausted.
    ///
    /// Any non-blocking seek in flight is discarded first.
    pub fn run<P: StationProbe>(
        &mut self,
        probe: &mut P,
        stepper: &mut FrequencyStepper,
        request: SeekRequest,
    ) -> Result<SeekPoll, P::Error> {
        self.cancel();
        loop {
            let poll = self.poll(probe, stepper, request)?;
            if poll.is_done() {
                return Ok(poll);
            }
        }
    }
}
