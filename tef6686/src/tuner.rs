//! TEF6686 tuner driver.
//!
//! The driver is generic over any [`embedded_hal::i2c::I2c`] and
//! [`embedded_hal::delay::DelayNs`] implementation. It expects a chip that
//! has already been patched and initialised; bring-up tables are board
//! specific and stay with the application.
//!
//! # Example
//!
//! ```ignore
//! let mut radio = Tef6686::new(i2c, delay);
//! radio.power_on()?;
//! radio.set_frequency(&Band::FM_EUROPE, 9580)?;
//! radio.seek_blocking(Direction::Up, &Band::FM_EUROPE, 200)?;
//!
//! // Every 40 ms or so:
//! radio.read_rds()?;
//! let rds = radio.rds();
//! display(rds.program_service(), rds.radio_text());
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::command::{
    Blend, BootState, Command, Identification, Module, OperationMode, QualityData, QualityStatus,
    Query, RdsRaw, SignalStatus,
};
use crate::constants::{
    AM_POWER_ON_FREQUENCY, AUTO_BANDWIDTH, BANDWIDTH_SENSITIVITY, BUS_SETTLE_MS,
    FM_POWER_ON_FREQUENCY, I2C_ADDRESS, VOLUME_MAX_DB, VOLUME_MIN_DB,
};
use crate::control::RadioControl;
use crate::rds::{DecodeOutcome, PtyRegion, RdsDecoder, RdsSnapshot};
use crate::tuning::{
    Band, Direction, FrequencyStepper, QualityLimits, Seek, SeekPoll, SeekRequest, StationProbe,
    StepSize,
};

// ── Public enums ───────────────────────────────────────────────────────────

/// IF bandwidth selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
    /// Chip picks the bandwidth from adjacent-channel conditions.
    Auto,
    /// Fixed bandwidth in kHz.
    Fixed(u16),
}

/// RF AGC wideband threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AgcThreshold {
    /// 92 dBuV.
    Dbuv92,
    /// 90 dBuV.
    Dbuv90,
    /// 87 dBuV.
    Dbuv87,
    /// 84 dBuV.
    Dbuv84,
}

impl AgcThreshold {
    /// Threshold in 0.1 dBuV.
    pub const fn raw(self) -> u16 {
        match self {
            AgcThreshold::Dbuv92 => 920,
            AgcThreshold::Dbuv90 => 900,
            AgcThreshold::Dbuv87 => 870,
            AgcThreshold::Dbuv84 => 840,
        }
    }
}

/// FM de-emphasis time constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deemphasis {
    /// 50 us (Europe).
    Us50,
    /// 75 us (Americas).
    Us75,
    Off,
}

impl Deemphasis {
    /// Time constant in 0.1 us.
    pub const fn raw(self) -> u16 {
        match self {
            Deemphasis::Us50 => 500,
            Deemphasis::Us75 => 750,
            Deemphasis::Off => 0,
        }
    }
}

// ── Configuration ──────────────────────────────────────────────────────────

/// Driver settings fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C address.
    pub address: u8,
    /// Naming table for program types.
    pub pty_region: PtyRegion,
    /// Increment used while seeking.
    pub seek_step: StepSize,
    /// Quality ceilings a station must stay below while seeking.
    pub station_limits: QualityLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: I2C_ADDRESS,
            pty_region: PtyRegion::Rds,
            seek_step: StepSize::Seek,
            station_limits: QualityLimits::default(),
        }
    }
}

// ── Bus ────────────────────────────────────────────────────────────────────

/// I2C transport: frame writes with settle delay, and fixed-length queries.
struct Bus<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C, D> Bus<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn write(&mut self, bytes: &[u8]) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, bytes)?;
        self.delay.delay_ms(BUS_SETTLE_MS);
        Ok(())
    }

    fn send(&mut self, command: Command) -> Result<(), I2C::Error> {
        self.write(command.encode().as_bytes())
    }

    fn query<const N: usize>(&mut self, query: Query) -> Result<[u8; N], I2C::Error> {
        debug_assert_eq!(N, query.response_len());
        self.write(query.encode().as_bytes())?;
        let mut buf = [0u8; N];
        self.i2c.read(self.address, &mut buf)?;
        Ok(buf)
    }
}

impl<I2C, D> StationProbe for Bus<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn tune(&mut self, module: Module, frequency: u16) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("tune: {} {}", module, frequency);
        self.send(Command::TuneTo { module, frequency })
    }

    fn level(&mut self, module: Module) -> Result<i16, Self::Error> {
        let buf = self.query(Query::QualityStatus(module))?;
        Ok(QualityStatus::from_bytes(&buf).level)
    }

    fn quality(&mut self, module: Module) -> Result<QualityData, Self::Error> {
        let buf = self.query(Query::QualityData(module))?;
        Ok(QualityData::from_bytes(&buf))
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

// ── Driver struct ──────────────────────────────────────────────────────────

/// TEF6686 FM/AM tuner driver.
///
/// Owns the bus, the tuned frequency of each band, the in-flight seek and
/// the RDS decoder.
pub struct Tef6686<I2C, D> {
    bus: Bus<I2C, D>,
    config: Config,
    fm: FrequencyStepper,
    am: FrequencyStepper,
    seek: Seek,
    rds: RdsDecoder,
}

impl<I2C, D> Tef6686<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver with [`Config::default`].
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::new_with_config(i2c, delay, Config::default())
    }

    pub fn new_with_config(i2c: I2C, delay: D, config: Config) -> Self {
        Self {
            bus: Bus {
                i2c,
                delay,
                address: config.address,
            },
            config,
            fm: FrequencyStepper::new(FM_POWER_ON_FREQUENCY),
            am: FrequencyStepper::new(AM_POWER_ON_FREQUENCY),
            seek: Seek::new(config.seek_step, config.station_limits),
            rds: RdsDecoder::new(config.pty_region),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Write a raw command frame.
    pub fn send(&mut self, command: Command) -> Result<(), I2C::Error> {
        self.bus.send(command)
    }

    // ── Power ──────────────────────────────────────────────────────────

    pub fn set_operation_mode(&mut self, mode: OperationMode) -> Result<(), I2C::Error> {
        self.bus.send(Command::SetOperationMode(mode))
    }

    /// Leave standby and re-commit the current FM frequency.
    pub fn power_on(&mut self) -> Result<(), I2C::Error> {
        self.set_operation_mode(OperationMode::Normal)?;
        self.bus.tune(Module::Fm, self.fm.current())
    }

    pub fn standby(&mut self) -> Result<(), I2C::Error> {
        self.set_operation_mode(OperationMode::Standby)
    }

    pub fn boot_status(&mut self) -> Result<BootState, I2C::Error> {
        let buf = self.bus.query(Query::OperationStatus)?;
        Ok(BootState::from_bytes(&buf))
    }

    pub fn identification(&mut self) -> Result<Identification, I2C::Error> {
        let buf = self.bus.query(Query::Identification)?;
        Ok(Identification::from_bytes(&buf))
    }

    // ── Tuning ─────────────────────────────────────────────────────────

    /// Tune to `frequency`; values outside `band` snap to its low edge.
    ///
    /// Returns the frequency actually committed.
    pub fn set_frequency(&mut self, band: &Band, frequency: u16) -> Result<u16, I2C::Error> {
        let stepper = match band.module {
            Module::Am => &mut self.am,
            _ => &mut self.fm,
        };
        let frequency = stepper.set(frequency, band);
        self.bus.tune(band.module, frequency)?;
        Ok(frequency)
    }

    /// Last frequency committed on `module` (FM unless `Module::Am`).
    pub fn frequency(&self, module: Module) -> u16 {
        match module {
            Module::Am => self.am.current(),
            _ => self.fm.current(),
        }
    }

    /// Move one step and commit, wrapping at the band edges.
    pub fn tune(&mut self, direction: Direction, step: StepSize, band: &Band) -> Result<u16, I2C::Error> {
        let stepper = match band.module {
            Module::Am => &mut self.am,
            _ => &mut self.fm,
        };
        let frequency = stepper.step(direction, step, band);
        self.bus.tune(band.module, frequency)?;
        Ok(frequency)
    }

    /// Search for the next station, blocking until one is found or the
    /// band has been swept back to the starting frequency.
    ///
    /// `threshold` is the minimum level in 0.1 dBuV. Returns the frequency
    /// the tuner ends on.
    pub fn seek_blocking(&mut self, direction: Direction, band: &Band, threshold: i16) -> Result<u16, I2C::Error> {
        let request = SeekRequest {
            direction,
            band: *band,
            threshold,
        };
        let stepper = match band.module {
            Module::Am => &mut self.am,
            _ => &mut self.fm,
        };
        let poll = self.seek.run(&mut self.bus, stepper, request)?;
        Ok(poll.frequency().unwrap_or(stepper.current()))
    }

    /// Advance a non-blocking seek by one phase.
    ///
    /// Call repeatedly until the result is done. Calling with different
    /// parameters abandons the seek in flight and starts a new one.
    pub fn seek_step(&mut self, direction: Direction, band: &Band, threshold: i16) -> Result<SeekPoll, I2C::Error> {
        let request = SeekRequest {
            direction,
            band: *band,
            threshold,
        };
        let stepper = match band.module {
            Module::Am => &mut self.am,
            _ => &mut self.fm,
        };
        self.seek.poll(&mut self.bus, stepper, request)
    }

    /// Abandon a non-blocking seek; the tuner stays where it is.
    pub fn cancel_seek(&mut self) {
        self.seek.cancel();
    }

    pub fn is_seeking(&self) -> bool {
        !self.seek.is_idle()
    }

    // ── Signal ─────────────────────────────────────────────────────────

    pub fn quality_status(&mut self, module: Module) -> Result<QualityStatus, I2C::Error> {
        let buf = self.bus.query(Query::QualityStatus(module))?;
        Ok(QualityStatus::from_bytes(&buf))
    }

    /// Whether the stereo pilot is detected.
    pub fn is_stereo(&mut self) -> Result<bool, I2C::Error> {
        let buf = self.bus.query(Query::SignalStatus)?;
        Ok(SignalStatus::from_bytes(&buf).stereo)
    }

    // ── Audio ──────────────────────────────────────────────────────────

    /// Set the audio volume in dB, clamped to -60..=24.
    pub fn set_volume(&mut self, db: i16) -> Result<(), I2C::Error> {
        let volume = db.clamp(VOLUME_MIN_DB, VOLUME_MAX_DB) * 10;
        self.bus.send(Command::SetVolume { volume })
    }

    pub fn set_mute(&mut self, muted: bool) -> Result<(), I2C::Error> {
        self.bus.send(Command::SetMute { muted })
    }

    // ── Radio setters ──────────────────────────────────────────────────

    pub fn set_bandwidth(&mut self, module: Module, bandwidth: Bandwidth) -> Result<(), I2C::Error> {
        let (automatic, bandwidth) = match bandwidth {
            Bandwidth::Auto => (true, AUTO_BANDWIDTH),
            Bandwidth::Fixed(khz) => (false, khz.saturating_mul(10)),
        };
        self.bus.send(Command::SetBandwidth {
            module,
            automatic,
            bandwidth,
            control_sensitivity: BANDWIDTH_SENSITIVITY,
            low_level_sensitivity: BANDWIDTH_SENSITIVITY,
        })
    }

    /// Offset applied to the level detector, in dB.
    pub fn set_level_offset(&mut self, db: i16) -> Result<(), I2C::Error> {
        self.bus.send(Command::SetLevelOffset {
            offset: db.saturating_mul(10),
        })
    }

    pub fn set_agc(&mut self, threshold: AgcThreshold) -> Result<(), I2C::Error> {
        self.bus.send(Command::SetRfAgc {
            start: threshold.raw(),
        })
    }

    pub fn set_deemphasis(&mut self, deemphasis: Deemphasis) -> Result<(), I2C::Error> {
        self.bus.send(Command::SetDeemphasis {
            time_constant: deemphasis.raw(),
        })
    }

    /// Multipath suppression (iMS).
    pub fn set_mph_suppression(&mut self, enabled: bool) -> Result<(), I2C::Error> {
        self.bus.send(Command::SetMphSuppression {
            mode: enabled as u16,
        })
    }

    pub fn set_channel_equalizer(&mut self, enabled: bool) -> Result<(), I2C::Error> {
        self.bus.send(Command::SetChannelEqualizer {
            mode: enabled as u16,
        })
    }

    /// Stereo blend start level in dBuV; 0 disables level, noise and
    /// multipath blending.
    pub fn set_stereo_level(&mut self, start: u16) -> Result<(), I2C::Error> {
        let mode = if start == 0 { 0 } else { 3 };
        self.bus.send(Command::SetStereoLevel(Blend {
            mode,
            start: start.saturating_mul(10),
            slope: 60,
        }))?;
        self.bus.send(Command::SetStereoNoise(Blend {
            mode,
            start: 240,
            slope: 200,
        }))?;
        self.bus.send(Command::SetStereoMph(Blend {
            mode,
            start: 240,
            slope: 200,
        }))
    }

    /// High-cut start level in dBuV; 0 disables level, noise and multipath
    /// high-cut.
    pub fn set_highcut_offset(&mut self, start: u16) -> Result<(), I2C::Error> {
        let mode = if start == 0 { 0 } else { 3 };
        self.bus.send(Command::SetHighcutLevel(Blend {
            mode,
            start: start.saturating_mul(10),
            slope: 300,
        }))?;
        self.bus.send(Command::SetHighcutNoise(Blend {
            mode,
            start: 360,
            slope: 300,
        }))?;
        self.bus.send(Command::SetHighcutMph(Blend {
            mode,
            start: 360,
            slope: 300,
        }))
    }

    /// Upper limit of the high-cut filter in kHz.
    pub fn set_highcut_level(&mut self, limit_khz: u16) -> Result<(), I2C::Error> {
        self.bus.send(Command::SetHighcutMax {
            mode: 1,
            limit: limit_khz.saturating_mul(100),
        })
    }

    /// Force mono reception.
    pub fn set_mono(&mut self, mono: bool) -> Result<(), I2C::Error> {
        self.bus.send(Command::SetStereoMin { mode: mono as u16 })
    }

    // ── RDS ────────────────────────────────────────────────────────────

    /// Fetch one group from the chip and feed it to the decoder.
    ///
    /// Call on every poll tick; a result without `data_available` is the
    /// normal idle case.
    pub fn read_rds(&mut self) -> Result<DecodeOutcome, I2C::Error> {
        let buf = self.bus.query(Query::RdsData)?;
        Ok(self.rds.decode(&RdsRaw::from_bytes(&buf)))
    }

    /// Copy of the decoded RDS fields.
    pub fn rds(&self) -> RdsSnapshot {
        self.rds.snapshot()
    }

    /// Blank PI, PS and Radio Text. The program type is kept.
    pub fn clear_rds(&mut self) {
        self.rds.clear();
    }

    /// Return the RDS decoder to its power-on state.
    pub fn reset_rds(&mut self) {
        self.rds.reset();
    }

    // ── Release ────────────────────────────────────────────────────────

    /// Consume the driver and return the I2C bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.bus.i2c, self.bus.delay)
    }
}

// ── RadioControl trait implementation ──────────────────────────────────────

impl<I2C, D> RadioControl for Tef6686<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn power_on(&mut self) -> Result<(), Self::Error> {
        Tef6686::power_on(self)
    }

    fn standby(&mut self) -> Result<(), Self::Error> {
        Tef6686::standby(self)
    }

    /// Linear level to dB; zero and below mute the output.
    fn volume(&mut self, level: f32) -> Result<(), Self::Error> {
        if level <= 0.0 {
            return self.set_mute(true);
        }
        let db = libm::roundf(20.0 * libm::log10f(level.min(1.0)));
        self.set_volume(db as i16)?;
        self.set_mute(false)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
