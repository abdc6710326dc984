//! Test doubles: a TEF6686 bus model and a counting delay.
//!
//! [`MockChip`] logs every frame written, tracks the tuned FM and AM
//! frequencies from `Tune_To` commands, and answers queries from a station
//! table and a queue of RDS groups.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorType, I2c, Operation};

use crate::command::registers as reg;
use crate::command::{RdsRaw, MAX_FRAME_LEN};

// ── Stations ──────────────────────────────────────────────────────────────

/// A simulated transmitter.
#[derive(Debug, Clone, Copy)]
pub struct Station {
    pub module: u8,
    pub frequency: u16,
    /// 0.1 dBuV.
    pub level: i16,
    /// 0.1 %.
    pub usn: u16,
    /// 0.1 %.
    pub wam: u16,
    /// 0.1 kHz.
    pub offset: i16,
}

impl Station {
    /// A clean FM station.
    pub const fn fm(frequency: u16, level: i16) -> Self {
        Self {
            module: reg::MODULE_FM,
            frequency,
            level,
            usn: 50,
            wam: 30,
            offset: -5,
        }
    }

    /// A strong FM signal with heavy multipath.
    pub const fn fm_noisy(frequency: u16, level: i16) -> Self {
        Self {
            wam: 400,
            ..Self::fm(frequency, level)
        }
    }
}

/// Quality figures reported where no station transmits.
const NOISE_FLOOR: Station = Station {
    module: 0,
    frequency: 0,
    level: 30,
    usn: 600,
    wam: 500,
    offset: 0,
};

// ── Mock I2C chip ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct MockError;

impl i2c::Error for MockError {
    fn kind(&self) -> i2c::ErrorKind {
        i2c::ErrorKind::Other
    }
}

const LOG_LEN: usize = 64;
const RDS_QUEUE_LEN: usize = 64;

pub struct MockChip {
    /// Ring of the last `LOG_LEN` frames.
    log: [([u8; MAX_FRAME_LEN], usize); LOG_LEN],
    /// Frames written since creation.
    pub frame_count: usize,
    pub last_address: u8,
    /// Module and command of the last header-only write.
    pending: Option<(u8, u8)>,
    pub fm: u16,
    pub am: u16,
    stations: &'static [Station],
    rds: [RdsRaw; RDS_QUEUE_LEN],
    rds_len: usize,
    rds_next: usize,
    pub boot_state: u16,
    pub stereo: bool,
    /// Fail every transfer.
    pub fail: bool,
}

impl MockChip {
    pub const DEVICE_ID: u16 = 0x0901;

    pub fn new() -> Self {
        Self::with_stations(&[])
    }

    pub fn with_stations(stations: &'static [Station]) -> Self {
        Self {
            log: [([0; MAX_FRAME_LEN], 0); LOG_LEN],
            frame_count: 0,
            last_address: 0,
            pending: None,
            fm: 0,
            am: 0,
            stations,
            rds: [RdsRaw::default(); RDS_QUEUE_LEN],
            rds_len: 0,
            rds_next: 0,
            boot_state: 2,
            stereo: false,
            fail: false,
        }
    }

    /// Queue a group for the next `Get_RDS_Data`.
    pub fn push_rds(&mut self, raw: RdsRaw) {
        self.rds[self.rds_len] = raw;
        self.rds_len += 1;
    }

    /// Frame written `back` writes ago (0 = most recent).
    pub fn recent(&self, back: usize) -> &[u8] {
        assert!(back < LOG_LEN.min(self.frame_count), "frame {back} not logged");
        let (bytes, len) = &self.log[(self.frame_count - 1 - back) % LOG_LEN];
        &bytes[..*len]
    }

    /// Count logged frames addressed to `module`/`command`.
    pub fn count(&self, module: u8, command: u8) -> usize {
        let logged = LOG_LEN.min(self.frame_count);
        (0..logged)
            .filter(|&back| {
                let f = self.recent(back);
                f[0] == module && f[1] == command
            })
            .count()
    }

    fn station(&self, module: u8) -> &Station {
        let tuned = if module == reg::MODULE_AM { self.am } else { self.fm };
        self.stations
            .iter()
            .find(|s| s.module == module && s.frequency == tuned)
            .unwrap_or(&NOISE_FLOOR)
    }

    fn respond(&mut self, module: u8, command: u8, buf: &mut [u8]) {
        let mut words = [0u16; 7];
        match (module, command) {
            (reg::MODULE_APPL, reg::CMD_GET_OPERATION_STATUS) => words[0] = self.boot_state,
            (reg::MODULE_APPL, reg::CMD_GET_IDENTIFICATION) => {
                words[..3].copy_from_slice(&[Self::DEVICE_ID, 0x0205, 0x010A])
            }
            (_, reg::CMD_GET_QUALITY_STATUS) | (_, reg::CMD_GET_QUALITY_DATA) => {
                let s = self.station(module);
                words = [0x8000, s.level as u16, s.usn, s.wam, s.offset as u16, 2360, 750];
            }
            (reg::MODULE_FM, reg::CMD_GET_RDS_DATA) => {
                let raw = if self.rds_next < self.rds_len {
                    self.rds_next += 1;
                    self.rds[self.rds_next - 1]
                } else {
                    RdsRaw {
                        status: reg::RDS_STATUS_SYNC,
                        ..RdsRaw::default()
                    }
                };
                words[..6].copy_from_slice(&[
                    raw.status,
                    raw.block_a,
                    raw.block_b,
                    raw.block_c,
                    raw.block_d,
                    raw.errors,
                ]);
            }
            (reg::MODULE_FM, reg::CMD_GET_SIGNAL_STATUS) => {
                words[0] = if self.stereo { 1 << 15 } else { 0 };
            }
            _ => {}
        }
        for (i, byte) in buf.iter_mut().enumerate() {
            let [hi, lo] = words.get(i / 2).copied().unwrap_or(0).to_be_bytes();
            *byte = if i % 2 == 0 { hi } else { lo };
        }
    }
}

impl ErrorType for MockChip {
    type Error = MockError;
}

impl I2c for MockChip {
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        self.last_address = address;
        if let Some((module, command)) = self.pending.take() {
            self.respond(module, command, buf);
        }
        Ok(())
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        self.last_address = address;
        let slot = &mut self.log[self.frame_count % LOG_LEN];
        slot.0[..bytes.len()].copy_from_slice(bytes);
        slot.1 = bytes.len();
        self.frame_count += 1;

        match bytes {
            [module, command, _] => self.pending = Some((*module, *command)),
            [module, reg::CMD_TUNE_TO, _, _, _, hi, lo] if *module != reg::MODULE_APPL => {
                let frequency = u16::from_be_bytes([*hi, *lo]);
                if *module == reg::MODULE_AM {
                    self.am = frequency;
                } else {
                    self.fm = frequency;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn write_read(&mut self, address: u8, wr: &[u8], rd: &mut [u8]) -> Result<(), Self::Error> {
        self.write(address, wr)?;
        self.read(address, rd)
    }

    fn transaction(
        &mut self,
        _address: u8,
        _operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

// ── Mock delay ────────────────────────────────────────────────────────────

/// Delay that only adds up the time requested.
pub struct MockDelay {
    ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self { ns: 0 }
    }

    pub fn total_ms(&self) -> u32 {
        (self.ns / 1_000_000) as u32
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns += ns as u64;
    }
}
