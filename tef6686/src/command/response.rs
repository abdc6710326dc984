//! Typed views over raw query responses.
//!
//! All words are big-endian. Lengths match [`Query::response_len`](super::Query::response_len).

use super::registers as reg;

#[inline]
fn word(buf: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([buf[at], buf[at + 1]])
}

/// Received signal quality, as reported by `Get_Quality_Status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QualityStatus {
    /// Raw status word (bit 15: measurement ready).
    pub status: u16,
    /// Level detector result (0.1 dBuV).
    pub level: i16,
    /// Ultrasonic noise (0.1 %).
    pub usn: u16,
    /// Wideband AM / multipath (0.1 %).
    pub wam: u16,
    /// Frequency offset (0.1 kHz).
    pub offset: i16,
    /// Channel bandwidth (kHz).
    pub bandwidth: u16,
    /// Modulation (%).
    pub modulation: u16,
}

impl QualityStatus {
    pub fn from_bytes(buf: &[u8; 14]) -> Self {
        Self {
            status: word(buf, 0),
            level: word(buf, 2) as i16,
            usn: word(buf, 4),
            wam: word(buf, 6),
            offset: word(buf, 8) as i16,
            bandwidth: word(buf, 10) / 10,
            modulation: word(buf, 12) / 10,
        }
    }
}

/// Coarse quality figures used by the station check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QualityData {
    /// Ultrasonic noise (%).
    pub usn: u8,
    /// Wideband AM / multipath (%).
    pub wam: u8,
    /// Magnitude of the frequency offset (0.1 kHz).
    pub offset: u16,
}

impl QualityData {
    pub fn from_bytes(buf: &[u8; 14]) -> Self {
        let offset = word(buf, 8) as i16;
        Self {
            usn: (word(buf, 4) / 10).min(u8::MAX as u16) as u8,
            wam: (word(buf, 6) / 10).min(u8::MAX as u16) as u8,
            offset: offset.unsigned_abs(),
        }
    }
}

/// Chip identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identification {
    pub device: u16,
    pub hw_version: u16,
    pub sw_version: u16,
}

impl Identification {
    pub fn from_bytes(buf: &[u8; 6]) -> Self {
        Self {
            device: word(buf, 0),
            hw_version: word(buf, 2),
            sw_version: word(buf, 4),
        }
    }
}

/// Device state from `Get_Operation_Status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootState {
    /// Waiting for firmware patch upload.
    Boot,
    /// Patched, radio not started.
    Idle,
    /// Radio running.
    Active,
    /// Any state code the driver does not know.
    Other(u16),
}

impl BootState {
    pub fn from_bytes(buf: &[u8; 2]) -> Self {
        match word(buf, 0) {
            0 => BootState::Boot,
            1 => BootState::Idle,
            2 => BootState::Active,
            other => BootState::Other(other),
        }
    }
}

/// Stereo pilot detection from `Get_Signal_Status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalStatus {
    pub stereo: bool,
}

impl SignalStatus {
    pub fn from_bytes(buf: &[u8; 2]) -> Self {
        Self {
            stereo: word(buf, 0) & (1 << 15) != 0,
        }
    }
}

/// Error-correction confidence of one RDS block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlockError {
    /// Received clean.
    None = 0,
    /// Small error, corrected.
    Corrected = 1,
    /// Large error, corrected.
    Uncertain = 2,
    /// Uncorrectable.
    Unusable = 3,
}

impl BlockError {
    pub const fn from_code(code: u8) -> Self {
        match code & 3 {
            0 => BlockError::None,
            1 => BlockError::Corrected,
            2 => BlockError::Uncertain,
            _ => BlockError::Unusable,
        }
    }

    /// Good enough for fields that tolerate single-bit correction.
    pub fn is_reliable(self) -> bool {
        self <= BlockError::Corrected
    }
}

/// One RDS group fragment as read from `Get_RDS_Data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RdsRaw {
    pub status: u16,
    pub block_a: u16,
    pub block_b: u16,
    pub block_c: u16,
    pub block_d: u16,
    /// Two bits per block, A in bits 15:14 down to D in bits 9:8.
    pub errors: u16,
}

impl RdsRaw {
    pub fn from_bytes(buf: &[u8; 12]) -> Self {
        Self {
            status: word(buf, 0),
            block_a: word(buf, 2),
            block_b: word(buf, 4),
            block_c: word(buf, 6),
            block_d: word(buf, 8),
            errors: word(buf, 10),
        }
    }

    pub fn data_available(&self) -> bool {
        self.status & reg::RDS_STATUS_DATA_AVAILABLE != 0
    }

    pub fn data_loss(&self) -> bool {
        self.status & reg::RDS_STATUS_DATA_LOSS != 0
    }

    pub fn sync(&self) -> bool {
        self.status & reg::RDS_STATUS_SYNC != 0
    }

    /// Confidence of blocks A through D.
    pub fn block_errors(&self) -> [BlockError; 4] {
        let code = |shift: u16| BlockError::from_code((self.errors >> shift) as u8);
        [code(14), code(12), code(10), code(8)]
    }
}
