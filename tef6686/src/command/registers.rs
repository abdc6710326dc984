//! TEF6686 module and command identifiers.
//!
//! Every frame on the bus starts with a module byte and a command byte,
//! followed by a fixed index byte (always 1) and big-endian 16-bit
//! parameters. Responses to `Get_*` commands are read back as big-endian
//! 16-bit words.

// A few commands are listed for completeness but not issued by the driver.
#![allow(dead_code)]

// ── Modules ────────────────────────────────────────────────────────────────

/// FM receiver module.
pub const MODULE_FM: u8 = 0x20;

/// AM receiver module.
pub const MODULE_AM: u8 = 0x21;

/// Audio processing module.
pub const MODULE_AUDIO: u8 = 0x30;

/// Application (device control) module.
pub const MODULE_APPL: u8 = 0x40;

/// Index byte that follows the command id in every frame.
pub const FRAME_INDEX: u8 = 1;

// ── Radio (FM / AM) commands ───────────────────────────────────────────────

/// Tune to a frequency.
/// - Param 1: mode (1 = preset)
/// - Param 2: frequency (FM: 10 kHz units, AM: 1 kHz units)
pub const CMD_TUNE_TO: u8 = 1;

/// Channel bandwidth.
/// - Param 1: mode (0 = fixed, 1 = automatic)
/// - Param 2: bandwidth (0.1 kHz)
/// - Param 3: control sensitivity (0.1 %)
/// - Param 4: low level sensitivity (0.1 %)
pub const CMD_SET_BANDWIDTH: u8 = 10;

/// RF AGC start level.
/// - Param 1: start (0.1 dBuV)
/// - Param 2: extension (0 = off)
pub const CMD_SET_RFAGC: u8 = 11;

/// Multipath suppression on/off.
pub const CMD_SET_MPH_SUPPRESSION: u8 = 20;

/// Channel equalizer on/off.
pub const CMD_SET_CHANNEL_EQUALIZER: u8 = 22;

/// FM de-emphasis time constant (0.1 us, 0 = off).
pub const CMD_SET_DEEMPHASIS: u8 = 31;

/// Level offset (0.1 dB, signed).
pub const CMD_SET_LEVEL_OFFSET: u8 = 39;

/// High-cut control driven by level: mode, start, slope.
pub const CMD_SET_HIGHCUT_LEVEL: u8 = 52;

/// High-cut control driven by noise: mode, start, slope.
pub const CMD_SET_HIGHCUT_NOISE: u8 = 53;

/// High-cut control driven by multipath: mode, start, slope.
pub const CMD_SET_HIGHCUT_MPH: u8 = 54;

/// High-cut maximum: mode, limit (Hz).
pub const CMD_SET_HIGHCUT_MAX: u8 = 55;

/// Stereo blend driven by level: mode, start, slope.
pub const CMD_SET_STEREO_LEVEL: u8 = 62;

/// Stereo blend driven by noise: mode, start, slope.
pub const CMD_SET_STEREO_NOISE: u8 = 63;

/// Stereo blend driven by multipath: mode, start, slope.
pub const CMD_SET_STEREO_MPH: u8 = 64;

/// Forced mono (1) or stereo allowed (0).
pub const CMD_SET_STEREO_MIN: u8 = 66;

/// Quality status: status, level, USN, WAM, offset, bandwidth, modulation.
pub const CMD_GET_QUALITY_STATUS: u8 = 128;

/// Quality data: same layout as quality status.
pub const CMD_GET_QUALITY_DATA: u8 = 129;

/// RDS data: status, block A, B, C, D, decoder error word.
pub const CMD_GET_RDS_DATA: u8 = 131;

/// Signal status.
/// - Bit 15: stereo pilot detected
pub const CMD_GET_SIGNAL_STATUS: u8 = 133;

// ── Audio commands ─────────────────────────────────────────────────────────

/// Audio volume (0.1 dB, signed).
pub const CMD_SET_VOLUME: u8 = 10;

/// Audio mute (1 = muted).
pub const CMD_SET_MUTE: u8 = 11;

// ── Application commands ───────────────────────────────────────────────────

/// Operation mode (0 = normal, 1 = radio standby).
pub const CMD_SET_OPERATION_MODE: u8 = 1;

/// Operation status.
/// - Bits 15:0: state (0 = boot, 1 = idle, 2 = active)
pub const CMD_GET_OPERATION_STATUS: u8 = 128;

/// GPIO status.
pub const CMD_GET_GPIO_STATUS: u8 = 129;

/// Identification: device, hardware version, software version.
pub const CMD_GET_IDENTIFICATION: u8 = 130;

// ── RDS status word ────────────────────────────────────────────────────────

/// New group available since the last read.
pub const RDS_STATUS_DATA_AVAILABLE: u16 = 1 << 15;

/// Groups were lost between reads.
pub const RDS_STATUS_DATA_LOSS: u16 = 1 << 14;

/// Decoder synchronised to the block stream.
pub const RDS_STATUS_SYNC: u16 = 1 << 9;
