/// Default 7-bit I2C address of the TEF6686.
pub const I2C_ADDRESS: u8 = 0x64;

/// Settling time after every bus write, in milliseconds.
pub const BUS_SETTLE_MS: u32 = 2;

/// Delay before each station check while seeking, in milliseconds.
pub const SEEK_SETTLE_MS: u32 = 20;

/// Delay between the start of a station check and the first level read.
pub const CHECK_START_MS: u32 = 4;

/// Delay between the two level reads of a station check.
pub const CHECK_LEVEL_RETRY_MS: u32 = 5;

/// Delay before the quality read that ends a station check.
pub const CHECK_QUALITY_MS: u32 = 40;

/// Ultrasonic noise ceiling (percent) for a station to count as found.
pub const STATION_USN_MAX: u8 = 27;

/// Wideband AM (multipath) ceiling (percent) for a station to count as found.
pub const STATION_WAM_MAX: u8 = 23;

/// Frequency offset ceiling (0.1 kHz) for a station to count as found.
pub const STATION_OFFSET_MAX: u16 = 100;

/// Width of the Program Identification field (hex digits).
pub const PI_LEN: usize = 4;

/// Width of the Program Service name.
pub const PS_LEN: usize = 8;

/// Width of the Radio Text message.
pub const RT_LEN: usize = 64;

/// FM frequency committed on power-up (100.00 MHz).
pub const FM_POWER_ON_FREQUENCY: u16 = 10000;

/// AM frequency the driver starts from (999 kHz).
pub const AM_POWER_ON_FREQUENCY: u16 = 999;

/// Audio volume range in dB.
pub const VOLUME_MIN_DB: i16 = -60;
pub const VOLUME_MAX_DB: i16 = 24;

/// Bandwidth sent with automatic bandwidth selection (0.1 kHz).
pub const AUTO_BANDWIDTH: u16 = 3110;

/// Control and low-level sensitivity sent with every bandwidth command (0.1 %).
pub const BANDWIDTH_SENSITIVITY: u16 = 1000;
