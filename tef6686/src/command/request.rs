//! Typed request frames.
//!
//! A write frame is `[module, command, 1, p1_hi, p1_lo, p2_hi, p2_lo, ...]`;
//! a query frame is the three-byte header alone, after which the response
//! is read back as a separate bus transaction.

use super::registers as reg;

/// Most parameters any command takes.
pub const MAX_ARGS: usize = 4;

/// Longest frame the driver ever writes.
pub const MAX_FRAME_LEN: usize = 3 + 2 * MAX_ARGS;

/// Destination module inside the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Module {
    /// FM receiver.
    Fm,
    /// AM receiver.
    Am,
    /// Audio processing.
    Audio,
    /// Application / device control.
    Appl,
}

impl Module {
    /// Module byte on the wire.
    pub const fn id(self) -> u8 {
        match self {
            Module::Fm => reg::MODULE_FM,
            Module::Am => reg::MODULE_AM,
            Module::Audio => reg::MODULE_AUDIO,
            Module::Appl => reg::MODULE_APPL,
        }
    }
}

/// Chip operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Radio running.
    Normal = 0,
    /// Radio in standby, registers retained.
    Standby = 1,
}

/// Mode/start/slope triple shared by the high-cut and stereo blend controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blend {
    /// 0 = off, 3 = on.
    pub mode: u16,
    /// Start threshold in the control's native unit.
    pub start: u16,
    /// Slope in the control's native unit.
    pub slope: u16,
}

/// A write command with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    TuneTo { module: Module, frequency: u16 },
    SetBandwidth {
        module: Module,
        automatic: bool,
        bandwidth: u16,
        control_sensitivity: u16,
        low_level_sensitivity: u16,
    },
    SetRfAgc { start: u16 },
    SetMphSuppression { mode: u16 },
    SetChannelEqualizer { mode: u16 },
    SetDeemphasis { time_constant: u16 },
    SetLevelOffset { offset: i16 },
    SetHighcutLevel(Blend),
    SetHighcutNoise(Blend),
    SetHighcutMph(Blend),
    SetHighcutMax { mode: u16, limit: u16 },
    SetStereoLevel(Blend),
    SetStereoNoise(Blend),
    SetStereoMph(Blend),
    SetStereoMin { mode: u16 },
    SetVolume { volume: i16 },
    SetMute { muted: bool },
    SetOperationMode(OperationMode),
}

impl Command {
    /// Module the command is addressed to.
    pub fn module(&self) -> Module {
        match *self {
            Command::TuneTo { module, .. } | Command::SetBandwidth { module, .. } => module,
            Command::SetVolume { .. } | Command::SetMute { .. } => Module::Audio,
            Command::SetOperationMode(_) => Module::Appl,
            _ => Module::Fm,
        }
    }

    /// Command byte on the wire.
    pub fn id(&self) -> u8 {
        match self {
            Command::TuneTo { .. } => reg::CMD_TUNE_TO,
            Command::SetBandwidth { .. } => reg::CMD_SET_BANDWIDTH,
            Command::SetRfAgc { .. } => reg::CMD_SET_RFAGC,
            Command::SetMphSuppression { .. } => reg::CMD_SET_MPH_SUPPRESSION,
            Command::SetChannelEqualizer { .. } => reg::CMD_SET_CHANNEL_EQUALIZER,
            Command::SetDeemphasis { .. } => reg::CMD_SET_DEEMPHASIS,
            Command::SetLevelOffset { .. } => reg::CMD_SET_LEVEL_OFFSET,
            Command::SetHighcutLevel(_) => reg::CMD_SET_HIGHCUT_LEVEL,
            Command::SetHighcutNoise(_) => reg::CMD_SET_HIGHCUT_NOISE,
            Command::SetHighcutMph(_) => reg::CMD_SET_HIGHCUT_MPH,
            Command::SetHighcutMax { .. } => reg::CMD_SET_HIGHCUT_MAX,
            Command::SetStereoLevel(_) => reg::CMD_SET_STEREO_LEVEL,
            Command::SetStereoNoise(_) => reg::CMD_SET_STEREO_NOISE,
            Command::SetStereoMph(_) => reg::CMD_SET_STEREO_MPH,
            Command::SetStereoMin { .. } => reg::CMD_SET_STEREO_MIN,
            Command::SetVolume { .. } => reg::CMD_SET_VOLUME,
            Command::SetMute { .. } => reg::CMD_SET_MUTE,
            Command::SetOperationMode(_) => reg::CMD_SET_OPERATION_MODE,
        }
    }

    fn args(&self) -> Args {
        match *self {
            Command::TuneTo { frequency, .. } => Args::new(&[1, frequency]),
            Command::SetBandwidth {
                automatic,
                bandwidth,
                control_sensitivity,
                low_level_sensitivity,
                ..
            } => Args::new(&[
                automatic as u16,
                bandwidth,
                control_sensitivity,
                low_level_sensitivity,
            ]),
            Command::SetRfAgc { start } => Args::new(&[start, 0]),
            Command::SetMphSuppression { mode } => Args::new(&[mode]),
            Command::SetChannelEqualizer { mode } => Args::new(&[mode]),
            Command::SetDeemphasis { time_constant } => Args::new(&[time_constant]),
            Command::SetLevelOffset { offset } => Args::new(&[offset as u16]),
            Command::SetHighcutLevel(b)
            | Command::SetHighcutNoise(b)
            | Command::SetHighcutMph(b)
            | Command::SetStereoLevel(b)
            | Command::SetStereoNoise(b)
            | Command::SetStereoMph(b) => Args::new(&[b.mode, b.start, b.slope]),
            Command::SetHighcutMax { mode, limit } => Args::new(&[mode, limit]),
            Command::SetStereoMin { mode } => Args::new(&[mode]),
            Command::SetVolume { volume } => Args::new(&[volume as u16]),
            Command::SetMute { muted } => Args::new(&[muted as u16]),
            Command::SetOperationMode(mode) => Args::new(&[mode as u16]),
        }
    }

    /// Pack the command into a bus frame.
    pub fn encode(&self) -> Frame {
        let mut frame = Frame::header(self.module(), self.id());
        for &word in self.args().as_slice() {
            frame.push_word(word);
        }
        frame
    }
}

/// A read request; the response length is fixed per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Query {
    OperationStatus,
    Identification,
    QualityStatus(Module),
    QualityData(Module),
    RdsData,
    SignalStatus,
}

impl Query {
    pub fn module(&self) -> Module {
        match *self {
            Query::OperationStatus | Query::Identification => Module::Appl,
            Query::QualityStatus(module) | Query::QualityData(module) => module,
            Query::RdsData | Query::SignalStatus => Module::Fm,
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            Query::OperationStatus => reg::CMD_GET_OPERATION_STATUS,
            Query::Identification => reg::CMD_GET_IDENTIFICATION,
            Query::QualityStatus(_) => reg::CMD_GET_QUALITY_STATUS,
            Query::QualityData(_) => reg::CMD_GET_QUALITY_DATA,
            Query::RdsData => reg::CMD_GET_RDS_DATA,
            Query::SignalStatus => reg::CMD_GET_SIGNAL_STATUS,
        }
    }

    /// Number of bytes the chip answers with.
    pub const fn response_len(&self) -> usize {
        match self {
            Query::OperationStatus | Query::SignalStatus => 2,
            Query::Identification => 6,
            Query::QualityStatus(_) | Query::QualityData(_) => 14,
            Query::RdsData => 12,
        }
    }

    pub fn encode(&self) -> Frame {
        Frame::header(self.module(), self.id())
    }
}

/// Fixed-capacity parameter list.
#[derive(Debug, Clone, Copy)]
struct Args {
    words: [u16; MAX_ARGS],
    len: usize,
}

impl Args {
    fn new(words: &[u16]) -> Self {
        let mut args = Args {
            words: [0; MAX_ARGS],
            len: words.len().min(MAX_ARGS),
        };
        args.words[..args.len].copy_from_slice(&words[..args.len]);
        args
    }

    fn as_slice(&self) -> &[u16] {
        &self.words[..self.len]
    }
}

/// An encoded frame ready for the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bytes: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl Frame {
    fn header(module: Module, id: u8) -> Self {
        let mut bytes = [0u8; MAX_FRAME_LEN];
        bytes[0] = module.id();
        bytes[1] = id;
        bytes[2] = reg::FRAME_INDEX;
        Frame { bytes, len: 3 }
    }

    fn push_word(&mut self, word: u16) {
        let [hi, lo] = word.to_be_bytes();
        self.bytes[self.len] = hi;
        self.bytes[self.len + 1] = lo;
        self.len += 2;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}
