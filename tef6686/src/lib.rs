//! # tef6686
//!
//! A `no_std`, zero-allocation driver for the NXP TEF6686 FM/AM tuner,
//! built on [`embedded-hal`](https://docs.rs/embedded-hal) 1.0. Besides the
//! raw command set it carries an RDS decoder for the station name, Radio
//! Text, PI code and program type, and a station search that can run either
//! to completion or one phase per call from a host loop.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Wire | [`command`] | Module/command ids, typed command frames, response views |
//! | RDS | [`rds`] | Group decoding into PS, Radio Text, PI and PTY |
//! | Tuning | [`tuning`] | Band stepping with wrap-around, station check, seek |
//! | Driver | [`Tef6686`] | I2C transport and the public tuner API |
//! | Trait | [`control`] | `RadioControl` for power and volume |
//!
//! ## Quick start
//!
//! ```ignore
//! use tef6686::{Tef6686, tuning::{Band, Direction}};
//!
//! let mut radio = Tef6686::new(i2c, delay);
//! radio.power_on()?;
//! radio.set_frequency(&Band::FM_EUROPE, 9470)?;
//!
//! // Main loop:
//! match radio.seek_step(Direction::Up, &Band::FM_EUROPE, 200)? {
//!     SeekPoll::Pending => {}
//!     done => show_frequency(done.frequency()),
//! }
//! radio.read_rds()?;
//! show_name(radio.rds().program_service());
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `defmt` | no | `defmt::Format` on public types and debug logging |
//!
//! ## Units
//!
//! - **FM frequency:** 10 kHz (`9470` = 94.70 MHz)
//! - **AM frequency:** 1 kHz
//! - **Level:** 0.1 dBuV ([`command::QualityStatus::level`])

#![no_std]

pub mod command;
pub mod constants;
pub mod control;
pub mod rds;
pub mod tuning;

mod tuner;

pub use control::RadioControl;
pub use tuner::{AgcThreshold, Bandwidth, Config, Deemphasis, Tef6686};

#[cfg(test)]
mod mock;
