//! Program Service name assembly.
//!
//! Type 0 groups carry two characters of the 8-character name plus a 2-bit
//! segment address. Stations often scroll longer text through the PS field,
//! so the assembler keeps two staging buffers and flips between them every
//! time the address sequence wraps around. A name is published when either
//!
//! - both buffers are completely written and agree byte for byte, or
//! - every segment of the active buffer has been refreshed in this cycle
//!   with clean data.
//!
//! Each segment keeps a small error history ([`SlotHistory`]) that decides
//! whether a new, possibly damaged, write may overwrite it.

use crate::command::BlockError;
use crate::constants::PS_LEN;

use super::text::sanitize;

/// Segments per PS buffer.
pub const PS_SLOTS: usize = PS_LEN / 2;

/// Best data a segment has seen since the last publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotConfidence {
    /// Not written since the last publish.
    Unwritten,
    /// Only ever written with uncorrectable data; any write is accepted.
    Unconfirmed,
    /// Last reliable write needed correction.
    Corrected,
    /// Last reliable write was clean.
    Clean,
}

/// Error history of one two-character segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotHistory {
    pub confidence: SlotConfidence,
    /// Not rewritten since the address sequence last wrapped.
    pub stale: bool,
}

impl SlotHistory {
    pub const RESET: Self = Self {
        confidence: SlotConfidence::Unwritten,
        stale: true,
    };

    pub fn is_set(&self) -> bool {
        self.confidence != SlotConfidence::Unwritten
    }

    pub fn is_clean(&self) -> bool {
        self.confidence == SlotConfidence::Clean && !self.stale
    }

    /// Whether a write with this confidence may replace the segment.
    ///
    /// A segment that has never held reliable data takes anything, so a
    /// station received only with errors still shows a name.
    pub fn accepts(&self, error: BlockError) -> bool {
        match self.confidence {
            SlotConfidence::Unwritten | SlotConfidence::Unconfirmed => true,
            SlotConfidence::Corrected | SlotConfidence::Clean => error.is_reliable(),
        }
    }

    fn record(&mut self, error: BlockError) {
        self.stale = false;
        self.confidence = match error {
            BlockError::None => SlotConfidence::Clean,
            BlockError::Corrected => SlotConfidence::Corrected,
            BlockError::Uncertain | BlockError::Unusable => SlotConfidence::Unconfirmed,
        };
    }
}

/// Double-buffered PS assembler.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PsAssembler {
    buffers: [[u8; PS_LEN]; 2],
    slots: [[SlotHistory; PS_SLOTS]; 2],
    active: usize,
    prev_address: u8,
}

impl PsAssembler {
    pub const fn new() -> Self {
        Self {
            buffers: [[b' '; PS_LEN]; 2],
            slots: [[SlotHistory::RESET; PS_SLOTS]; 2],
            active: 0,
            prev_address: (PS_SLOTS - 1) as u8,
        }
    }

    /// Index of the buffer currently being written.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn slot(&self, buffer: usize, address: usize) -> SlotHistory {
        self.slots[buffer][address]
    }

    pub fn buffer(&self, buffer: usize) -> &[u8; PS_LEN] {
        &self.buffers[buffer]
    }

    /// Forget all segment histories; buffer contents are kept.
    pub fn reset_history(&mut self) {
        self.slots = [[SlotHistory::RESET; PS_SLOTS]; 2];
    }

    /// Feed one segment. Returns the sanitized name when it is ready to
    /// publish.
    ///
    /// `error` is the worse of the block B and block D confidences.
    pub fn push(&mut self, address: u8, chars: [u8; 2], error: BlockError) -> Option<[u8; PS_LEN]> {
        let address = address & (PS_SLOTS as u8 - 1);
        if address < self.prev_address {
            self.active ^= 1;
            for slot in self.slots[self.active].iter_mut() {
                slot.stale = true;
            }
        }
        self.prev_address = address;

        let slot = &mut self.slots[self.active][address as usize];
        if slot.accepts(error) {
            slot.record(error);
            let base = address as usize * 2;
            for (cell, &ch) in self.buffers[self.active][base..base + 2].iter_mut().zip(&chars) {
                if ch != 0 {
                    *cell = ch;
                }
            }
        }

        if !self.ready() {
            return None;
        }
        let mut name = self.buffers[self.active];
        for ch in name.iter_mut() {
            *ch = sanitize(*ch);
        }
        self.reset_history();
        Some(name)
    }

    fn ready(&self) -> bool {
        let all_set = self.slots.iter().flatten().all(SlotHistory::is_set);
        let agree = all_set && self.buffers[0] == self.buffers[1];
        agree || self.slots[self.active].iter().all(SlotHistory::is_clean)
    }
}

impl Default for PsAssembler {
    fn default() -> Self {
        Self::new()
    }
}
