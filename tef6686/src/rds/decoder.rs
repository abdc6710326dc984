use crate::command::{BlockError, RdsRaw};
use crate::constants::{PI_LEN, PS_LEN, RT_LEN};

use super::ps::PsAssembler;
use super::pty::{ProgramType, PtyRegion};
use super::rt::RtAssembler;
use super::text::{as_str, hex4};

/// Version bit of block B (bit 11).
const VERSION_B: u16 = 1 << 11;

/// Group version: A carries two data blocks, B repeats the PI in block C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GroupVersion {
    A,
    B,
}

/// Group type and version taken from block B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Group {
    /// Type code 0..=15.
    pub kind: u8,
    pub version: GroupVersion,
}

impl Group {
    pub fn from_block_b(block_b: u16) -> Self {
        Self {
            kind: (block_b >> 12) as u8,
            version: if block_b & VERSION_B != 0 {
                GroupVersion::B
            } else {
                GroupVersion::A
            },
        }
    }
}

/// Result of feeding one raw read to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeOutcome {
    pub sync: bool,
    pub data_available: bool,
    pub data_loss: bool,
    /// Set whenever a group was consumed.
    pub group: Option<Group>,
    pub ps_committed: bool,
    pub radio_text_changed: bool,
    pub radio_text_terminated: bool,
}

/// Published RDS fields.
///
/// A plain copy of the decoder's output, safe to hand to a display task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RdsSnapshot {
    program_type: Option<ProgramType>,
    program_id: [u8; PI_LEN],
    program_service: [u8; PS_LEN],
    radio_text: [u8; RT_LEN],
    radio_text_changed: bool,
}

impl RdsSnapshot {
    const EMPTY: Self = Self {
        program_type: None,
        program_id: [b' '; PI_LEN],
        program_service: [b' '; PS_LEN],
        radio_text: [b' '; RT_LEN],
        radio_text_changed: false,
    };

    /// PTY display name, empty until block B has been received reliably.
    pub fn program_type(&self) -> &'static str {
        self.program_type.map_or("", |pty| pty.name())
    }

    pub fn program_type_code(&self) -> Option<u8> {
        self.program_type.map(|pty| pty.code())
    }

    /// PI code as four uppercase hex digits.
    pub fn program_id(&self) -> &str {
        as_str(&self.program_id)
    }

    pub fn program_service(&self) -> &str {
        as_str(&self.program_service)
    }

    pub fn radio_text(&self) -> &str {
        as_str(&self.radio_text)
    }

    /// The last decoded group started a new Radio Text message.
    pub fn radio_text_changed(&self) -> bool {
        self.radio_text_changed
    }
}

impl Default for RdsSnapshot {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Incremental RDS decoder.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RdsDecoder {
    region: PtyRegion,
    published: RdsSnapshot,
    ps: PsAssembler,
    rt: RtAssembler,
}

impl RdsDecoder {
    pub const fn new(region: PtyRegion) -> Self {
        Self {
            region,
            published: RdsSnapshot::EMPTY,
            ps: PsAssembler::new(),
            rt: RtAssembler::new(),
        }
    }

    pub fn region(&self) -> PtyRegion {
        self.region
    }

    pub fn snapshot(&self) -> RdsSnapshot {
        self.published
    }

    /// Blank PI, PS and Radio Text and mark every PS segment stale.
    ///
    /// The program type and the Radio Text A/B flag are kept.
    pub fn clear(&mut self) {
        self.published = RdsSnapshot {
            program_type: self.published.program_type,
            ..RdsSnapshot::EMPTY
        };
        self.ps.reset_history();
        self.rt.clear();
    }

    /// Return to the power-up state, as after retuning.
    pub fn reset(&mut self) {
        *self = Self::new(self.region);
    }

    /// Consume one raw read.
    pub fn decode(&mut self, raw: &RdsRaw) -> DecodeOutcome {
        let mut outcome = DecodeOutcome {
            sync: raw.sync(),
            data_available: raw.data_available(),
            data_loss: raw.data_loss(),
            ..DecodeOutcome::default()
        };
        self.published.radio_text_changed = false;
        if !outcome.data_available {
            return outcome;
        }

        let [err_a, err_b, _, err_d] = raw.block_errors();
        let group = Group::from_block_b(raw.block_b);
        outcome.group = Some(group);

        if err_b.is_reliable() {
            self.published.program_type = Some(ProgramType::from_block_b(raw.block_b, self.region));
        }
        if err_a == BlockError::None {
            self.published.program_id = hex4(raw.block_a);
        }

        match group.kind {
            0 => {
                let address = (raw.block_b & 0x03) as u8;
                let chars = raw.block_d.to_be_bytes();
                if let Some(name) = self.ps.push(address, chars, err_b.max(err_d)) {
                    self.published.program_service = name;
                    outcome.ps_committed = true;
                    #[cfg(feature = "defmt")]
                    defmt::debug!("rds: PS {=[u8]:a}", &self.published.program_service[..]);
                }
            }
            2 if err_b == BlockError::None => {
                let update = self.rt.push(group.version, raw.block_b, raw.block_c, raw.block_d);
                self.published.radio_text = *self.rt.text();
                self.published.radio_text_changed = update.changed;
                outcome.radio_text_changed = update.changed;
                outcome.radio_text_terminated = update.terminated;
                #[cfg(feature = "defmt")]
                if update.changed {
                    defmt::debug!("rds: new radio text");
                }
                #[cfg(feature = "defmt")]
                if update.terminated {
                    defmt::debug!("rds: radio text {=[u8]:a}", &self.published.radio_text[..]);
                }
            }
            _ => {}
        }
        outcome
    }
}

impl Default for RdsDecoder {
    fn default() -> Self {
        Self::new(PtyRegion::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVAILABLE: u16 = (1 << 15) | (1 << 9);
    const PI: u16 = 0xD3C2;

    fn raw(block_b: u16, block_c: u16, block_d: u16, errors: u16) -> RdsRaw {
        RdsRaw {
            status: AVAILABLE,
            block_a: PI,
            block_b,
            block_c,
            block_d,
            errors,
        }
    }

    fn errors(a: u16, b: u16, c: u16, d: u16) -> u16 {
        (a << 14) | (b << 12) | (c << 10) | (d << 8)
    }

    fn ps_group(address: u16, pty: u16, chars: &[u8; 2]) -> RdsRaw {
        raw((pty << 5) | address, 0, u16::from_be_bytes(*chars), 0)
    }

    fn rt_group(segment: u16, ab: bool, chars: &[u8; 4]) -> RdsRaw {
        raw(
            0x2000 | (u16::from(ab) << 4) | segment,
            u16::from_be_bytes([chars[0], chars[1]]),
            u16::from_be_bytes([chars[2], chars[3]]),
            0,
        )
    }

    #[test]
    fn no_data_available_changes_nothing() {
        let mut rds = RdsDecoder::default();
        let before = rds.snapshot();
        let outcome = rds.decode(&RdsRaw {
            status: 1 << 9,
            block_a: PI,
            block_b: 0x0400,
            ..RdsRaw::default()
        });
        assert!(outcome.sync);
        assert!(!outcome.data_available);
        assert_eq!(outcome.group, None);
        assert_eq!(rds.snapshot(), before);
    }

    #[test]
    fn program_id_needs_clean_block_a() {
        for (code, expect) in [(0, true), (1, false), (2, false), (3, false)] {
            let mut rds = RdsDecoder::default();
            rds.decode(&raw(0x4000, 0, 0, errors(code, 0, 0, 0)));
            assert_eq!(rds.snapshot().program_id() == "D3C2", expect, "error code {code}");
        }
    }

    #[test]
    fn program_type_tolerates_corrected_block_b() {
        let mut rds = RdsDecoder::default();
        rds.decode(&raw(0x4000 | (1 << 5), 0, 0, errors(0, 1, 0, 0)));
        assert_eq!(rds.snapshot().program_type(), "News");
        assert_eq!(rds.snapshot().program_type_code(), Some(1));

        rds.decode(&raw(0x4000 | (4 << 5), 0, 0, errors(0, 2, 0, 0)));
        assert_eq!(rds.snapshot().program_type(), "News");
    }

    #[test]
    fn rbds_region_names_program_type() {
        let mut rds = RdsDecoder::new(PtyRegion::Rbds);
        rds.decode(&raw(0x4000 | (4 << 5), 0, 0, 0));
        assert_eq!(rds.snapshot().program_type(), "Talk");
    }

    #[test]
    fn group_kind_and_version() {
        let mut rds = RdsDecoder::default();
        let outcome = rds.decode(&raw(0x2800, 0, 0, 0));
        assert_eq!(
            outcome.group,
            Some(Group {
                kind: 2,
                version: GroupVersion::B
            })
        );
        let outcome = rds.decode(&raw(0xF000, 0, 0, 0));
        assert_eq!(
            outcome.group,
            Some(Group {
                kind: 15,
                version: GroupVersion::A
            })
        );
    }

    #[test]
    fn program_service_end_to_end() {
        let mut rds = RdsDecoder::default();
        let mut committed = 0;
        for (address, chars) in [b"RA", b"DI", b"O ", b"1 "].iter().enumerate() {
            let outcome = rds.decode(&ps_group(address as u16, 10, chars));
            committed += outcome.ps_committed as u32;
        }
        assert_eq!(committed, 1);
        assert_eq!(rds.snapshot().program_service(), "RADIO 1 ");
        assert_eq!(rds.snapshot().program_type(), "Pop Music");
    }

    #[test]
    fn program_service_uses_worst_of_b_and_d() {
        let mut rds = RdsDecoder::default();
        for (address, chars) in [b"RA", b"DI", b"O ", b"1 "].iter().enumerate() {
            let mut group = ps_group(address as u16, 0, chars);
            group.errors = errors(0, 0, 0, 2);
            assert!(!rds.decode(&group).ps_committed);
        }
        assert_eq!(rds.snapshot().program_service(), "        ");
    }

    #[test]
    fn radio_text_needs_clean_block_b() {
        let mut rds = RdsDecoder::default();
        let mut group = rt_group(0, false, b"LOST");
        group.errors = errors(0, 1, 0, 0);
        rds.decode(&group);
        assert!(rds.snapshot().radio_text().starts_with("    "));

        rds.decode(&rt_group(0, false, b"KEPT"));
        assert!(rds.snapshot().radio_text().starts_with("KEPT"));
        assert_eq!(rds.snapshot().radio_text().len(), RT_LEN);
    }

    #[test]
    fn radio_text_changed_is_set_for_one_group() {
        let mut rds = RdsDecoder::default();
        rds.decode(&rt_group(0, false, b"ONE "));

        let outcome = rds.decode(&rt_group(0, true, b"TWO "));
        assert!(outcome.radio_text_changed);
        assert!(rds.snapshot().radio_text_changed());
        assert!(rds.snapshot().radio_text().bytes().all(|c| c == b' '));

        let outcome = rds.decode(&rt_group(1, true, b"MORE"));
        assert!(!outcome.radio_text_changed);
        assert!(!rds.snapshot().radio_text_changed());
        assert!(rds.snapshot().radio_text().starts_with("    MORE"));
    }

    #[test]
    fn radio_text_terminator() {
        let mut rds = RdsDecoder::default();
        for segment in 0..16 {
            rds.decode(&rt_group(segment, false, b"wxyz"));
        }
        let outcome = rds.decode(&rt_group(3, false, &[b'a', 0x0D, b'b', b'c']));
        assert!(outcome.radio_text_terminated);
        let snap = rds.snapshot();
        let text = snap.radio_text();
        assert_eq!(&text[12..13], "a");
        assert!(text[13..].bytes().all(|c| c == b' '));
    }

    #[test]
    fn clear_blanks_text_but_keeps_program_type() {
        let mut rds = RdsDecoder::default();
        rds.decode(&rt_group(0, true, b"TEXT"));
        rds.decode(&rt_group(0, true, b"TEXT"));
        assert!(rds.snapshot().radio_text().starts_with("TEXT"));
        rds.decode(&raw(0x4000 | (1 << 5), 0, 0, 0));
        rds.clear();
        let snap = rds.snapshot();
        assert_eq!(snap.program_id(), "    ");
        assert_eq!(snap.program_service(), "        ");
        assert_eq!(snap.program_type(), "News");
        assert!(snap.radio_text().bytes().all(|c| c == b' '));
        // A/B flag survives a clear.
        assert!(!rds.decode(&rt_group(1, true, b"MORE")).radio_text_changed);
    }

    #[test]
    fn reset_restores_power_up_state() {
        let mut rds = RdsDecoder::new(PtyRegion::Rbds);
        rds.decode(&rt_group(0, true, b"TEXT"));
        rds.reset();
        assert_eq!(rds.region(), PtyRegion::Rbds);
        assert_eq!(rds.snapshot(), RdsSnapshot::default());
        assert!(rds.decode(&rt_group(0, true, b"TEXT")).radio_text_changed);
    }
}
