//! Radio Text assembly from type 2 groups.

use crate::constants::RT_LEN;

use super::text::{sanitize, CR};
use super::GroupVersion;

/// What a single type 2 group did to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtUpdate {
    /// The A/B flag flipped and the buffer was blanked.
    pub changed: bool,
    /// A carriage return ended the message inside this group.
    pub terminated: bool,
}

/// 64-character Radio Text buffer.
///
/// Version A groups carry four characters per segment (16 segments),
/// version B groups carry two (only segments 0..=7 are used).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtAssembler {
    text: [u8; RT_LEN],
    ab: bool,
}

impl RtAssembler {
    pub const fn new() -> Self {
        Self {
            text: [b' '; RT_LEN],
            ab: false,
        }
    }

    pub fn text(&self) -> &[u8; RT_LEN] {
        &self.text
    }

    /// Blank the message. The A/B flag is kept so the next group is not
    /// taken for a new message.
    pub fn clear(&mut self) {
        self.text = [b' '; RT_LEN];
    }

    /// Write one group into the buffer.
    ///
    /// A group whose A/B flag differs from the previous one leaves the
    /// whole buffer blank, its own characters included.
    pub fn push(&mut self, version: GroupVersion, block_b: u16, block_c: u16, block_d: u16) -> RtUpdate {
        let mut update = RtUpdate::default();

        let [c_hi, c_lo] = block_c.to_be_bytes();
        let [d_hi, d_lo] = block_d.to_be_bytes();
        let payload = [c_hi, c_lo, d_hi, d_lo];
        let segment = (block_b & 0x0F) as usize;
        let placement = match version {
            GroupVersion::A => Some((segment * 4, &payload[..])),
            GroupVersion::B if segment < 8 => Some((segment * 2, &payload[2..])),
            GroupVersion::B => None,
        };

        if let Some((base, chars)) = placement {
            for (i, &ch) in chars.iter().enumerate() {
                let pos = base + i;
                if ch == CR {
                    self.text[pos..].fill(b' ');
                    update.terminated = true;
                    break;
                }
                if ch != 0 {
                    self.text[pos] = sanitize(ch);
                }
            }
        }

        let ab = block_b & (1 << 4) != 0;
        if ab != self.ab {
            self.ab = ab;
            self.clear();
            update.changed = true;
        }
        update
    }
}

impl Default for RtAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &[u8; 4]) -> (u16, u16) {
        (
            u16::from_be_bytes([s[0], s[1]]),
            u16::from_be_bytes([s[2], s[3]]),
        )
    }

    fn push_a(rt: &mut RtAssembler, segment: u16, ab: bool, chars: &[u8; 4]) -> RtUpdate {
        let (c, d) = words(chars);
        let block_b = 0x2000 | (u16::from(ab) << 4) | segment;
        rt.push(GroupVersion::A, block_b, c, d)
    }

    #[test]
    fn version_a_places_four_chars_per_segment() {
        let mut rt = RtAssembler::new();
        push_a(&mut rt, 0, false, b"HELL");
        push_a(&mut rt, 1, false, b"O WO");
        push_a(&mut rt, 2, false, b"RLD!");
        assert_eq!(&rt.text()[..12], b"HELLO WORLD!");
        assert!(rt.text()[12..].iter().all(|&c| c == b' '));
    }

    #[test]
    fn version_b_places_two_chars_from_block_d() {
        let mut rt = RtAssembler::new();
        let block_b = 0x2800 | 3;
        rt.push(GroupVersion::B, block_b, 0xFFFF, u16::from_be_bytes(*b"OK"));
        assert_eq!(&rt.text()[6..8], b"OK");
        assert!(rt.text()[..6].iter().all(|&c| c == b' '));
    }

    #[test]
    fn version_b_ignores_high_segments() {
        let mut rt = RtAssembler::new();
        let before = *rt.text();
        let update = rt.push(GroupVersion::B, 0x2800 | 9, 0, u16::from_be_bytes(*b"XX"));
        assert_eq!(*rt.text(), before);
        assert!(!update.terminated);
    }

    #[test]
    fn carriage_return_blanks_rest_of_message() {
        let mut rt = RtAssembler::new();
        for segment in 0..16 {
            push_a(&mut rt, segment, false, b"abcd");
        }
        let update = push_a(&mut rt, 3, false, &[b'x', b'y', CR, b'z']);
        assert!(update.terminated);
        assert_eq!(&rt.text()[12..14], b"xy");
        assert!(rt.text()[14..].iter().all(|&c| c == b' '));
        assert_eq!(&rt.text()[..4], b"abcd");
    }

    #[test]
    fn terminator_at_segment_start_blanks_from_its_position() {
        let mut rt = RtAssembler::new();
        for segment in 0..16 {
            push_a(&mut rt, segment, false, b"abcd");
        }
        push_a(&mut rt, 3, false, &[CR, b'q', b'q', b'q']);
        assert!(rt.text()[12..].iter().all(|&c| c == b' '));
        assert!(rt.text()[..12].iter().all(|&c| c != b' '));
    }

    #[test]
    fn ab_toggle_blanks_and_reports_change_once() {
        let mut rt = RtAssembler::new();
        push_a(&mut rt, 0, false, b"OLD ");
        push_a(&mut rt, 5, false, b"TAIL");

        let first = push_a(&mut rt, 0, true, b"NEW ");
        assert!(first.changed);
        assert!(rt.text().iter().all(|&c| c == b' '));

        let second = push_a(&mut rt, 1, true, b"TEXT");
        assert!(!second.changed);
        assert_eq!(&rt.text()[..8], b"    TEXT");

        push_a(&mut rt, 0, true, b"NEW ");
        assert_eq!(&rt.text()[..8], b"NEW TEXT");
    }

    #[test]
    fn control_characters_are_sanitized_and_nulls_skipped() {
        let mut rt = RtAssembler::new();
        push_a(&mut rt, 0, false, b"AAAA");
        push_a(&mut rt, 0, false, &[0x01, 0, 0xE9, b'B']);
        assert_eq!(&rt.text()[..4], b" A B");
    }

    #[test]
    fn clear_keeps_ab_flag() {
        let mut rt = RtAssembler::new();
        push_a(&mut rt, 0, true, b"ABCD");
        rt.clear();
        assert!(rt.text().iter().all(|&c| c == b' '));
        assert!(!push_a(&mut rt, 0, true, b"ABCD").changed);
    }
}
