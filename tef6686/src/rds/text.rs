//! Byte-level helpers for the fixed-width RDS text fields.

/// Carriage return: ends a Radio Text message early.
pub const CR: u8 = 0x0D;

/// Replace control and high-bit characters with a space.
///
/// Zero passes through untouched; the decoder never writes it, so it can
/// only appear in a buffer that was never filled.
#[inline]
pub fn sanitize(byte: u8) -> u8 {
    match byte {
        1..=31 | 127..=255 => b' ',
        _ => byte,
    }
}

/// View a sanitized field as text.
pub(crate) fn as_str(bytes: &[u8]) -> &str {
    core::str::from_utf8(bytes).unwrap_or("")
}

/// Render a 16-bit word as four uppercase hex digits.
pub(crate) fn hex4(value: u16) -> [u8; 4] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    [
        DIGITS[(value >> 12) as usize & 0xF],
        DIGITS[(value >> 8) as usize & 0xF],
        DIGITS[(value >> 4) as usize & 0xF],
        DIGITS[value as usize & 0xF],
    ]
}
