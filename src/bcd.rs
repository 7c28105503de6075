//! Packed binary-coded-decimal conversion for the time-keeping registers.
//!
//! Each register holds one field as two decimal digits: tens in the high
//! nibble, units in the low nibble. The seconds register additionally
//! carries the clock-halt flag in bit 7, which is never part of the value.

use crate::registers::CLOCK_HALT;

/// Encode a value in `0..=99` as packed BCD.
///
/// Values of 100 or more are outside the codec's domain; callers validate
/// ranges before encoding (see [`DateTime::validate`](crate::DateTime::validate)).
pub fn decimal_to_bcd(value: u8) -> u8 {
    debug_assert!(value < 100, "BCD encode out of range: {}", value);
    ((value / 10) << 4) | (value % 10)
}

/// Decode a packed BCD byte.
///
/// Accepts any byte: the nibbles are taken as-is, so malformed input
/// yields a meaningless but well-defined result instead of a panic.
pub fn bcd_to_decimal(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Encode a seconds value together with the clock-halt flag.
///
/// `halted` is always supplied by the caller; the flag never defaults.
pub(crate) fn encode_seconds(seconds: u8, halted: bool) -> u8 {
    let bcd = decimal_to_bcd(seconds) & !CLOCK_HALT;
    if halted {
        bcd | CLOCK_HALT
    } else {
        bcd
    }
}

/// Decode the seconds register, ignoring the clock-halt flag.
pub(crate) fn decode_seconds(register: u8) -> u8 {
    bcd_to_decimal(register & !CLOCK_HALT)
}
