//! Binary coded decimal conversion for single register bytes.
//!
//! RTC chips store each calendar field as two packed decimal digits: the high
//! nibble holds the tens and the low nibble the ones. Both conversions avoid
//! division on the decode side and are exact for the values RTC fields use
//! (0-99).
//!
//! Neither function validates its input. Bytes that are not valid BCD decode
//! to meaningless values and binary values above 99 encode to wrapped bytes;
//! neither case panics.

/// Converts a BCD byte to its binary value.
///
/// Exact for `0x00..=0x99` where both nibbles are decimal digits.
///
/// ```
/// assert_eq!(bcd_rtc::bcd::decode(0x45), 45);
/// ```
#[inline]
pub const fn decode(bcd: u8) -> u8 {
    // 16 * tens + ones - 6 * tens == 10 * tens + ones, never underflows
    bcd - 6 * (bcd >> 4)
}

/// Converts a binary value to a BCD byte.
///
/// Exact for `0..=99`. Larger values wrap.
///
/// ```
/// assert_eq!(bcd_rtc::bcd::encode(45), 0x45);
/// ```
#[inline]
pub const fn encode(value: u8) -> u8 {
    value.wrapping_add(6 * (value / 10))
}
