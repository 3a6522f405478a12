//! Packed binary-coded decimal, exactly as the RTC stores it.
//!
//! These are not general BCD routines. [`encode`] assumes `value < 100` and
//! [`decode`] assumes both nibbles are `0..=9`. Anything else produces an
//! unspecified byte (never a panic); callers validate ranges first.

/// Pack a decimal value `0..=99` into one byte, tens in the high nibble.
///
/// Values of 100 and above wrap silently.
#[must_use]
#[inline]
pub const fn encode(value: u8) -> u8 {
    (value / 10).wrapping_mul(16).wrapping_add(value % 10)
}

/// Unpack a BCD byte into its decimal value.
///
/// A nibble above 9 yields a meaningless (but non-panicking) result.
#[must_use]
#[inline]
pub const fn decode(value: u8) -> u8 {
    (value / 16).wrapping_mul(10).wrapping_add(value % 16)
}
