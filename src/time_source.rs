//! A wrapping millisecond counter, the only notion of "now" the drivers need.
//!
//! The debouncer and the LED animator sample elapsed time on every poll. They never
//! sleep, so all they need is a counter that ticks once per millisecond and wraps
//! at `u32::MAX` (about 49.7 days). Every comparison against it uses wrapping
//! subtraction, so the wrap is invisible to callers.

use embassy_time::Duration;

/// A free-running millisecond counter that wraps at `u32::MAX`.
pub trait Millis {
    /// Milliseconds since an arbitrary, fixed origin.
    fn millis(&self) -> u32;

    /// Milliseconds elapsed since `since`, correct across one wrap of the counter.
    #[inline]
    fn millis_since(&self, since: u32) -> u32 {
        self.millis().wrapping_sub(since)
    }
}

impl<T: Millis + ?Sized> Millis for &T {
    #[inline]
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}

/// Uptime as reported by the embassy time driver, truncated to 32 bits.
#[cfg(feature = "pico1")]
#[derive(Clone, Copy, Debug, Default)]
pub struct UptimeMillis;

#[cfg(feature = "pico1")]
impl Millis for UptimeMillis {
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "The counter is defined to wrap at 32 bits"
    )]
    fn millis(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}

/// Convert a [`Duration`] to whole milliseconds, saturating at `u32::MAX`.
#[must_use]
pub fn duration_to_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
