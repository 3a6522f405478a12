//! Compile-time configuration of the clock.
//!
//! `build.rs` exports `BREATHE_PERIOD_MS`, `BUTTON_SETTLE_MS` and `BUTTON_REPEAT_MS`
//! (from the environment or a `.env` file, with defaults) and this module turns
//! them into typed values. A value that does not parse falls back to its default.

use embassy_time::Duration;

use crate::led_animator::BreathePeriod;
use crate::shared_constants::{BREATHE_PERIOD, BUTTON_DEBOUNCE_DELAY, BUTTON_REPEAT_DELAY};
use crate::time_source::duration_to_millis;

/// Tunables read at build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Modulo window applied to elapsed time before evaluating the breathe waveform.
    pub breathe_period: BreathePeriod,
    /// Minimum time between accepted button transitions.
    pub settle_interval: Duration,
    /// Auto-repeat interval for held buttons while setting a field.
    pub repeat_interval: Duration,
}

impl Default for ClockConfig {
    /// The configuration baked in by `build.rs`.
    fn default() -> Self {
        Self::parse(
            env!("BREATHE_PERIOD_MS"),
            env!("BUTTON_SETTLE_MS"),
            env!("BUTTON_REPEAT_MS"),
        )
    }
}

impl ClockConfig {
    /// Build a configuration from the raw millisecond strings.
    ///
    /// A breathe period of `"0"` selects [`BreathePeriod::Unwrapped`].
    #[must_use]
    pub fn parse(breathe_period_ms: &str, settle_ms: &str, repeat_ms: &str) -> Self {
        let breathe_period = match breathe_period_ms.trim().parse::<u32>() {
            Ok(0) => BreathePeriod::Unwrapped,
            Ok(millis) => BreathePeriod::from_millis(millis),
            Err(_) => BreathePeriod::from_millis(duration_to_millis(BREATHE_PERIOD)),
        };
        Self {
            breathe_period,
            settle_interval: parse_duration(settle_ms).unwrap_or(BUTTON_DEBOUNCE_DELAY),
            repeat_interval: parse_duration(repeat_ms).unwrap_or(BUTTON_REPEAT_DELAY),
        }
    }
}

fn parse_duration(millis: &str) -> Option<Duration> {
    millis
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_millis)
}
