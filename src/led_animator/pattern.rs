use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::shared_constants::LED_COUNT;

use super::breathe::brightness;

/// Phase offsets for [`Pattern::RollingBreathe`], channel 0 first.
///
/// A larger offset reaches the crest sooner, so the pulse travels from channel 0
/// towards channel 3.
const ROLLING_OFFSETS: [f32; LED_COUNT] = [3.0 * FRAC_PI_4, FRAC_PI_2, FRAC_PI_4, 0.0];

/// Animation patterns for the status LEDs.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// Every channel breathes in phase.
    Breathe,
    /// Each channel is a quarter-π behind its neighbour, so a pulse rolls across the row.
    #[default]
    RollingBreathe,
}

impl Pattern {
    /// Brightness of every channel at `seconds` into the cycle.
    #[must_use]
    pub fn brightness(self, seconds: f32) -> [f32; LED_COUNT] {
        match self {
            Self::Breathe => [brightness(seconds, 0.0); LED_COUNT],
            Self::RollingBreathe => ROLLING_OFFSETS.map(|offset| brightness(seconds, offset)),
        }
    }
}
