//! The breathing waveform: `(e^sin(t·π/2 + φ) − e^−1) × 108`.
//!
//! `e^sin(x)` swings between `e^−1` and `e`, so subtracting `e^−1` pins the trough
//! at zero and the crest lands at [`MAX_BRIGHTNESS`] (about 253.84), just inside an
//! 8-bit duty cycle. The exponential keeps the LEDs dim for most of the cycle and
//! brightens quickly near the top, which reads as a slow breath rather than a blink.

use core::f32::consts::{E, FRAC_PI_2};
use core::num::NonZeroU32;

/// `e^−1`, the waveform's floor before the offset.
pub const SHAPE_OFFSET: f32 = 0.367_879_44;

/// Scale applied after the offset.
pub const AMPLITUDE: f32 = 108.0;

/// Radians per second; one breath every four seconds.
pub const ANGULAR_RATE: f32 = FRAC_PI_2;

/// The crest of the waveform, `(e − e^−1) × 108`.
pub const MAX_BRIGHTNESS: f32 = (E - SHAPE_OFFSET) * AMPLITUDE;

/// The window elapsed time is folded into before evaluating the waveform.
///
/// Folding keeps `t` small, so `f32` keeps full precision and the phase never
/// jumps when the millisecond counter wraps. `Unwrapped` feeds raw uptime in
/// instead; it matches the earliest firmware, whose phase drifts and eventually
/// stutters after long uptimes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BreathePeriod {
    Millis(NonZeroU32),
    Unwrapped,
}

impl Default for BreathePeriod {
    fn default() -> Self {
        Self::from_millis(4000)
    }
}

impl BreathePeriod {
    /// A folding window of `millis`; zero means [`BreathePeriod::Unwrapped`].
    #[must_use]
    pub const fn from_millis(millis: u32) -> Self {
        match NonZeroU32::new(millis) {
            Some(period) => Self::Millis(period),
            None => Self::Unwrapped,
        }
    }

    /// Seconds fed to the waveform for the given uptime.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "Folded values are far below f32's exact-integer limit"
    )]
    pub fn phase_seconds(self, elapsed_millis: u32) -> f32 {
        let millis = match self {
            Self::Millis(period) => elapsed_millis % period.get(),
            Self::Unwrapped => elapsed_millis,
        };
        millis as f32 / 1000.0
    }
}

/// Brightness `0.0..=MAX_BRIGHTNESS` at `seconds` with the given phase offset in radians.
#[must_use]
pub fn brightness(seconds: f32, phase_offset: f32) -> f32 {
    let swing = libm::expf(libm::sinf(seconds * ANGULAR_RATE + phase_offset));
    ((swing - SHAPE_OFFSET) * AMPLITUDE).max(0.0)
}

/// An 8-bit duty level for a brightness, truncating like an 8-bit PWM compare register.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Clamped to 0..=255 first"
)]
pub fn level(brightness: f32) -> u8 {
    brightness.clamp(0.0, 255.0) as u8
}
