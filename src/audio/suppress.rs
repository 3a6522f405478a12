use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use heapless::Vec;

use crate::display::ShiftDisplay;
use crate::led_animator::LedAnimator;
use crate::time_source::Millis;
use crate::{Error, Result};

/// Most visual outputs one tone can blank at a time.
pub const MAX_VISUALS: usize = 4;

/// A visual output that can be blanked while a tone plays.
pub trait Suppress {
    fn is_enabled(&self) -> bool;

    /// # Errors
    ///
    /// Returns the driver's error if the output cannot be switched.
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;
}

impl<P: OutputPin> Suppress for ShiftDisplay<P> {
    fn is_enabled(&self) -> bool {
        self.enabled()
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        Self::set_enabled(self, enabled)
    }
}

impl<P: SetDutyCycle, C: Millis> Suppress for LedAnimator<P, C> {
    fn is_enabled(&self) -> bool {
        self.enabled()
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        Self::set_enabled(self, enabled)
    }
}

/// Blanks every visual for as long as it lives, then puts each back the way it was.
pub(super) struct Suppression<'a, 'v> {
    visuals: &'a mut [&'v mut dyn Suppress],
    prior: Vec<bool, MAX_VISUALS>,
}

impl<'a, 'v> Suppression<'a, 'v> {
    /// If a visual refuses to switch off, the ones already blanked are restored before
    /// the error is returned.
    pub(super) fn new(visuals: &'a mut [&'v mut dyn Suppress]) -> Result<Self> {
        if visuals.len() > MAX_VISUALS {
            return Err(Error::TooManyVisuals);
        }
        let mut suppression = Self {
            visuals,
            prior: Vec::new(),
        };
        for visual in suppression.visuals.iter_mut() {
            suppression
                .prior
                .push(visual.is_enabled())
                .map_err(|_| Error::TooManyVisuals)?;
            visual.set_enabled(false)?;
        }
        Ok(suppression)
    }
}

impl Drop for Suppression<'_, '_> {
    fn drop(&mut self) {
        for (visual, &enabled) in self.visuals.iter_mut().zip(&self.prior) {
            if let Err(_err) = visual.set_enabled(enabled) {
                #[cfg(feature = "defmt")]
                defmt::warn!("audio: could not restore a visual: {}", _err);
            }
        }
    }
}
