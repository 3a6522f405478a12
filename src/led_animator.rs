//! Status-LED animation on four PWM channels.
//!
//! [`LedAnimator::update`] is called once per control-loop iteration. It reads the
//! millisecond counter, evaluates the current [`Pattern`] and writes one duty cycle per
//! channel. Nothing is scheduled in between, so the frame rate is the loop rate.

mod breathe;
mod pattern;

pub use breathe::{BreathePeriod, MAX_BRIGHTNESS, brightness, level};
pub use pattern::Pattern;

use embedded_hal::pwm::SetDutyCycle;

use crate::shared_constants::LED_COUNT;
use crate::time_source::Millis;
use crate::{Error, Result};

/// Drives four PWM channels through a breathing animation.
///
/// # Example
///
/// ```
/// # use embedded_hal::pwm::SetDutyCycle;
/// use desk_clock_kit::Millis;
/// use desk_clock_kit::led_animator::{BreathePeriod, LedAnimator, Pattern};
///
/// fn animate<P: SetDutyCycle, C: Millis>(channels: [P; 4], clock: C) -> desk_clock_kit::Result<()> {
///     let mut leds = LedAnimator::new(channels, clock, BreathePeriod::default());
///     leds.set_pattern(Pattern::Breathe);
///     leds.update()
/// }
/// ```
pub struct LedAnimator<P, C> {
    channels: [P; LED_COUNT],
    clock: C,
    period: BreathePeriod,
    pattern: Pattern,
    /// The last frame drawn, kept so re-enabling can put it back.
    levels: [u8; LED_COUNT],
    enabled: bool,
    paused: bool,
}

impl<P: SetDutyCycle, C: Millis> LedAnimator<P, C> {
    /// Starts enabled and running, with [`Pattern::RollingBreathe`].
    ///
    /// No duty cycle is written until the first [`Self::update`].
    #[must_use]
    pub fn new(channels: [P; LED_COUNT], clock: C, period: BreathePeriod) -> Self {
        Self {
            channels,
            clock,
            period,
            pattern: Pattern::default(),
            levels: [0; LED_COUNT],
            enabled: true,
            paused: false,
        }
    }

    /// Advances the animation to the current time.
    ///
    /// Does nothing while disabled or paused; a paused animation keeps its last frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pwm`] if a channel rejects its duty cycle. Channels before the
    /// failing one have already been updated.
    pub fn update(&mut self) -> Result<()> {
        if !self.enabled || self.paused {
            return Ok(());
        }
        let seconds = self.period.phase_seconds(self.clock.millis());
        self.levels = self.pattern.brightness(seconds).map(level);
        self.draw()
    }

    /// Turns enabled channels fully on and the rest fully off, bypassing the waveform.
    ///
    /// Call [`Self::pause`] first, or the next [`Self::update`] overwrites the states.
    /// While disabled the states are only remembered, and appear on re-enable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pwm`] if a channel cannot be driven.
    pub fn set_led_states(&mut self, states: [bool; LED_COUNT]) -> Result<()> {
        self.levels = states.map(|on| if on { u8::MAX } else { 0 });
        if self.enabled {
            self.draw()?;
        }
        Ok(())
    }

    /// `false` forces every channel off at once; `true` redraws the last frame, so a
    /// paused or static display comes back exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pwm`] if a channel cannot be driven. The enabled flag is updated
    /// even then.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.enabled = enabled;
        if enabled {
            self.draw()?;
        } else {
            for channel in &mut self.channels {
                channel.set_duty_cycle_fully_off().map_err(Error::pwm)?;
            }
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("leds: enabled={}", enabled);
        Ok(())
    }
}

impl<P: SetDutyCycle, C> LedAnimator<P, C> {
    fn draw(&mut self) -> Result<()> {
        for (channel, &level) in self.channels.iter_mut().zip(&self.levels) {
            channel
                .set_duty_cycle_fraction(u16::from(level), u16::from(u8::MAX))
                .map_err(Error::pwm)?;
        }
        Ok(())
    }
}

impl<P, C> LedAnimator<P, C> {
    /// Switches pattern; takes effect on the next update.
    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.pattern = pattern;
    }

    #[must_use]
    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Freezes the animation on its current frame.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn period(&self) -> BreathePeriod {
        self.period
    }

    pub fn set_period(&mut self, period: BreathePeriod) {
        self.period = period;
    }
}
