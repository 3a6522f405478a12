//! A polled debouncer for one push button (or any noisy digital input).
//!
//! The start (and end) of a press is "noisy": the contacts chatter between touching
//! and not touching for a few milliseconds. [`Debouncer::poll`] accepts a new level only
//! when at least the settle interval has passed since the last *accepted* transition,
//! so a burst of bounces collapses into one event. The price is up to one interval of
//! added latency.
//!
//! A held button can also auto-repeat: arm a rebounce interval and the next poll after
//! it expires reports a synthetic change with the level unchanged.

use embassy_time::Duration;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::time_source::{Millis, duration_to_millis};
use crate::{Error, Result};

/// A debounced digital input sampled once per control-loop iteration.
///
/// # Example
///
/// ```
/// # use embedded_hal::digital::InputPin;
/// use desk_clock_kit::{BUTTON_DEBOUNCE_DELAY, Debouncer, Millis};
///
/// fn on_press<P: InputPin, C: Millis>(pin: P, clock: C) -> desk_clock_kit::Result<()> {
///     let mut button = Debouncer::new(pin, clock, BUTTON_DEBOUNCE_DELAY)?;
///     loop {
///         button.poll()?;
///         if button.rising_edge() {
///             return Ok(());
///         }
///     }
/// }
/// ```
pub struct Debouncer<P, C> {
    pin: P,
    clock: C,
    state: bool,
    previous_millis: u32,
    settle_millis: u32,
    rebounce_millis: u32,
    changed: bool,
}

impl<P: InputPin, C: Millis> Debouncer<P, C> {
    /// Samples the current level as the initial stable state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotReadInput`] if the pin cannot be read.
    pub fn new(mut pin: P, clock: C, settle_interval: Duration) -> Result<Self> {
        let state = pin.is_high().map_err(|_| Error::CannotReadInput)?;
        let previous_millis = clock.millis();
        Ok(Self {
            pin,
            clock,
            state,
            previous_millis,
            settle_millis: duration_to_millis(settle_interval),
            rebounce_millis: 0,
            changed: false,
        })
    }

    /// Samples the pin and reports whether the debounced state changed on this poll.
    ///
    /// A `true` is latched until the next poll, so [`Self::rising_edge`] and
    /// [`Self::falling_edge`] answer for exactly one loop iteration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotReadInput`] if the pin cannot be read.
    pub fn poll(&mut self) -> Result<bool> {
        let level = self.pin.is_high().map_err(|_| Error::CannotReadInput)?;
        let elapsed = self.clock.millis_since(self.previous_millis);

        self.changed = if level != self.state && elapsed >= self.settle_millis {
            self.state = level;
            self.accept();
            true
        } else if self.rebounce_millis != 0 && elapsed >= self.rebounce_millis {
            // Simulate a state change so a held button repeats.
            self.accept();
            true
        } else {
            false
        };
        Ok(self.changed)
    }

    fn accept(&mut self) {
        self.previous_millis = self.clock.millis();
        self.rebounce_millis = 0;
    }
}

impl<P, C: Millis> Debouncer<P, C> {
    /// The debounced level.
    #[must_use]
    pub const fn read(&self) -> bool {
        self.state
    }

    /// `true` for the one poll in which the debounced input went from low to high.
    #[must_use]
    pub const fn rising_edge(&self) -> bool {
        self.changed && self.state
    }

    /// `true` for the one poll in which the debounced input went from high to low.
    #[must_use]
    pub const fn falling_edge(&self) -> bool {
        self.changed && !self.state
    }

    /// Time since the last accepted (or synthetic) transition.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.clock.millis_since(self.previous_millis)))
    }

    /// Changes the settle interval. Any armed rebounce is cancelled.
    pub fn set_settle_interval(&mut self, settle_interval: Duration) {
        self.settle_millis = duration_to_millis(settle_interval);
        self.rebounce_millis = 0;
    }

    /// Arms a synthetic repeat this long after the last transition; zero disarms it.
    ///
    /// Each repeat disarms itself, so call this again after every event to keep a
    /// held button repeating.
    pub fn set_rebounce_interval(&mut self, rebounce_interval: Duration) {
        self.rebounce_millis = duration_to_millis(rebounce_interval);
    }
}

impl<P: OutputPin, C> Debouncer<P, C> {
    /// Forces the stable state and drives the pin to match (bidirectional pins only).
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if the pin cannot be driven.
    pub fn write(&mut self, state: bool) -> Result<()> {
        self.state = state;
        self.pin
            .set_state(state.into())
            .map_err(|_| Error::CannotSetOutputState)
    }
}

/// Instead of having API describing a short vs a long button-press vaguely using a `bool`, we
/// define an `enum` to clarify what each state represents.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressDuration {
    #[default]
    Short,
    Long,
}

/// Holding a button at least this long counts as a long press.
pub const LONG_PRESS_DURATION: Duration = Duration::from_millis(500);

// Make `PressDuration` solely responsible for the distinction in `Duration` between a short and
// long button press.
impl From<Duration> for PressDuration {
    fn from(duration: Duration) -> Self {
        if duration >= LONG_PRESS_DURATION {
            Self::Long
        } else {
            Self::Short
        }
    }
}
