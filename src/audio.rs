//! Beeps and melodies on a piezo buzzer.
//!
//! Playback blocks: each note starts the tone, waits out its duration and stops the
//! tone. While a beep or melody plays, the visual outputs passed in are blanked and
//! afterwards restored to whatever state they were in, even if playback fails.

mod note;
mod suppress;

pub use note::{Note, pitch};
pub use suppress::{MAX_VISUALS, Suppress};

use embedded_hal::delay::DelayNs;

use crate::Result;
use crate::shared_constants::{BEEP_DURATION, BEEP_GAP};
use crate::time_source::duration_to_millis;
use suppress::Suppression;

/// A square-wave tone generator driving the buzzer.
pub trait ToneOutput {
    /// Starts (or retunes) a tone at `frequency_hz`.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the output cannot be configured.
    fn start(&mut self, frequency_hz: u16) -> Result<()>;

    /// Silences the buzzer.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if the output cannot be configured.
    fn stop(&mut self) -> Result<()>;
}

impl<T: ToneOutput + ?Sized> ToneOutput for &mut T {
    fn start(&mut self, frequency_hz: u16) -> Result<()> {
        (**self).start(frequency_hz)
    }

    fn stop(&mut self) -> Result<()> {
        (**self).stop()
    }
}

/// Audible feedback for button presses and alarms.
///
/// # Example
///
/// ```
/// # use embedded_hal::delay::DelayNs;
/// use desk_clock_kit::audio::{AudioFeedback, Note, Suppress, ToneOutput, pitch};
///
/// fn chirp<T: ToneOutput, D: DelayNs>(
///     tone: T,
///     delay: D,
///     display: &mut dyn Suppress,
/// ) -> desk_clock_kit::Result<()> {
///     let mut audio = AudioFeedback::new(tone, delay);
///     audio.single_beep(&mut [display])?;
///     audio.play_melody(&[Note::new(pitch::C6, 120), Note::new(pitch::G6, 240)], &mut [])
/// }
/// ```
pub struct AudioFeedback<T, D> {
    tone: T,
    delay: D,
}

impl<T: ToneOutput, D: DelayNs> AudioFeedback<T, D> {
    #[must_use]
    pub const fn new(tone: T, delay: D) -> Self {
        Self { tone, delay }
    }

    /// Gives the tone output and the delay back.
    pub fn release(self) -> (T, D) {
        (self.tone, self.delay)
    }

    /// Plays one note (or rest) to completion. Visuals are left alone.
    ///
    /// # Errors
    ///
    /// Returns the tone output's error if it cannot start or stop.
    pub fn play_note(&mut self, note: Note) -> Result<()> {
        #[cfg(feature = "defmt")]
        defmt::trace!("audio: {}", note);
        let millis = duration_to_millis(note.duration());
        if note.is_rest() {
            self.delay.delay_ms(millis);
            return Ok(());
        }
        self.tone.start(note.pitch_hz)?;
        self.delay.delay_ms(millis);
        self.tone.stop()
    }

    /// A short D6 acknowledging a button press.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TooManyVisuals`] if more than [`MAX_VISUALS`] are passed,
    /// or the first error from a visual or the tone output.
    pub fn single_beep(&mut self, visuals: &mut [&mut dyn Suppress]) -> Result<()> {
        let _suppression = Suppression::new(visuals)?;
        self.beep()
    }

    /// Two D6 beeps separated by a short gap.
    ///
    /// # Errors
    ///
    /// Same as [`Self::single_beep`].
    pub fn double_beep(&mut self, visuals: &mut [&mut dyn Suppress]) -> Result<()> {
        let _suppression = Suppression::new(visuals)?;
        self.beep()?;
        self.delay.delay_ms(duration_to_millis(BEEP_GAP));
        self.beep()
    }

    /// Plays `notes` in order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::single_beep`]. Playback stops at the first failing note.
    pub fn play_melody(&mut self, notes: &[Note], visuals: &mut [&mut dyn Suppress]) -> Result<()> {
        let _suppression = Suppression::new(visuals)?;
        notes.iter().try_for_each(|&note| self.play_note(note))
    }

    /// Plays `notes` last to first.
    ///
    /// # Errors
    ///
    /// Same as [`Self::play_melody`].
    pub fn play_melody_backwards(
        &mut self,
        notes: &[Note],
        visuals: &mut [&mut dyn Suppress],
    ) -> Result<()> {
        let _suppression = Suppression::new(visuals)?;
        notes.iter().rev().try_for_each(|&note| self.play_note(note))
    }

    fn beep(&mut self) -> Result<()> {
        let millis = u16::try_from(duration_to_millis(BEEP_DURATION)).unwrap_or(u16::MAX);
        self.play_note(Note::new(pitch::D6, millis))
    }
}
