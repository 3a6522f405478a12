//! A device abstraction for a 4-digit, 7-segment display behind a 74HC595-style chain.
//!
//! Four shift registers are daisy-chained, one per digit, and share a latch and an
//! active-low output-enable line. A frame is written by holding the latch low, clocking
//! 32 bits in most-significant-bit first, and raising the latch. All four digits change
//! on that single rising edge, so a half-written frame is never visible.
//!
//! The output-enable line blanks the whole display without touching the latched data,
//! which is how tone playback hides multiplexing artifacts.
//!
//! See [`ShiftDisplay`] for usage.

mod glyph;

pub use glyph::{BLANK, Glyph, map_bcd};

use embedded_hal::digital::OutputPin;

use crate::shared_constants::CELL_COUNT;
use crate::{Error, Result};

/// A device abstraction for the clock's shift-register display.
///
/// # Example
///
/// ```
/// # use embedded_hal::digital::OutputPin;
/// use desk_clock_kit::display::{BLANK, Glyph, ShiftDisplay};
///
/// fn show<P: OutputPin>(data: P, clock: P, latch: P, output_enable: P) -> desk_clock_kit::Result<()> {
///     let mut display = ShiftDisplay::new(data, clock, latch, output_enable)?;
///     display.output_time(9, 41)?; // "0941"
///     display.output_digits([BLANK, 9, 4, 1])?; // " 941"
///     display.output_glyphs([Glyph::A, Glyph::R, Glyph::M, Glyph::Blank])?;
///     Ok(())
/// }
/// ```
pub struct ShiftDisplay<P> {
    data: P,
    clock: P,
    latch: P,
    output_enable: P,
    enabled: bool,
}

impl<P: OutputPin> ShiftDisplay<P> {
    /// Drives the data, clock and latch lines low and enables the display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if any pin cannot be driven.
    pub fn new(data: P, clock: P, latch: P, output_enable: P) -> Result<Self> {
        let mut display = Self {
            data,
            clock,
            latch,
            output_enable,
            enabled: false,
        };
        set(&mut display.data, false)?;
        set(&mut display.clock, false)?;
        set(&mut display.latch, false)?;
        display.set_enabled(true)?;
        Ok(display)
    }

    /// Shows `hours` and `minutes` as four decimal digits, leading zeros included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if any pin cannot be driven.
    pub fn output_time(&mut self, hours: u8, minutes: u8) -> Result<()> {
        self.output_digits([hours / 10, hours % 10, minutes / 10, minutes % 10])
    }

    /// Shows four digits, each `0..=9` or [`BLANK`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if any pin cannot be driven.
    pub fn output_digits(&mut self, digits: [u8; CELL_COUNT]) -> Result<()> {
        self.output_bytes(digits.map(map_bcd))
    }

    /// Shows four glyphs of status text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if any pin cannot be driven.
    pub fn output_glyphs(&mut self, glyphs: [Glyph; CELL_COUNT]) -> Result<()> {
        self.output_bytes(glyphs.map(Glyph::segments))
    }

    /// Shifts four raw segment bytes out and latches them together.
    ///
    /// The first byte is shifted first, so it ends up in the register farthest down
    /// the chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if any pin cannot be driven. The latch
    /// stays low in that case, so the previous frame remains on display.
    pub fn output_bytes(&mut self, bytes: [u8; CELL_COUNT]) -> Result<()> {
        #[cfg(feature = "display-trace")]
        defmt::info!("display: {:?}", bytes);
        set(&mut self.latch, false)?;
        for byte in bytes {
            self.shift_out(byte)?;
        }
        set(&mut self.latch, true)
    }

    /// Blanks (`false`) or restores (`true`) the whole display instantly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if the output-enable pin cannot be driven.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        // Output enable is active-low.
        set(&mut self.output_enable, !enabled)?;
        self.enabled = enabled;
        Ok(())
    }

    #[inline]
    fn shift_out(&mut self, byte: u8) -> Result<()> {
        for bit in (0..u8::BITS).rev() {
            set(&mut self.data, (byte >> bit) & 1 == 1)?;
            set(&mut self.clock, true)?;
            set(&mut self.clock, false)?;
        }
        Ok(())
    }
}

impl<P> ShiftDisplay<P> {
    /// `false` while the display is blanked.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }
}

// on some hardware (but not here), setting a bit can fail, so we return a Result
#[inline]
fn set<P: OutputPin>(pin: &mut P, high: bool) -> Result<()> {
    pin.set_state(high.into())
        .map_err(|_| Error::CannotSetOutputState)
}
