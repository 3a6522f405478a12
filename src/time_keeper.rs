//! A device abstraction for a DS1307-style battery-backed real-time clock on I²C.
//!
//! The chip exposes 64 byte-wide registers behind an auto-incrementing pointer:
//!
//! | register | contents                                            |
//! |----------|-----------------------------------------------------|
//! | `0x00`   | seconds (BCD), bit 7 = clock halt                   |
//! | `0x01`   | minutes (BCD)                                       |
//! | `0x02`   | hours (BCD), bit 6 = 12-hour mode, bit 5 = PM       |
//! | `0x03`   | day of week (BCD)                                   |
//! | `0x04`   | day of month (BCD)                                  |
//! | `0x05`   | month (BCD)                                         |
//! | `0x06`   | year (BCD)                                          |
//! | `0x07`   | control (raw)                                       |
//! | `0x08..` | 56 bytes of general-purpose battery-backed RAM      |
//!
//! Nothing is cached: every read goes back to the bus. The driver does not retry and
//! sets no timeouts; a bus error is returned to the caller, who decides what to do.
//!
//! See [`TimeKeeper`] for usage.

pub mod bcd;
mod control_register;
mod wall_time;

pub use control_register::ControlRegister;
pub use wall_time::{HourFormat, Meridiem, WallTime};

use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::{Error, Result};
use wall_time::{decode_hour, encode_hour};

/// Fixed 7-bit bus address of the chip.
pub const RTC_ADDRESS: u8 = 0x68;

/// Bytes of battery-backed RAM behind the clock registers.
pub const RAM_CAPACITY: usize = 56;

const SECONDS_REGISTER: u8 = 0x00;
const RAM_REGISTER: u8 = 0x08;
const CLOCK_HALT: u8 = 0x80;
const SECONDS_DIGITS: u8 = 0x7F;

/// Whether the oscillator should run after [`TimeKeeper::set_date_time`].
///
/// Clearing the clock-halt bit starts the chip counting; setting it freezes the
/// registers and cuts battery drain while in storage.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oscillator {
    #[default]
    Running,
    Halted,
}

/// A device abstraction for the real-time clock.
///
/// # Example
///
/// ```
/// # use embedded_hal::i2c::I2c;
/// use desk_clock_kit::time_keeper::{
///     ControlRegister, HourFormat, Meridiem, Oscillator, TimeKeeper, WallTime,
/// };
///
/// fn set_and_check<I2C: I2c>(i2c: I2C) -> desk_clock_kit::Result<bool> {
///     let mut rtc = TimeKeeper::new(i2c);
///     let time = WallTime::from_hms(23, 59, 59)
///         .with_hour_format(HourFormat::Twelve(Meridiem::Pm));
///     rtc.set_date_time(&time, Oscillator::Running, ControlRegister::DisabledLow)?;
///     rtc.is_running()
/// }
/// ```
pub struct TimeKeeper<I2C> {
    i2c: I2C,
    ram: [u8; RAM_CAPACITY],
}

impl<I2C: I2c> TimeKeeper<I2C> {
    /// Takes the bus master role for the clock.
    ///
    /// The HAL has already configured the bus by the time it hands over `i2c`, so nothing
    /// is sent here. Construction is the only way to get a `TimeKeeper`, which is what
    /// guarantees initialization happens before any other call.
    #[must_use]
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            ram: [0; RAM_CAPACITY],
        }
    }

    /// Announces the clock on the log. Safe to call any number of times.
    ///
    /// Bus setup already happened in the HAL before [`Self::new`], so this sends nothing.
    pub fn begin(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("rtc: DS1307 at {=u8:#x}", RTC_ADDRESS);
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Writes the full time block and the control register in one transaction.
    ///
    /// There is no read-back; use [`Self::is_running`] or [`Self::get_date_time`] to confirm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the write is not acknowledged.
    pub fn set_date_time(
        &mut self,
        time: &WallTime,
        oscillator: Oscillator,
        control: ControlRegister,
    ) -> Result<()> {
        let halt = match oscillator {
            Oscillator::Running => 0,
            Oscillator::Halted => CLOCK_HALT,
        };
        let frame = [
            SECONDS_REGISTER,
            bcd::encode(time.second) | halt,
            bcd::encode(time.minute),
            encode_hour(time.hour, time.hour_format),
            bcd::encode(time.day_of_week),
            bcd::encode(time.day_of_month),
            bcd::encode(time.month),
            bcd::encode(time.year),
            control.bits(),
        ];
        #[cfg(feature = "defmt")]
        defmt::debug!("rtc: set {:?} oscillator={:?}", time, oscillator);
        self.i2c.write(RTC_ADDRESS, &frame).map_err(Error::bus)
    }

    /// Reads seconds through year.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if either the pointer reset or the read fails.
    pub fn get_date_time(&mut self) -> Result<WallTime> {
        let mut registers = [0u8; 7];
        self.read_from(SECONDS_REGISTER, &mut registers)?;
        let [seconds, minutes, hours, day_of_week, day_of_month, month, year] = registers;
        let (hour, hour_format) = decode_hour(hours);
        Ok(WallTime {
            second: bcd::decode(seconds & SECONDS_DIGITS),
            minute: bcd::decode(minutes),
            hour,
            day_of_week: bcd::decode(day_of_week),
            day_of_month: bcd::decode(day_of_month),
            month: bcd::decode(month),
            year: bcd::decode(year),
            hour_format,
        })
    }

    /// `true` when the oscillator is enabled (clock-halt bit clear).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if either the pointer reset or the read fails.
    pub fn is_running(&mut self) -> Result<bool> {
        let mut seconds = [0u8; 1];
        self.read_from(SECONDS_REGISTER, &mut seconds)?;
        Ok(seconds[0] & CLOCK_HALT == 0)
    }

    /// The local mirror of the chip's RAM.
    #[must_use]
    pub const fn ram(&self) -> &[u8; RAM_CAPACITY] {
        &self.ram
    }

    /// Mutable access to the local mirror; changes reach the chip on [`Self::save_ram_data`].
    pub const fn ram_mut(&mut self) -> &mut [u8; RAM_CAPACITY] {
        &mut self.ram
    }

    /// Copies the first `min(len, RAM_CAPACITY)` mirror bytes to the chip.
    ///
    /// Returns the number of bytes written. Requests beyond capacity are clamped silently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the write fails; the chip may hold a partial copy.
    pub fn save_ram_data(&mut self, len: usize) -> Result<usize> {
        let len = len.min(RAM_CAPACITY);
        let mut frame: Vec<u8, { RAM_CAPACITY + 1 }> = Vec::new();
        frame.push(RAM_REGISTER).map_err(|_| Error::FormatError)?;
        frame
            .extend_from_slice(self.ram.get(..len).unwrap_or_default())
            .map_err(|()| Error::FormatError)?;
        self.i2c.write(RTC_ADDRESS, &frame).map_err(Error::bus)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("rtc: saved {} RAM bytes", len);
        Ok(len)
    }

    /// Fills the first `min(len, RAM_CAPACITY)` mirror bytes from the chip.
    ///
    /// Returns the number of bytes read. Requests beyond capacity are clamped silently, and
    /// a zero-length request does not touch the bus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transfer fails; the mirror may hold a partial copy.
    pub fn get_ram_data(&mut self, len: usize) -> Result<usize> {
        let len = len.min(RAM_CAPACITY);
        if len == 0 {
            return Ok(0);
        }
        self.i2c
            .write(RTC_ADDRESS, &[RAM_REGISTER])
            .map_err(Error::bus)?;
        if let Some(window) = self.ram.get_mut(..len) {
            self.i2c.read(RTC_ADDRESS, window).map_err(Error::bus)?;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("rtc: loaded {} RAM bytes", len);
        Ok(len)
    }

    /// Resets the register pointer in its own transaction, then reads `buffer.len()` bytes.
    fn read_from(&mut self, register: u8, buffer: &mut [u8]) -> Result<()> {
        self.i2c.write(RTC_ADDRESS, &[register]).map_err(Error::bus)?;
        self.i2c.read(RTC_ADDRESS, buffer).map_err(Error::bus)
    }
}
