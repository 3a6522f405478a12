use super::bcd;

/// Bit 6 of the hour register: set for 12-hour mode.
const TWELVE_HOUR_FLAG: u8 = 0x40;
/// Bit 5 of the hour register in 12-hour mode: set for PM.
const PM_FLAG: u8 = 0x20;
const TWELVE_HOUR_DIGITS: u8 = 0x1F;
const TWENTY_FOUR_HOUR_DIGITS: u8 = 0x3F;

/// Morning or afternoon on a 12-hour face.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    #[default]
    Am,
    Pm,
}

/// How the hour register is laid out.
///
/// Only the 12-hour layout stores a meridiem. In 24-hour mode "PM" is derived from
/// the hour, so there is nothing to get out of sync.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    #[default]
    TwentyFour,
    Twelve(Meridiem),
}

/// A calendar date and time as the RTC counts it.
///
/// Every field is a plain decimal byte: seconds and minutes `0..=59`, hours `0..=23`
/// (or `1..=12` with [`HourFormat::Twelve`]), day of week `1..=7`, day of month
/// `1..=31`, month `1..=12`, year `0..=99`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub second: u8,
    pub minute: u8,
    pub hour: u8,
    pub day_of_week: u8,
    pub day_of_month: u8,
    pub month: u8,
    pub year: u8,
    pub hour_format: HourFormat,
}

impl Default for WallTime {
    /// Midnight, 1 January 2000, 24-hour mode.
    fn default() -> Self {
        Self {
            second: 0,
            minute: 0,
            hour: 0,
            day_of_week: 1,
            day_of_month: 1,
            month: 1,
            year: 0,
            hour_format: HourFormat::TwentyFour,
        }
    }
}

impl WallTime {
    /// A time of day on the default date, in 24-hour mode.
    #[must_use]
    pub fn from_hms(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            second,
            minute,
            hour,
            ..Self::default()
        }
    }

    /// The same instant with a different calendar date.
    #[must_use]
    pub const fn with_date(self, day_of_week: u8, day_of_month: u8, month: u8, year: u8) -> Self {
        Self {
            day_of_week,
            day_of_month,
            month,
            year,
            ..self
        }
    }

    /// The same fields with another hour layout. No conversion is applied to `hour`.
    #[must_use]
    pub const fn with_hour_format(self, hour_format: HourFormat) -> Self {
        Self {
            hour_format,
            ..self
        }
    }

    /// `true` when the hour is counted `1..=12` with a meridiem.
    #[must_use]
    pub const fn twelve_hour_mode(&self) -> bool {
        matches!(self.hour_format, HourFormat::Twelve(_))
    }

    /// `true` for afternoon. Derived from the hour in 24-hour mode.
    #[must_use]
    pub const fn is_pm(&self) -> bool {
        match self.hour_format {
            HourFormat::TwentyFour => self.hour >= 12,
            HourFormat::Twelve(meridiem) => matches!(meridiem, Meridiem::Pm),
        }
    }

    /// The hour on a 24-hour face, whichever layout is stored.
    #[must_use]
    pub const fn hour_24(&self) -> u8 {
        match self.hour_format {
            HourFormat::TwentyFour => self.hour,
            HourFormat::Twelve(Meridiem::Am) => self.hour % 12,
            HourFormat::Twelve(Meridiem::Pm) => self.hour % 12 + 12,
        }
    }

    /// Loose range check for detecting a stuck or absent bus.
    ///
    /// A floating bus reads back `0xFF` bytes and a missing chip reads back zeros,
    /// both of which fail here (month 0 or minute 165).
    #[must_use]
    pub const fn is_plausible(&self) -> bool {
        let hour_ok = match self.hour_format {
            HourFormat::TwentyFour => self.hour <= 23,
            HourFormat::Twelve(_) => self.hour >= 1 && self.hour <= 12,
        };
        hour_ok
            && self.second <= 59
            && self.minute <= 59
            && self.day_of_week >= 1
            && self.day_of_week <= 7
            && self.day_of_month >= 1
            && self.day_of_month <= 31
            && self.month >= 1
            && self.month <= 12
            && self.year <= 99
    }
}

/// Encode the hour register.
///
/// In 12-hour mode an hour given on a 24-hour face (`0` or `13..=23`) is folded onto
/// the 12-hour face first, and its meridiem wins over the supplied one.
pub(crate) const fn encode_hour(hour: u8, hour_format: HourFormat) -> u8 {
    match hour_format {
        HourFormat::TwentyFour => bcd::encode(hour),
        HourFormat::Twelve(meridiem) => {
            let (hour, meridiem) = match hour {
                0 => (12, Meridiem::Am),
                13..=23 => (hour - 12, Meridiem::Pm),
                _ => (hour, meridiem),
            };
            let pm = match meridiem {
                Meridiem::Am => 0,
                Meridiem::Pm => PM_FLAG,
            };
            bcd::encode(hour) | TWELVE_HOUR_FLAG | pm
        }
    }
}

/// Decode the hour register into an hour and its layout.
pub(crate) const fn decode_hour(raw: u8) -> (u8, HourFormat) {
    if raw & TWELVE_HOUR_FLAG == 0 {
        (bcd::decode(raw & TWENTY_FOUR_HOUR_DIGITS), HourFormat::TwentyFour)
    } else {
        let meridiem = if raw & PM_FLAG == 0 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        };
        (
            bcd::decode(raw & TWELVE_HOUR_DIGITS),
            HourFormat::Twelve(meridiem),
        )
    }
}
