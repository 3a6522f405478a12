use embassy_time::Duration;

/// Equal-tempered pitches in hertz, rounded to the nearest whole hertz.
pub mod pitch {
    pub const C5: u16 = 523;
    pub const D5: u16 = 587;
    pub const E5: u16 = 659;
    pub const F5: u16 = 698;
    pub const G5: u16 = 784;
    pub const A5: u16 = 880;
    pub const B5: u16 = 988;
    pub const C6: u16 = 1047;
    pub const D6: u16 = 1175;
    pub const E6: u16 = 1319;
    pub const F6: u16 = 1397;
    pub const G6: u16 = 1568;
    pub const A6: u16 = 1760;
    pub const B6: u16 = 1976;
    pub const C7: u16 = 2093;
}

/// One note of a melody. A pitch of zero is a rest.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    pub pitch_hz: u16,
    pub duration_ms: u16,
}

impl Note {
    #[must_use]
    pub const fn new(pitch_hz: u16, duration_ms: u16) -> Self {
        Self {
            pitch_hz,
            duration_ms,
        }
    }

    /// Silence for `duration_ms`.
    #[must_use]
    pub const fn rest(duration_ms: u16) -> Self {
        Self::new(0, duration_ms)
    }

    #[must_use]
    pub const fn is_rest(self) -> bool {
        self.pitch_hz == 0
    }

    #[must_use]
    pub const fn duration(self) -> Duration {
        Duration::from_millis(self.duration_ms as u64)
    }
}
