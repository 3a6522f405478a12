/// Square-wave output setting written to register 7.
///
/// `Low`/`High` is the idle level of the SQW/OUT pin: bit 7 (OUT) is the output level
/// while the square wave is off, and the pin's polarity reference while it is on.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ControlRegister {
    OneHzLow = 0x10,
    OneHzHigh = 0x90,
    FourKhzLow = 0x11,
    FourKhzHigh = 0x91,
    EightKhzLow = 0x12,
    EightKhzHigh = 0x92,
    ThirtyTwoKhzLow = 0x13,
    ThirtyTwoKhzHigh = 0x93,
    #[default]
    DisabledLow = 0x00,
    DisabledHigh = 0x80,
}

impl ControlRegister {
    /// The raw byte sent on the bus.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl From<ControlRegister> for u8 {
    fn from(value: ControlRegister) -> Self {
        value.bits()
    }
}
