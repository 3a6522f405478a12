use core::convert::Infallible;

use derive_more::derive::{Display, Error};
use embedded_hal::{i2c, pwm};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that the `embedded-hal` error kinds do
    // not implement Rust's `core::error::Error` trait.
    #[display("I2C bus error: {_0:?}")]
    Bus(#[error(not(source))] i2c::ErrorKind),

    #[display("PWM error: {_0:?}")]
    Pwm(#[error(not(source))] pwm::ErrorKind),

    #[display("Error setting output state")]
    CannotSetOutputState,

    #[display("Error reading input state")]
    CannotReadInput,

    #[display("More visual outputs than can be suppressed at once")]
    TooManyVisuals,

    #[display("Format error")]
    FormatError,

    #[display("RTC RAM record is corrupted")]
    StorageCorrupted,
}

impl Error {
    /// Collapse any bus error into its portable [`i2c::ErrorKind`].
    pub fn bus(err: impl i2c::Error) -> Self {
        Self::Bus(err.kind())
    }

    /// Collapse any PWM error into its portable [`pwm::ErrorKind`].
    pub fn pwm(err: impl pwm::Error) -> Self {
        Self::Pwm(err.kind())
    }
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        Self::CannotSetOutputState
    }
}
