//! Peripheral drivers for a small desk clock: a battery-backed real-time clock on I²C,
//! debounced buttons, a shift-register 7-segment display, breathing status LEDs and a
//! piezo buzzer.
//!
//! Every driver is a plain struct that owns its pins or bus and is polled from one
//! control loop. Nothing is global and nothing runs in the background.
#![cfg_attr(not(test), no_std)]

pub mod audio;
mod config;
mod debouncer;
pub mod display;
mod error;
pub mod led_animator;
pub mod ram_record;
mod shared_constants;
pub mod time_keeper;
mod time_source;
#[cfg(feature = "pico1")]
mod tone_pwm;

// Re-export commonly used items
pub use audio::{AudioFeedback, Note, Suppress, ToneOutput};
pub use config::ClockConfig;
pub use debouncer::{Debouncer, LONG_PRESS_DURATION, PressDuration};
pub use display::ShiftDisplay;
pub use error::{Error, Result};
pub use led_animator::{BreathePeriod, LedAnimator, Pattern};
pub use shared_constants::*;
pub use time_keeper::{ControlRegister, Oscillator, TimeKeeper, WallTime};
#[cfg(feature = "pico1")]
pub use time_source::UptimeMillis;
pub use time_source::{Millis, duration_to_millis};
#[cfg(feature = "pico1")]
pub use tone_pwm::PwmTone;
