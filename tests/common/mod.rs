//! Hand-written `embedded-hal` fakes shared by the host tests.
#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use desk_clock_kit::audio::{Suppress, ToneOutput};
use desk_clock_kit::time_keeper::RTC_ADDRESS;
use desk_clock_kit::{Error, Millis, Result};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::i2c::{self, I2c, NoAcknowledgeSource, Operation};
use embedded_hal::pwm::{self, SetDutyCycle};

// ---- time ----

/// A millisecond counter the test moves by hand. Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct FakeClock(Rc<Cell<u32>>);

impl FakeClock {
    pub fn starting_at(millis: u32) -> Self {
        let clock = Self::default();
        clock.set(millis);
        clock
    }

    pub fn set(&self, millis: u32) {
        self.0.set(millis);
    }

    pub fn advance(&self, millis: u32) {
        self.0.set(self.0.get().wrapping_add(millis));
    }
}

impl Millis for FakeClock {
    fn millis(&self) -> u32 {
        self.0.get()
    }
}

/// Sleeping just moves the shared clock forward.
#[derive(Clone, Debug, Default)]
pub struct FakeDelay(pub FakeClock);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance(ns / 1_000_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.advance(us / 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.advance(ms);
    }
}

// ---- I²C ----

/// A DS1307 register file: 64 bytes behind a pointer that auto-increments and wraps.
#[derive(Debug)]
pub struct Ds1307 {
    pub registers: [u8; 64],
    pub pointer: u8,
    /// Every write transaction's bytes, in order.
    pub writes: Vec<Vec<u8>>,
    /// When set, every transaction is refused at the address byte.
    pub absent: bool,
}

impl Default for Ds1307 {
    fn default() -> Self {
        Self {
            registers: [0; 64],
            pointer: 0,
            writes: Vec::new(),
            absent: false,
        }
    }
}

impl Ds1307 {
    pub fn ram(&self) -> &[u8] {
        &self.registers[8..]
    }

    fn step(&mut self) -> usize {
        let index = usize::from(self.pointer);
        self.pointer = (self.pointer + 1) % 64;
        index
    }
}

impl i2c::ErrorType for Ds1307 {
    type Error = i2c::ErrorKind;
}

impl I2c for Ds1307 {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> core::result::Result<(), Self::Error> {
        if self.absent || address != RTC_ADDRESS {
            return Err(i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    self.writes.push(bytes.to_vec());
                    if let Some((&pointer, data)) = bytes.split_first() {
                        self.pointer = pointer % 64;
                        for &byte in data {
                            let index = self.step();
                            self.registers[index] = byte;
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        let index = self.step();
                        *byte = self.registers[index];
                    }
                }
            }
        }
        Ok(())
    }
}

// ---- digital ----

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Line {
    Data,
    Clock,
    Latch,
    OutputEnable,
}

/// What four daisy-chained shift registers latched on one rising latch edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Latched {
    /// In shift order: the first byte shifted is the first byte here.
    pub bytes: [u8; 4],
    /// Rising clock edges since the previous latch edge.
    pub clock_pulses: usize,
}

/// A shared log of every level written to any [`RecordingPin`].
#[derive(Clone, Debug, Default)]
pub struct PinLog {
    events: Rc<RefCell<Vec<(Line, bool)>>>,
    broken: Rc<Cell<bool>>,
}

impl PinLog {
    pub fn pin(&self, line: Line) -> RecordingPin {
        RecordingPin {
            line,
            log: self.clone(),
        }
    }

    /// Data, clock, latch and output-enable pins, in constructor order.
    pub fn pins(&self) -> [RecordingPin; 4] {
        [Line::Data, Line::Clock, Line::Latch, Line::OutputEnable].map(|line| self.pin(line))
    }

    /// From now on every pin write fails.
    pub fn break_pins(&self) {
        self.broken.set(true);
    }

    pub fn events(&self) -> Vec<(Line, bool)> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// The most recent level written to `line`.
    pub fn level(&self, line: Line) -> Option<bool> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|(logged, _)| *logged == line)
            .map(|&(_, level)| level)
    }

    /// Replays the log through a simulated 32-bit shift chain.
    pub fn latched(&self) -> Vec<Latched> {
        let mut frames = Vec::new();
        let mut shifted: Vec<bool> = Vec::new();
        let (mut data, mut clock, mut latch) = (false, false, false);
        let mut clock_pulses = 0;
        for &(line, level) in self.events.borrow().iter() {
            match line {
                Line::Data => data = level,
                Line::Clock => {
                    if level && !clock {
                        shifted.push(data);
                        clock_pulses += 1;
                    }
                    clock = level;
                }
                Line::Latch => {
                    if level && !latch {
                        let bits = &shifted[shifted.len().saturating_sub(32)..];
                        let mut bytes = [0u8; 4];
                        for (index, &bit) in bits.iter().enumerate() {
                            if bit {
                                bytes[index / 8] |= 0x80 >> (index % 8);
                            }
                        }
                        frames.push(Latched {
                            bytes,
                            clock_pulses,
                        });
                        clock_pulses = 0;
                    }
                    latch = level;
                }
                Line::OutputEnable => {}
            }
        }
        frames
    }
}

#[derive(Debug)]
pub struct RecordingPin {
    line: Line,
    log: PinLog,
}

impl digital::ErrorType for RecordingPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.set_state(digital::PinState::Low)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.set_state(digital::PinState::High)
    }

    fn set_state(&mut self, state: digital::PinState) -> core::result::Result<(), Self::Error> {
        if self.log.broken.get() {
            return Err(digital::ErrorKind::Other);
        }
        self.log
            .events
            .borrow_mut()
            .push((self.line, state == digital::PinState::High));
        Ok(())
    }
}

/// A button input the test drives. Clones share the same level.
#[derive(Clone, Debug, Default)]
pub struct FakeButton(Rc<Cell<bool>>);

impl FakeButton {
    pub fn set_high(&self, high: bool) {
        self.0.set(high);
    }
}

impl digital::ErrorType for FakeButton {
    type Error = Infallible;
}

impl InputPin for FakeButton {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

impl OutputPin for FakeButton {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

/// An input that cannot be read.
#[derive(Debug, Default)]
pub struct DeadInput;

impl digital::ErrorType for DeadInput {
    type Error = digital::ErrorKind;
}

impl InputPin for DeadInput {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

// ---- PWM ----

/// An 8-bit PWM channel whose duty the test can read back. Clones share the duty.
#[derive(Clone, Debug, Default)]
pub struct FakeChannel {
    duty: Rc<Cell<u16>>,
    broken: Rc<Cell<bool>>,
}

impl FakeChannel {
    pub fn duty(&self) -> u16 {
        self.duty.get()
    }

    pub fn preset(&self, duty: u16) {
        self.duty.set(duty);
    }

    pub fn break_channel(&self) {
        self.broken.set(true);
    }
}

impl pwm::ErrorType for FakeChannel {
    type Error = pwm::ErrorKind;
}

impl SetDutyCycle for FakeChannel {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
        if self.broken.get() {
            return Err(pwm::ErrorKind::Other);
        }
        self.duty.set(duty);
        Ok(())
    }
}

/// Four channels plus handles to read them back.
pub fn fake_channels() -> ([FakeChannel; 4], [FakeChannel; 4]) {
    let channels: [FakeChannel; 4] = Default::default();
    let handles = channels.clone();
    (channels, handles)
}

// ---- audio ----

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    ToneStart { at: u32, hz: u16 },
    ToneStop { at: u32 },
    Visual { id: usize, enabled: bool },
}

/// A shared timeline of tone and visual events.
#[derive(Clone, Debug, Default)]
pub struct Timeline(Rc<RefCell<Vec<Event>>>);

impl Timeline {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn tones(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| !matches!(event, Event::Visual { .. }))
            .collect()
    }
}

/// A buzzer that logs to a [`Timeline`] and can be told to fail on its n-th start.
#[derive(Debug)]
pub struct FakeTone {
    pub clock: FakeClock,
    pub timeline: Timeline,
    pub fail_on_start: Option<usize>,
    starts: usize,
}

impl FakeTone {
    pub fn new(clock: FakeClock, timeline: Timeline) -> Self {
        Self {
            clock,
            timeline,
            fail_on_start: None,
            starts: 0,
        }
    }
}

impl ToneOutput for FakeTone {
    fn start(&mut self, frequency_hz: u16) -> Result<()> {
        self.starts += 1;
        if self.fail_on_start == Some(self.starts) {
            return Err(Error::Pwm(pwm::ErrorKind::Other));
        }
        self.timeline.push(Event::ToneStart {
            at: self.clock.millis(),
            hz: frequency_hz,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.timeline.push(Event::ToneStop {
            at: self.clock.millis(),
        });
        Ok(())
    }
}

/// A visual that logs every switch to a [`Timeline`].
#[derive(Debug)]
pub struct Lamp {
    pub id: usize,
    pub enabled: bool,
    pub timeline: Timeline,
    pub refuse_off: bool,
}

impl Lamp {
    pub fn new(id: usize, enabled: bool, timeline: &Timeline) -> Self {
        Self {
            id,
            enabled,
            timeline: timeline.clone(),
            refuse_off: false,
        }
    }
}

impl Suppress for Lamp {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if self.refuse_off && !enabled {
            return Err(Error::CannotSetOutputState);
        }
        self.enabled = enabled;
        self.timeline.push(Event::Visual {
            id: self.id,
            enabled,
        });
        Ok(())
    }
}
