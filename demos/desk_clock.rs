//! A 4-digit 7-segment desk clock with breathing status LEDs and a buzzer.
//!
//! Runs on a Raspberry Pi Pico RP2040 with a DS1307 on I2C0.
//!
//! | function              | pin            |
//! |-----------------------|----------------|
//! | RTC SDA / SCL         | GP4 / GP5      |
//! | shift data / clock    | GP2 / GP3      |
//! | shift latch / OE      | GP6 / GP7      |
//! | hour / minute button  | GP10 / GP11    |
//! | 12/24 h button        | GP12           |
//! | buzzer                | GP14 (PWM7 A)  |
//! | status LEDs 0..3      | GP16..GP19     |
//!
//! Buttons pull the pin low when pressed. Holding the hour or minute button repeats.
#![no_std]
#![no_main]

use core::convert::Infallible;

use cortex_m_rt::entry;
use defmt::{info, warn};
use defmt_rtt as _;
use desk_clock_kit::display::{Glyph, ShiftDisplay};
use desk_clock_kit::time_keeper::{HourFormat, Meridiem, WallTime};
use desk_clock_kit::{
    AudioFeedback, ClockConfig, ControlRegister, Debouncer, Error, LedAnimator, Oscillator,
    PwmTone, Result, TimeKeeper, UptimeMillis, ram_record,
};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pwm::{self, Pwm};
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;
use panic_probe as _;
use serde::{Deserialize, Serialize};

/// What survives a power cut besides the time itself.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, defmt::Format)]
struct Settings {
    twelve_hour: bool,
}

#[entry]
fn main() -> ! {
    // If it returns, something went wrong.
    let Err(err) = inner_main();
    panic!("{}", err);
}

fn inner_main() -> Result<Infallible> {
    let p = embassy_rp::init(embassy_rp::config::Config::default());
    let config = ClockConfig::default();
    info!("desk clock starting with {}", config);

    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let mut rtc = TimeKeeper::new(i2c);
    rtc.begin();

    let mut settings = match ram_record::load::<_, Settings>(&mut rtc) {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(err) => {
            warn!("settings unreadable ({}); using defaults", err);
            Settings::default()
        }
    };

    let mut display = ShiftDisplay::new(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::High),
    )?;

    if !rtc.is_running()? || !rtc.get_date_time()?.is_plausible() {
        warn!("RTC stopped or unset; starting at midnight");
        display.output_glyphs([Glyph::Dash; 4])?;
        set_time(&mut rtc, WallTime::default(), settings)?;
    }

    let (led0, led1) =
        Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_16, p.PIN_17, pwm::Config::default()).split();
    let (led2, led3) =
        Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_18, p.PIN_19, pwm::Config::default()).split();
    let [led0, led1, led2, led3] =
        [led0, led1, led2, led3].map(|channel| channel.ok_or(Error::CannotSetOutputState));
    let mut leds = LedAnimator::new(
        [led0?, led1?, led2?, led3?],
        UptimeMillis,
        config.breathe_period,
    );

    let tone = PwmTone::new(Pwm::new_output_a(
        p.PWM_SLICE7,
        p.PIN_14,
        pwm::Config::default(),
    ));
    let mut audio = AudioFeedback::new(tone, Delay);

    let settle = config.settle_interval;
    let mut hour_button = Debouncer::new(Input::new(p.PIN_10, Pull::Up), UptimeMillis, settle)?;
    let mut minute_button = Debouncer::new(Input::new(p.PIN_11, Pull::Up), UptimeMillis, settle)?;
    let mut mode_button = Debouncer::new(Input::new(p.PIN_12, Pull::Up), UptimeMillis, settle)?;

    let mut delay = Delay;
    loop {
        let now = match rtc.get_date_time() {
            Ok(now) => now,
            Err(err) => {
                warn!("RTC read failed ({}); skipping this tick", err);
                leds.update()?;
                delay.delay_ms(5);
                continue;
            }
        };
        // Work on a 24-hour face; `set_time` folds back to 12 hours when asked to.
        let mut now = WallTime {
            hour: now.hour_24(),
            hour_format: HourFormat::TwentyFour,
            ..now
        };

        // A synthetic repeat keeps the level low, so "pressed" is `changed && !read()`.
        if hour_button.poll()? && !hour_button.read() {
            now.hour = (now.hour + 1) % 24;
            set_time(&mut rtc, now, settings)?;
            hour_button.set_rebounce_interval(config.repeat_interval);
            audio.single_beep(&mut [&mut display, &mut leds])?;
        }
        if minute_button.poll()? && !minute_button.read() {
            now.minute = (now.minute + 1) % 60;
            now.second = 0;
            set_time(&mut rtc, now, settings)?;
            minute_button.set_rebounce_interval(config.repeat_interval);
            audio.single_beep(&mut [&mut display, &mut leds])?;
        }
        if mode_button.poll()? && mode_button.falling_edge() {
            settings.twelve_hour = !settings.twelve_hour;
            ram_record::save(&mut rtc, &settings)?;
            set_time(&mut rtc, now, settings)?;
            info!("settings: {}", settings);
            audio.double_beep(&mut [&mut display, &mut leds])?;
        }

        let hour = match (settings.twelve_hour, now.hour % 12) {
            (false, _) => now.hour,
            (true, 0) => 12,
            (true, hour) => hour,
        };
        display.output_time(hour, now.minute)?;
        leds.update()?;
        delay.delay_ms(5);
    }
}

/// Writes `time` (given on a 24-hour face) in the layout the settings ask for.
fn set_time<I2C: embedded_hal::i2c::I2c>(
    rtc: &mut TimeKeeper<I2C>,
    time: WallTime,
    settings: Settings,
) -> Result<()> {
    let hour_format = match (settings.twelve_hour, time.is_pm()) {
        (false, _) => HourFormat::TwentyFour,
        (true, false) => HourFormat::Twelve(Meridiem::Am),
        (true, true) => HourFormat::Twelve(Meridiem::Pm),
    };
    rtc.set_date_time(
        &time.with_hour_format(hour_format),
        Oscillator::Running,
        ControlRegister::DisabledLow,
    )
}
