//! Hardware-PWM buzzer driver for RP2040 (Pico) using Embassy.
//! - Square wave at 50% duty on channel A of one slice
//! - Clock-independent: picks the smallest integer divider that keeps `top` in 16 bits
//! - Stops by disabling the slice, so the pin idles low

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};

use crate::Result;
use crate::audio::ToneOutput;

const TOP_RANGE: u32 = 1 << 16;

/// A piezo buzzer on a PWM channel A.
pub struct PwmTone<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // Kept so the divider survives every reconfiguration
}

impl<'d> PwmTone<'d> {
    /// e.g.: `PwmTone::new(Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, Config::default()))`
    #[must_use]
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let mut cfg = Config::default();
        cfg.enable = false;
        cfg.compare_a = 0;
        pwm.set_config(&cfg);
        Self { pwm, cfg }
    }
}

impl ToneOutput for PwmTone<'_> {
    fn start(&mut self, frequency_hz: u16) -> Result<()> {
        if frequency_hz == 0 {
            return self.stop();
        }
        let ticks = clk_sys_freq() / u32::from(frequency_hz);
        let divider = (ticks / TOP_RANGE).saturating_add(1).clamp(1, u32::from(u8::MAX));
        let top = u16::try_from(ticks / divider)
            .unwrap_or(u16::MAX)
            .saturating_sub(1);

        self.cfg.divider = u8::try_from(divider).unwrap_or(u8::MAX).into();
        self.cfg.top = top;
        self.cfg.compare_a = top / 2;
        self.cfg.phase_correct = false;
        self.cfg.enable = true;
        self.pwm.set_config(&self.cfg);

        #[cfg(feature = "defmt")]
        defmt::debug!("tone {}Hz div={} top={}", frequency_hz, divider, top);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.cfg.compare_a = 0;
        self.cfg.enable = false;
        self.pwm.set_config(&self.cfg);
        Ok(())
    }
}
