//! PWM RGB LED adapter
//!
//! Implements the IndicatorPort trait for a common-cathode RGB LED driven by
//! three `embedded-hal` PWM channels.

use embedded_hal::pwm::SetDutyCycle;

use crate::domain::Rgb;
use crate::ports::indicator::{IndicatorError, IndicatorPort};

/// RGB LED on three PWM channels
///
/// Each 0-255 level is scaled to the channel's own duty cycle range.
pub struct PwmRgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R: SetDutyCycle, G: SetDutyCycle, B: SetDutyCycle> PwmRgbLed<R, G, B> {
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }

    /// Release the PWM channels
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

fn set_level<P: SetDutyCycle>(channel: &mut P, level: u8) -> Result<(), IndicatorError> {
    channel
        .set_duty_cycle_fraction(level as u16, u8::MAX as u16)
        .map_err(|_| IndicatorError::PwmFailed)
}

impl<R: SetDutyCycle, G: SetDutyCycle, B: SetDutyCycle> IndicatorPort for PwmRgbLed<R, G, B> {
    fn set_rgb(&mut self, color: Rgb) -> Result<(), IndicatorError> {
        set_level(&mut self.red, color.r)?;
        set_level(&mut self.green, color.g)?;
        set_level(&mut self.blue, color.b)
    }
}
