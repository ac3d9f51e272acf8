//! Indicator port - abstraction for the tri-colour status LED

use crate::domain::Rgb;

/// Error type for indicator output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorError {
    /// A PWM channel rejected the duty cycle
    PwmFailed,
}

/// Port for a three-channel brightness output
///
/// Implementations scale each 0-255 level to their native output range.
pub trait IndicatorPort {
    /// Drive all three channels
    fn set_rgb(&mut self, color: Rgb) -> Result<(), IndicatorError>;
}
