//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how the application reaches hardware.
//! They keep the domain and the pipeline independent of specific parts.
//!
//! - **ColorSensorPort**: How we read the RGBC sensor (TCS34725 over I2C, mock)
//! - **IndicatorPort**: How we show a colour (PWM RGB LED, mock)

pub mod color_sensor;
pub mod indicator;

pub use color_sensor::{ColorSensorConfig, ColorSensorError, ColorSensorPort, Gain, Persistence};
pub use indicator::{IndicatorError, IndicatorPort};
