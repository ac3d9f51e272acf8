//! Adapters - concrete implementations of ports
//!
//! Adapters connect the application to the hardware by implementing the
//! port traits on top of `embedded-hal` and `embedded-hal-async`.
//!
//! # Available Adapters
//!
//! - **tcs34725**: TCS34725 RGBC colour sensor via I2C
//! - **pwm_led**: RGB status LED on three PWM channels
//! - **interrupt_line**: sensor interrupt pin feeding the readiness gate

pub mod interrupt_line;
pub mod pwm_led;
pub mod tcs34725;

pub use interrupt_line::InterruptLine;
pub use pwm_led::PwmRgbLed;
pub use tcs34725::{Tcs34725Adapter, TCS34725_ADDR};
