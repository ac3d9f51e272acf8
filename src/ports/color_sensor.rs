//! Colour sensor port - interface for RGBC light sensors
//!
//! This port defines how the application talks to a four-channel colour
//! sensor with an interrupt output, like the TCS34725, without knowing the
//! bus or the register layout.

use crate::domain::{Channel, IntegrationTime};
use core::future::Future;

/// Errors that can occur during colour sensor operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorSensorError {
    /// Sensor not responding or reporting an unexpected ID
    NotDetected,
    /// I2C transaction failed
    I2cError,
    /// Sensor has not been started with `begin()`
    NotInitialized,
    /// Configuration value outside the sensor's range
    InvalidConfig,
}

/// Analog gain applied to all channels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    #[default]
    X1 = 0x00,
    X4 = 0x01,
    X16 = 0x02,
    X60 = 0x03,
}

/// How many consecutive out-of-threshold cycles raise an interrupt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Persistence {
    /// Interrupt at the end of every integration cycle, ignoring thresholds
    #[default]
    EveryCycle = 0x00,
    OneOutOfRange = 0x01,
    TwoOutOfRange = 0x02,
    ThreeOutOfRange = 0x03,
    FiveOutOfRange = 0x04,
    TenOutOfRange = 0x05,
}

/// Colour sensor configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorSensorConfig {
    /// Integration window per measurement cycle
    pub integration_time: IntegrationTime,
    /// Analog gain
    pub gain: Gain,
    /// Interrupt persistence filter
    pub persistence: Persistence,
}

impl Default for ColorSensorConfig {
    fn default() -> Self {
        Self::sorter()
    }
}

impl ColorSensorConfig {
    /// Settings the sorter's thresholds were tuned with: 60 ms at 1x gain,
    /// interrupting on every cycle
    pub const fn sorter() -> Self {
        Self {
            integration_time: IntegrationTime::MS_60,
            gain: Gain::X1,
            persistence: Persistence::EveryCycle,
        }
    }

    /// Longest integration window, for dim scenes
    pub const fn long_exposure() -> Self {
        Self {
            integration_time: IntegrationTime::MS_614,
            gain: Gain::X1,
            persistence: Persistence::EveryCycle,
        }
    }
}

/// Port trait for RGBC colour sensors
///
/// Implementations own the bus. Every method is one short transaction
/// sequence with no retries; a failure is reported to the caller as is.
pub trait ColorSensorPort {
    /// Detect the sensor and start measuring with the given configuration
    ///
    /// Returns [`ColorSensorError::NotDetected`] when nothing answers on
    /// the bus or the device ID is not recognised.
    fn begin(
        &mut self,
        config: &ColorSensorConfig,
    ) -> impl Future<Output = Result<(), ColorSensorError>>;

    /// Read one 16-bit channel register
    fn read_channel(
        &mut self,
        channel: Channel,
    ) -> impl Future<Output = Result<u16, ColorSensorError>>;

    /// Program the interrupt persistence filter
    fn set_persistence(
        &mut self,
        persistence: Persistence,
    ) -> impl Future<Output = Result<(), ColorSensorError>>;

    /// Enable or disable the interrupt output
    fn set_interrupt_enabled(
        &mut self,
        enabled: bool,
    ) -> impl Future<Output = Result<(), ColorSensorError>>;

    /// Clear the pending interrupt so the line can fire again
    fn clear_interrupt(&mut self) -> impl Future<Output = Result<(), ColorSensorError>>;

    /// Check if the sensor has been started
    fn is_ready(&self) -> bool;
}
