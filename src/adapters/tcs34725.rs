//! TCS34725 colour sensor adapter
//!
//! This adapter implements the ColorSensorPort trait using the tcs3472
//! driver for the AMS TCS3472x family of RGBC sensors.

use embedded_hal::i2c::I2c;
use embedded_hal_async::delay::DelayNs;
use tcs3472::{RgbCGain, RgbCInterruptPersistence, Tcs3472};

use crate::domain::Channel;
use crate::ports::color_sensor::{
    ColorSensorConfig, ColorSensorError, ColorSensorPort, Gain, Persistence,
};

/// IDs reported by the TCS34721/5 (0x44), TCS34723/7 (0x4D) and TCS34725 clones (0x10)
const KNOWN_IDS: [u8; 3] = [0x44, 0x4D, 0x10];

/// Oscillator warm-up after power on
const POWER_ON_DELAY_MS: u32 = 3;

/// TCS34725 adapter implementing ColorSensorPort
///
/// Wraps the blocking tcs3472 driver. Each port call is a couple of short
/// register transfers, so they run inline in the async method; only the
/// power-on waits go through the async delay. Reads never wait for an
/// integration cycle; the interrupt line says when data is fresh.
pub struct Tcs34725Adapter<I, D> {
    sensor: Tcs3472<I>,
    delay: D,
    ready: bool,
}

impl<I: I2c, D: DelayNs> Tcs34725Adapter<I, D> {
    /// Create a new TCS34725 adapter
    ///
    /// The sensor is not started until `begin()` is called.
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            sensor: Tcs3472::new(i2c),
            delay,
            ready: false,
        }
    }

    /// Release the underlying I2C bus and delay
    pub fn release(self) -> (I, D) {
        (self.sensor.destroy(), self.delay)
    }

    /// Power on, then enable the RGBC engine once the oscillator is up
    async fn enable(&mut self, config: &ColorSensorConfig) -> Result<(), ColorSensorError> {
        self.sensor.enable().map_err(driver_error)?;
        self.delay.delay_ms(POWER_ON_DELAY_MS).await;
        self.sensor.enable_rgbc().map_err(driver_error)?;
        // First result is valid after one full integration window
        self.delay
            .delay_ms(config.integration_time.as_millis() + 1)
            .await;
        Ok(())
    }
}

fn driver_error<E>(err: tcs3472::Error<E>) -> ColorSensorError {
    match err {
        tcs3472::Error::I2C(_) => ColorSensorError::I2cError,
        tcs3472::Error::InvalidInputData => ColorSensorError::InvalidConfig,
    }
}

const fn driver_gain(gain: Gain) -> RgbCGain {
    match gain {
        Gain::X1 => RgbCGain::_1x,
        Gain::X4 => RgbCGain::_4x,
        Gain::X16 => RgbCGain::_16x,
        Gain::X60 => RgbCGain::_60x,
    }
}

const fn driver_persistence(persistence: Persistence) -> RgbCInterruptPersistence {
    match persistence {
        Persistence::EveryCycle => RgbCInterruptPersistence::Every,
        Persistence::OneOutOfRange => RgbCInterruptPersistence::_1,
        Persistence::TwoOutOfRange => RgbCInterruptPersistence::_2,
        Persistence::ThreeOutOfRange => RgbCInterruptPersistence::_3,
        Persistence::FiveOutOfRange => RgbCInterruptPersistence::_5,
        Persistence::TenOutOfRange => RgbCInterruptPersistence::_10,
    }
}

impl<I: I2c, D: DelayNs> ColorSensorPort for Tcs34725Adapter<I, D> {
    async fn begin(&mut self, config: &ColorSensorConfig) -> Result<(), ColorSensorError> {
        let id = self
            .sensor
            .read_device_id()
            .map_err(|_| ColorSensorError::NotDetected)?;

        if !KNOWN_IDS.contains(&id) {
            warn!("TCS34725: unexpected device ID {=u8:#x}", id);
            return Err(ColorSensorError::NotDetected);
        }

        self.sensor
            .set_integration_cycles(config.integration_time.cycles())
            .map_err(driver_error)?;
        self.sensor
            .set_rgbc_gain(driver_gain(config.gain))
            .map_err(driver_error)?;
        self.enable(config).await?;

        self.ready = true;
        Ok(())
    }

    async fn read_channel(&mut self, channel: Channel) -> Result<u16, ColorSensorError> {
        if !self.ready {
            return Err(ColorSensorError::NotInitialized);
        }
        let count = match channel {
            Channel::Clear => self.sensor.read_clear_channel(),
            Channel::Red => self.sensor.read_red_channel(),
            Channel::Green => self.sensor.read_green_channel(),
            Channel::Blue => self.sensor.read_blue_channel(),
        };
        count.map_err(driver_error)
    }

    async fn set_persistence(&mut self, persistence: Persistence) -> Result<(), ColorSensorError> {
        self.sensor
            .set_rgbc_interrupt_persistence(driver_persistence(persistence))
            .map_err(driver_error)
    }

    async fn set_interrupt_enabled(&mut self, enabled: bool) -> Result<(), ColorSensorError> {
        let result = if enabled {
            self.sensor.enable_rgbc_interrupts()
        } else {
            self.sensor.disable_rgbc_interrupts()
        };
        result.map_err(driver_error)
    }

    async fn clear_interrupt(&mut self) -> Result<(), ColorSensorError> {
        self.sensor.clear_interrupt().map_err(driver_error)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
