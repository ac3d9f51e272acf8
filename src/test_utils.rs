//! Test doubles for the hardware seams
//!
//! Fakes for the `embedded-hal` bus, PWM, delay and pin traits, plus
//! in-memory implementations of the crate's own ports.

use crate::domain::{Channel, RawSample, Rgb};
use crate::ports::{
    ColorSensorConfig, ColorSensorError, ColorSensorPort, IndicatorError, IndicatorPort,
    Persistence,
};
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource, Operation};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};

/// TCS34725 register map behind a fake I2C bus
pub struct FakeI2c {
    pub address: u8,
    pub present: bool,
    pub registers: [u8; 0x20],
    /// (register, value) for every register write, in order
    pub writes: Vec<(u8, u8)>,
    pub interrupts_cleared: u32,
    pointer: u8,
    auto_increment: bool,
}

impl FakeI2c {
    pub fn tcs34725(device_id: u8) -> Self {
        let mut registers = [0u8; 0x20];
        registers[0x12] = device_id;
        Self {
            address: 0x29,
            present: true,
            registers,
            writes: Vec::new(),
            interrupts_cleared: 0,
            pointer: 0,
            auto_increment: false,
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::tcs34725(0x44)
        }
    }

    /// Store a 16-bit little-endian value at `register`
    pub fn set_word(&mut self, register: u8, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.registers[register as usize] = low;
        self.registers[register as usize + 1] = high;
    }

    fn handle_write(&mut self, bytes: &[u8]) {
        let Some((&command, data)) = bytes.split_first() else {
            return;
        };

        // Special function: clear channel interrupt
        if command == 0xE6 {
            self.interrupts_cleared += 1;
            return;
        }

        self.pointer = command & 0x1F;
        self.auto_increment = command & 0x60 == 0x20;

        for (offset, &value) in data.iter().enumerate() {
            let register = self.pointer + offset as u8;
            self.registers[register as usize & 0x1F] = value;
            self.writes.push((register, value));
        }
    }

    fn handle_read(&mut self, buffer: &mut [u8]) {
        for (offset, byte) in buffer.iter_mut().enumerate() {
            let register = if self.auto_increment {
                self.pointer as usize + offset
            } else {
                self.pointer as usize
            };
            *byte = self.registers[register & 0x1F];
        }
    }
}

impl embedded_hal::i2c::ErrorType for FakeI2c {
    type Error = ErrorKind;
}

impl embedded_hal::i2c::I2c for FakeI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if !self.present || address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(bytes) => self.handle_write(bytes),
                Operation::Read(buffer) => self.handle_read(buffer),
            }
        }
        Ok(())
    }
}

/// Delay that returns immediately and records each millisecond request
#[derive(Default)]
pub struct RecordingDelay {
    pub millis: Vec<u32>,
}

impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, _ns: u32) {}

    async fn delay_ms(&mut self, ms: u32) {
        self.millis.push(ms);
    }
}

/// PWM channel with a 10-bit range that records its duty cycle
pub struct RecordingPwm {
    pub duty: u16,
    pub fail: bool,
}

impl RecordingPwm {
    pub const MAX_DUTY: u16 = 1023;

    pub fn new() -> Self {
        Self {
            duty: 0,
            fail: false,
        }
    }
}

impl PwmErrorType for RecordingPwm {
    type Error = embedded_hal::pwm::ErrorKind;
}

impl SetDutyCycle for RecordingPwm {
    fn max_duty_cycle(&self) -> u16 {
        Self::MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail {
            return Err(embedded_hal::pwm::ErrorKind::Other);
        }
        self.duty = duty;
        Ok(())
    }
}

/// Interrupt pin whose falling edges arrive immediately
///
/// With `idle_after` set, the pin goes quiet after that many edges.
#[derive(Default)]
pub struct ImmediateEdges {
    pub edges: u32,
    pub idle_after: Option<u32>,
}

impl embedded_hal::digital::ErrorType for ImmediateEdges {
    type Error = core::convert::Infallible;
}

impl embedded_hal_async::digital::Wait for ImmediateEdges {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        if self.idle_after.is_some_and(|limit| self.edges >= limit) {
            core::future::pending::<()>().await;
        }
        self.edges += 1;
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// In-memory colour sensor
pub struct FakeColorSensor {
    pub present: bool,
    pub started: bool,
    pub sample: RawSample,
    pub reads: Vec<Channel>,
    pub persistence: Option<Persistence>,
    pub interrupt_enabled: bool,
    pub interrupts_cleared: u32,
    pub fail_reads: bool,
    pub fail_persistence: bool,
    pub fail_interrupt_enable: bool,
    pub fail_clear: bool,
}

impl FakeColorSensor {
    pub fn new(sample: RawSample) -> Self {
        Self {
            present: true,
            started: false,
            sample,
            reads: Vec::new(),
            persistence: None,
            interrupt_enabled: false,
            interrupts_cleared: 0,
            fail_reads: false,
            fail_persistence: false,
            fail_interrupt_enable: false,
            fail_clear: false,
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::new(RawSample::default())
        }
    }
}

impl ColorSensorPort for FakeColorSensor {
    async fn begin(&mut self, _config: &ColorSensorConfig) -> Result<(), ColorSensorError> {
        if !self.present {
            return Err(ColorSensorError::NotDetected);
        }
        self.started = true;
        Ok(())
    }

    async fn read_channel(&mut self, channel: Channel) -> Result<u16, ColorSensorError> {
        if self.fail_reads {
            return Err(ColorSensorError::I2cError);
        }
        self.reads.push(channel);
        Ok(match channel {
            Channel::Clear => self.sample.clear,
            Channel::Red => self.sample.red,
            Channel::Green => self.sample.green,
            Channel::Blue => self.sample.blue,
        })
    }

    async fn set_persistence(&mut self, persistence: Persistence) -> Result<(), ColorSensorError> {
        if self.fail_persistence {
            return Err(ColorSensorError::I2cError);
        }
        self.persistence = Some(persistence);
        Ok(())
    }

    async fn set_interrupt_enabled(&mut self, enabled: bool) -> Result<(), ColorSensorError> {
        if self.fail_interrupt_enable {
            return Err(ColorSensorError::I2cError);
        }
        self.interrupt_enabled = enabled;
        Ok(())
    }

    async fn clear_interrupt(&mut self) -> Result<(), ColorSensorError> {
        if self.fail_clear {
            return Err(ColorSensorError::I2cError);
        }
        self.interrupts_cleared += 1;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.started
    }
}

/// Indicator that keeps every colour it was asked to show
#[derive(Default)]
pub struct RecordingLed {
    pub shown: Vec<Rgb>,
    pub fail: bool,
}

impl IndicatorPort for RecordingLed {
    fn set_rgb(&mut self, color: Rgb) -> Result<(), IndicatorError> {
        if self.fail {
            return Err(IndicatorError::PwmFailed);
        }
        self.shown.push(color);
        Ok(())
    }
}
