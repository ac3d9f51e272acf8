//! Colour sorter sensing demo for the RP2350
//!
//! Reads a TCS34725 over I2C whenever its interrupt line reports a finished
//! integration cycle, classifies the colour and shows it on an RGB LED.
//!
//! # Hardware
//!
//! - Raspberry Pi Pico 2 (RP2350)
//! - TCS34725 breakout on I2C0 (GPIO4=SDA, GPIO5=SCL), INT on GPIO6
//! - Common-cathode RGB LED on GPIO16 (red), GPIO17 (green), GPIO18 (blue)
//!
//! # Usage
//!
//! ```bash
//! cargo run --example rp2350_sorter --features rp2350 --release
//! ```
//!
//! # Architecture
//!
//! - **Interrupt Task**: awaits falling edges on INT and marks the gate ready
//! - **Main**: sets up the pipeline and polls for the current colour

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pwm::{Config as PwmConfig, Pwm, PwmOutput};
use embassy_rp::{bind_interrupts, peripherals};
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use rp_colour::adapters::{InterruptLine, PwmRgbLed, Tcs34725Adapter};
use rp_colour::app::{ColorSensor, IndicatorDriver, ReadinessGate};
use rp_colour::ports::ColorSensorConfig;

// ============================================================================
// Configuration
// ============================================================================

/// How often the main loop polls the readiness gate
const POLL_INTERVAL_MS: u64 = 10;

/// PWM counter top; the adapter scales 0-255 levels onto it
const PWM_TOP: u16 = 1023;

// ============================================================================
// Type Aliases
// ============================================================================

type I2cBus = I2c<'static, peripherals::I2C0, i2c::Async>;
type Led = PwmRgbLed<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;

// ============================================================================
// Shared State
// ============================================================================

/// Set by the interrupt task, cleared by each capture
static GATE: ReadinessGate = ReadinessGate::new();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<peripherals::I2C0>;
});

// ============================================================================
// Main Entry Point
// ============================================================================

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("=== Colour Sorter Sensor ===");

    let p = embassy_rp::init(Default::default());

    // LED first so the fault alarm can run if the sensor is missing
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    let (red, green) = Pwm::new_output_ab(p.PWM_SLICE0, p.PIN_16, p.PIN_17, pwm_config.clone()).split();
    let (blue, _) = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, pwm_config).split();
    let (Some(red), Some(green), Some(blue)) = (red, green, blue) else {
        defmt::panic!("PWM outputs unavailable");
    };
    let led: Led = PwmRgbLed::new(red, green, blue);
    let indicator = IndicatorDriver::new(led, Delay);

    // TCS interrupt output is active-low and open-drain
    let int_pin = Input::new(p.PIN_6, Pull::Up);
    spawner.spawn(interrupt_task(InterruptLine::new(int_pin, &GATE)).expect("interrupt task"));

    let i2c: I2cBus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let sensor = Tcs34725Adapter::new(i2c, Delay);

    let mut colour = match ColorSensor::setup(sensor, indicator, &GATE, ColorSensorConfig::sorter()).await {
        Ok(colour) => colour,
        Err(alarm) => {
            error!("No TCS34725 found ({}), flashing fault", alarm.cause());
            alarm.run().await
        }
    };

    info!("Sensor ready, polling");

    loop {
        // Polled every tick so a failed interrupt clear gets retried
        let fresh = colour.is_measurement_ready();
        match colour.current_color().await {
            Ok(category) if fresh => info!("Piece colour: {}", category.as_str()),
            Ok(_) => {}
            Err(e) => warn!("Colour read failed: {}", e),
        }
        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

// ============================================================================
// Interrupt Task
// ============================================================================

#[embassy_executor::task]
async fn interrupt_task(line: InterruptLine<'static, Input<'static>>) -> ! {
    line.watch().await
}
