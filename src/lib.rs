//! RP2350 Colour Sensor Library
//!
//! This library classifies objects on the sorter by colour using a TCS34725
//! RGBC sensor and shows the result on an RGB status LED, following a
//! hexagonal architecture.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - RawSample entity                                              │
//! │  - PhotometricConverter (lux, DN40 colour temperature)          │
//! │  - classify: ordered threshold rules -> ColorCategory           │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Application                                  │
//! │  - ReadinessGate: flag set by the interrupt line                │
//! │  - ColorSensor: capture -> convert -> classify -> indicate      │
//! │  - IndicatorDriver / FaultAlarm                                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - ColorSensorPort: RGBC sensor registers                       │
//! │  - IndicatorPort: three-channel brightness output               │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - Tcs34725Adapter: async I2C                                   │
//! │  - PwmRgbLed: three PWM channels                                │
//! │  - InterruptLine: falling edges -> ReadinessGate                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! static GATE: ReadinessGate = ReadinessGate::new();
//!
//! spawner.spawn(interrupt_task(InterruptLine::new(int_pin, &GATE)).expect("irq task"));
//!
//! let indicator = IndicatorDriver::new(PwmRgbLed::new(red, green, blue), Delay);
//! let sensor = Tcs34725Adapter::new(i2c, Delay);
//! let mut colour = match ColorSensor::setup(sensor, indicator, &GATE, ColorSensorConfig::sorter()).await {
//!     Ok(colour) => colour,
//!     Err(alarm) => alarm.run().await,
//! };
//!
//! loop {
//!     let category = colour.current_color().await?;
//!     // ...
//! }
//! ```
//!
//! # Features
//!
//! - `defmt`: log through `defmt` and derive `defmt::Format` on public types
//! - `rp2350`: embassy firmware stack for the demo in `demos/`

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

/// Domain layer - pure classification logic
pub mod domain;

/// Ports - traits defining hardware boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

/// Application - the sensing pipeline
pub mod app;

#[cfg(test)]
mod test_utils;

// Re-export key domain types
pub use domain::{
    classify, ColorCategory, DerivedMetrics, IntegrationTime, PhotometricConverter, RawSample,
    Rgb,
};

// Re-export key port traits
pub use ports::{ColorSensorConfig, ColorSensorError, ColorSensorPort, IndicatorPort};

// Re-export adapters
pub use adapters::{InterruptLine, PwmRgbLed, Tcs34725Adapter};

// Re-export the pipeline
pub use app::{ColorSensor, FaultAlarm, IndicatorDriver, PipelineError, ReadinessGate};
