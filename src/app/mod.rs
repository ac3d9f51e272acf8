//! Application layer - the colour sensing pipeline
//!
//! Ties the domain to the ports: the readiness gate shared with the
//! interrupt line, the indicator driver with its fault alarm, and the
//! [`ColorSensor`] handle the sorter polls.

pub mod color_sensor;
pub mod indicator;
pub mod readiness;

pub use color_sensor::{ColorSensor, PipelineError};
pub use indicator::{FaultAlarm, IndicatorDriver, FAULT_BLINK_MS};
pub use readiness::ReadinessGate;
