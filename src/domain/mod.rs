//! Domain layer - pure logic independent of hardware
//!
//! This module contains the sample entity, the photometric conversions and
//! the colour classifier. Nothing here performs I/O.

pub mod classifier;
pub mod color;
pub mod photometry;
pub mod sample;

pub use classifier::classify;
pub use color::{ColorCategory, Rgb};
pub use photometry::{DerivedMetrics, IntegrationTime, PhotometricConverter};
pub use sample::{Channel, RawSample};
