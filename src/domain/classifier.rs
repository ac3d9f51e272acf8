//! Colour classification domain service
//!
//! Maps a raw sample and its derived metrics to one [`ColorCategory`] with an
//! ordered list of threshold rules. The first rule that matches wins; each
//! later rule relies on the earlier ones having excluded their cases.
//!
//! The thresholds come from testing the sorter's sensor with the real pieces
//! under the 60 ms / 1x configuration.

use crate::domain::{ColorCategory, DerivedMetrics, RawSample};

/// Illuminance above this is red (red targets wrap the lux sum high)
pub const RED_MIN_LUX: u16 = 50_000;
/// Colour temperature above this is blue
pub const BLUE_MIN_CCT_K: u16 = 8_000;
/// Green counts below this mean no object or a black one
pub const BLACK_MAX_GREEN: u16 = 200;
/// Colour temperature above this (and not blue) is green
pub const GREEN_MIN_CCT_K: u16 = 2_900;

/// Classify a sample
///
/// Pure and total: every input maps to one of the five classified
/// categories, never [`ColorCategory::Unknown`].
pub fn classify(sample: &RawSample, metrics: &DerivedMetrics) -> ColorCategory {
    if metrics.illuminance_lux > RED_MIN_LUX {
        ColorCategory::Red
    } else if metrics.color_temperature_k > BLUE_MIN_CCT_K {
        ColorCategory::Blue
    } else if sample.green < BLACK_MAX_GREEN {
        // Colour temperature is unreliable this dark, so it is checked first
        ColorCategory::Black
    } else if metrics.color_temperature_k > GREEN_MIN_CCT_K {
        ColorCategory::Green
    } else {
        ColorCategory::Yellow
    }
}
