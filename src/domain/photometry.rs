//! Photometric conversion domain service
//!
//! Derives illuminance and correlated colour temperature from a raw RGBC
//! sample. Both conversions are pure functions of the channel counts and the
//! (fixed) integration time the sensor was configured with.

use crate::domain::RawSample;

/// Red channel weight in the illuminance sum
const LUX_RED_WEIGHT: f32 = -0.32466;
/// Green channel weight in the illuminance sum
const LUX_GREEN_WEIGHT: f32 = 1.57837;
/// Blue channel weight in the illuminance sum
const LUX_BLUE_WEIGHT: f32 = -0.73191;

/// DN40 colour temperature coefficient
const CCT_COEFFICIENT: u32 = 3810;
/// DN40 colour temperature offset
const CCT_OFFSET: u32 = 1391;

/// Counts accumulated per 2.4 ms integration cycle
const COUNTS_PER_CYCLE: u32 = 1024;
/// Full-scale count of a data register
const DIGITAL_SATURATION: u32 = 65535;
/// Beyond this many cycles the register saturates before the ADC does
const ANALOG_SATURATION_CYCLES: u32 = 63;

/// Sensor integration time, stored as the ATIME register value
///
/// Each step below 256 adds one 2.4 ms integration cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntegrationTime(pub u8);

impl IntegrationTime {
    pub const MS_2_4: Self = Self(0xFF);
    pub const MS_24: Self = Self(0xF6);
    pub const MS_50: Self = Self(0xEB);
    pub const MS_60: Self = Self(0xE7);
    pub const MS_101: Self = Self(0xD6);
    pub const MS_120: Self = Self(0xCE);
    pub const MS_154: Self = Self(0xC0);
    pub const MS_180: Self = Self(0xB5);
    pub const MS_199: Self = Self(0xAD);
    pub const MS_240: Self = Self(0x9C);
    pub const MS_300: Self = Self(0x83);
    pub const MS_600: Self = Self(0x06);
    pub const MS_614: Self = Self(0x00);

    /// Raw ATIME register value
    pub const fn register(&self) -> u8 {
        self.0
    }

    /// Number of 2.4 ms integration cycles (1..=256)
    pub const fn cycles(&self) -> u16 {
        256 - self.0 as u16
    }

    /// Integration window rounded up to whole milliseconds
    pub const fn as_millis(&self) -> u32 {
        (self.cycles() as u32 * 12).div_ceil(5)
    }
}

impl Default for IntegrationTime {
    fn default() -> Self {
        Self::MS_60
    }
}

/// Quantities derived from one raw sample
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DerivedMetrics {
    /// Correlated colour temperature in Kelvin (0 when not computable)
    pub color_temperature_k: u16,
    /// Estimated illuminance in lux
    pub illuminance_lux: u16,
}

impl DerivedMetrics {
    pub const fn new(color_temperature_k: u16, illuminance_lux: u16) -> Self {
        Self {
            color_temperature_k,
            illuminance_lux,
        }
    }
}

/// Converts raw samples to [`DerivedMetrics`]
///
/// Holds the integration time the sensor runs with, which the colour
/// temperature calculation needs to locate the saturation level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhotometricConverter {
    integration_time: IntegrationTime,
}

impl PhotometricConverter {
    pub const fn new(integration_time: IntegrationTime) -> Self {
        Self { integration_time }
    }

    pub const fn integration_time(&self) -> IntegrationTime {
        self.integration_time
    }

    /// Derive colour temperature and illuminance from a sample
    pub fn derive_metrics(&self, sample: &RawSample) -> DerivedMetrics {
        DerivedMetrics {
            color_temperature_k: color_temperature_dn40(sample, self.integration_time),
            illuminance_lux: illuminance(sample),
        }
    }
}

/// Estimated illuminance in lux
///
/// Weighted sum of the red, green and blue channels. The result is not
/// clipped: it is truncated toward zero and wrapped into 16 bits, so a
/// negative sum (strongly red targets) lands near the top of the range.
pub fn illuminance(sample: &RawSample) -> u16 {
    let lux = LUX_RED_WEIGHT * sample.red as f32
        + LUX_GREEN_WEIGHT * sample.green as f32
        + LUX_BLUE_WEIGHT * sample.blue as f32;

    (lux as i32) as u16
}

/// Correlated colour temperature in Kelvin using the AMS DN40 method
///
/// The clear channel is the saturation reference and is used to infer the
/// IR content, which is removed from red and blue before taking their ratio.
/// Returns 0 for a dark sample, a saturated sample, or when no red remains
/// after IR removal.
pub fn color_temperature_dn40(sample: &RawSample, integration_time: IntegrationTime) -> u16 {
    let RawSample {
        red,
        green,
        blue,
        clear,
    } = *sample;

    if clear == 0 {
        return 0;
    }

    let cycles = integration_time.cycles() as u32;
    let saturation = if cycles > ANALOG_SATURATION_CYCLES {
        DIGITAL_SATURATION
    } else {
        // Ripple can saturate below full scale on short windows; derate to 75%
        let analog = COUNTS_PER_CYCLE * cycles;
        analog - analog / 4
    };

    if clear as u32 >= saturation {
        return 0;
    }

    let sum = red as u32 + green as u32 + blue as u32;
    let ir = if sum > clear as u32 {
        ((sum - clear as u32) / 2) as u16
    } else {
        0
    };

    // 16-bit arithmetic, wrapping as the sensor vendor's reference does
    let red_corrected = red.wrapping_sub(ir);
    let blue_corrected = blue.wrapping_sub(ir);

    if red_corrected == 0 {
        return 0;
    }

    let cct = CCT_COEFFICIENT * blue_corrected as u32 / red_corrected as u32 + CCT_OFFSET;
    cct as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integration_time_windows() {
        assert_eq!(IntegrationTime::MS_2_4.cycles(), 1);
        assert_eq!(IntegrationTime::MS_60.cycles(), 25);
        assert_eq!(IntegrationTime::MS_60.as_millis(), 60);
        assert_eq!(IntegrationTime::MS_614.cycles(), 256);
        assert_eq!(IntegrationTime::MS_614.as_millis(), 615);
    }

    #[test]
    fn test_illuminance_neutral_grey() {
        let sample = RawSample::new(1000, 1000, 1000, 3000);
        // (-0.32466 + 1.57837 - 0.73191) * 1000 = 521.8
        assert_eq!(illuminance(&sample), 521);
    }

    #[test]
    fn test_illuminance_wraps_for_red_targets() {
        let sample = RawSample::new(1000, 100, 100, 1200);
        // -240.01 truncates to -240, which wraps to 65296
        assert_eq!(illuminance(&sample), 65296);
        assert!(illuminance(&sample) > 50_000);
    }

    #[test]
    fn test_illuminance_zero_sample() {
        assert_eq!(illuminance(&RawSample::default()), 0);
    }

    #[test]
    fn test_cct_dark_sample_is_zero() {
        let cct = color_temperature_dn40(&RawSample::default(), IntegrationTime::MS_60);
        assert_eq!(cct, 0);
    }

    #[test]
    fn test_cct_saturated_clear_is_zero() {
        // 25 cycles -> 25600 analog counts, derated to 19200
        let sample = RawSample::new(5000, 5000, 5000, 19_200);
        assert_eq!(color_temperature_dn40(&sample, IntegrationTime::MS_60), 0);

        let sample = RawSample::new(5000, 5000, 5000, 19_199);
        assert_ne!(color_temperature_dn40(&sample, IntegrationTime::MS_60), 0);
    }

    #[test]
    fn test_cct_digital_saturation_on_long_windows() {
        let sample = RawSample::new(20_000, 20_000, 20_000, 65_535);
        assert_eq!(color_temperature_dn40(&sample, IntegrationTime::MS_614), 0);

        // Below full scale is valid on a long window even above the analog limit
        let sample = RawSample::new(20_000, 20_000, 20_000, 60_000);
        assert_ne!(color_temperature_dn40(&sample, IntegrationTime::MS_614), 0);
    }

    #[test]
    fn test_cct_without_ir_excess() {
        // r + g + b <= c, so no IR correction: 3810 * 600 / 300 + 1391
        let sample = RawSample::new(300, 400, 600, 1500);
        assert_eq!(color_temperature_dn40(&sample, IntegrationTime::MS_60), 9011);
    }

    #[test]
    fn test_cct_removes_inferred_ir() {
        // ir = (400 + 300 + 200 - 700) / 2 = 100 -> r' = 300, b' = 100
        let sample = RawSample::new(400, 300, 200, 700);
        // 3810 * 100 / 300 + 1391
        assert_eq!(color_temperature_dn40(&sample, IntegrationTime::MS_60), 2661);
    }

    #[test]
    fn test_cct_no_red_after_ir_removal() {
        // ir = (50 + 150 + 0 - 100) / 2 = 50, leaving no red
        let sample = RawSample::new(50, 150, 0, 100);
        assert_eq!(color_temperature_dn40(&sample, IntegrationTime::MS_60), 0);
    }

    #[test]
    fn test_converter_uses_configured_window() {
        let converter = PhotometricConverter::new(IntegrationTime::MS_60);
        let sample = RawSample::new(300, 400, 600, 1500);
        let metrics = converter.derive_metrics(&sample);
        assert_eq!(metrics.color_temperature_k, 9011);
        assert_eq!(metrics.illuminance_lux, illuminance(&sample));
    }
}
