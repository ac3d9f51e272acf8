//! Colour sensing pipeline
//!
//! [`ColorSensor`] owns the sensor and the indicator and borrows the
//! readiness gate shared with the interrupt line. Each ready measurement
//! flows capture -> metrics -> classification -> indicator, and the result
//! is cached until the next one.
//!
//! The sensor holds its interrupt line low until the interrupt is cleared,
//! and no new edge can arrive while it does. A clear that fails is therefore
//! remembered and retried on the next [`ColorSensor::current_color`] call.

use embedded_hal_async::delay::DelayNs;

use crate::app::{FaultAlarm, IndicatorDriver, ReadinessGate};
use crate::domain::{
    classify, Channel, ColorCategory, DerivedMetrics, PhotometricConverter, RawSample,
};
use crate::ports::{
    ColorSensorConfig, ColorSensorError, ColorSensorPort, IndicatorError, IndicatorPort,
};

/// Error type for pipeline operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineError {
    /// A capture was requested with no measurement pending
    NotReady,
    /// Sensor bus failure
    Sensor(ColorSensorError),
    /// Indicator output failure
    Indicator(IndicatorError),
}

impl From<ColorSensorError> for PipelineError {
    fn from(err: ColorSensorError) -> Self {
        PipelineError::Sensor(err)
    }
}

impl From<IndicatorError> for PipelineError {
    fn from(err: IndicatorError) -> Self {
        PipelineError::Indicator(err)
    }
}

/// Context handle for the colour sensing pipeline
pub struct ColorSensor<'g, S, L, D> {
    sensor: S,
    indicator: IndicatorDriver<L, D>,
    gate: &'g ReadinessGate,
    converter: PhotometricConverter,
    current: ColorCategory,
    last_sample: Option<RawSample>,
    pending_clear: bool,
}

impl<'g, S, L, D> ColorSensor<'g, S, L, D>
where
    S: ColorSensorPort,
    L: IndicatorPort,
    D: DelayNs,
{
    /// Start the sensor and arm its interrupt
    ///
    /// The interrupt line feeding `gate` should already be watched. On any
    /// failure the sensor is dropped and a [`FaultAlarm`] holding the
    /// indicator is returned; the caller is expected to run it.
    pub async fn setup(
        mut sensor: S,
        indicator: IndicatorDriver<L, D>,
        gate: &'g ReadinessGate,
        config: ColorSensorConfig,
    ) -> Result<Self, FaultAlarm<L, D>> {
        if let Err(cause) = Self::start(&mut sensor, &config).await {
            error!("Colour sensor setup failed: {}", cause);
            return Err(FaultAlarm::new(indicator, cause));
        }

        info!(
            "Colour sensor started: {} ms integration, interrupt every cycle",
            config.integration_time.as_millis()
        );

        Ok(Self {
            sensor,
            indicator,
            gate,
            converter: PhotometricConverter::new(config.integration_time),
            current: ColorCategory::Unknown,
            last_sample: None,
            pending_clear: false,
        })
    }

    async fn start(sensor: &mut S, config: &ColorSensorConfig) -> Result<(), ColorSensorError> {
        sensor.begin(config).await?;
        sensor.set_persistence(config.persistence).await?;
        sensor.set_interrupt_enabled(true).await?;
        // A latched interrupt from before a reset would hold the line low
        sensor.clear_interrupt().await
    }

    /// Check for an unread measurement
    pub fn is_measurement_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// Check for a device interrupt left latched by a failed clear
    pub fn is_clear_pending(&self) -> bool {
        self.pending_clear
    }

    /// Read the four channels of the pending measurement
    ///
    /// Consumes the ready flag and clears the sensor interrupt. If only the
    /// clear fails, the sample is still kept as [`Self::last_sample`] and the
    /// clear is left pending.
    pub async fn capture_raw_sample(&mut self) -> Result<RawSample, PipelineError> {
        let sample = self.read_sample().await?;
        self.clear_device_interrupt().await?;
        Ok(sample)
    }

    async fn read_sample(&mut self) -> Result<RawSample, PipelineError> {
        if !self.gate.is_ready() {
            return Err(PipelineError::NotReady);
        }

        let mut counts = [0u16; 4];
        for (count, channel) in counts.iter_mut().zip(Channel::CAPTURE_ORDER) {
            *count = self.sensor.read_channel(channel).await?;
        }
        let [clear, red, green, blue] = counts;
        let sample = RawSample::new(red, green, blue, clear);

        // Flag first: an edge after the device clear must stay visible
        self.gate.consume();
        self.last_sample = Some(sample);
        Ok(sample)
    }

    async fn clear_device_interrupt(&mut self) -> Result<(), ColorSensorError> {
        self.pending_clear = true;
        self.sensor.clear_interrupt().await?;
        self.pending_clear = false;
        Ok(())
    }

    /// Current colour, classifying a new measurement if one is ready
    ///
    /// Without a pending measurement this returns the cached category
    /// without touching the bus, unless an earlier interrupt clear failed;
    /// that clear is retried first. Call it on every poll, not only when
    /// [`Self::is_measurement_ready`] says so.
    pub async fn current_color(&mut self) -> Result<ColorCategory, PipelineError> {
        if self.pending_clear {
            self.clear_device_interrupt().await?;
        }
        if !self.gate.is_ready() {
            return Ok(self.current);
        }

        let sample = self.read_sample().await?;
        let cleared = self.clear_device_interrupt().await;
        if let Err(e) = cleared {
            warn!("Interrupt clear failed, retrying on next poll: {}", e);
        }

        let metrics = self.converter.derive_metrics(&sample);
        let category = classify(&sample, &metrics);
        self.current = category;

        debug!(
            "Color Temp: {} K - Lux: {} - R: {} G: {} B: {} C: {}",
            metrics.color_temperature_k,
            metrics.illuminance_lux,
            sample.red,
            sample.green,
            sample.blue,
            sample.clear
        );
        info!("Colour: {}", category.as_str());

        let shown = self.indicator.show(category).await;
        cleared?;
        shown?;
        Ok(category)
    }

    /// Last classified category, without checking for new data
    pub fn cached_color(&self) -> ColorCategory {
        self.current
    }

    /// Last captured sample
    pub fn last_sample(&self) -> Option<RawSample> {
        self.last_sample
    }

    /// Metrics for the last captured sample
    pub fn last_metrics(&self) -> Option<DerivedMetrics> {
        self.last_sample
            .map(|sample| self.converter.derive_metrics(&sample))
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn indicator(&self) -> &IndicatorDriver<L, D> {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut IndicatorDriver<L, D> {
        &mut self.indicator
    }

    /// Release the sensor and indicator
    pub fn release(self) -> (S, IndicatorDriver<L, D>) {
        (self.sensor, self.indicator)
    }
}
