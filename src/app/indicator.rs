//! Indicator driver and the sensor fault alarm

use embedded_hal_async::delay::DelayNs;

use crate::domain::{ColorCategory, RawSample, Rgb};
use crate::ports::{ColorSensorError, IndicatorError, IndicatorPort};

/// On and off time of the fault blink
pub const FAULT_BLINK_MS: u32 = 500;

/// Drives the status LED and remembers what it shows
///
/// Built without an LED ([`IndicatorDriver::disabled`]) every write is
/// skipped, but holds still delay the caller.
pub struct IndicatorDriver<L, D> {
    led: Option<L>,
    delay: D,
    state: Rgb,
}

impl<L: IndicatorPort, D: DelayNs> IndicatorDriver<L, D> {
    pub fn new(led: L, delay: D) -> Self {
        Self {
            led: Some(led),
            delay,
            state: Rgb::OFF,
        }
    }

    /// Driver for a build without an LED fitted
    pub fn disabled(delay: D) -> Self {
        Self {
            led: None,
            delay,
            state: Rgb::OFF,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.led.is_some()
    }

    /// Levels currently driving the LED
    pub fn state(&self) -> Rgb {
        self.state
    }

    pub fn led(&self) -> Option<&L> {
        self.led.as_ref()
    }

    /// Show `color`, then block the caller for `hold_ms`
    ///
    /// The hold runs even if the LED write fails.
    pub async fn set(&mut self, color: Rgb, hold_ms: u32) -> Result<(), IndicatorError> {
        let mut result = Ok(());
        if let Some(led) = self.led.as_mut() {
            result = led.set_rgb(color);
            if result.is_ok() {
                self.state = color;
            }
        }

        if hold_ms > 0 {
            self.delay.delay_ms(hold_ms).await;
        }
        result
    }

    /// Show the fixed colour for a category
    pub async fn show(&mut self, category: ColorCategory) -> Result<(), IndicatorError> {
        self.set(category.indicator_color(), 0).await
    }

    /// Show a sample's own colour, scaled against its clear channel
    pub async fn show_proportional(&mut self, sample: &RawSample) -> Result<(), IndicatorError> {
        self.set(Rgb::proportional(sample), 0).await
    }

    /// Release the LED and delay
    pub fn release(self) -> (Option<L>, D) {
        (self.led, self.delay)
    }
}

/// Terminal state entered when the sensor cannot be started
///
/// Nothing else can run without the sensor. [`FaultAlarm::run`] blinks the
/// LED red forever; [`FaultAlarm::blink`] performs a single cycle.
pub struct FaultAlarm<L, D> {
    indicator: IndicatorDriver<L, D>,
    cause: ColorSensorError,
}

impl<L: IndicatorPort, D: DelayNs> FaultAlarm<L, D> {
    pub fn new(indicator: IndicatorDriver<L, D>, cause: ColorSensorError) -> Self {
        Self { indicator, cause }
    }

    /// Why setup failed
    pub fn cause(&self) -> ColorSensorError {
        self.cause
    }

    pub fn indicator(&self) -> &IndicatorDriver<L, D> {
        &self.indicator
    }

    /// One red-on, red-off cycle
    pub async fn blink(&mut self) -> Result<(), IndicatorError> {
        let on = self.indicator.set(Rgb::RED, FAULT_BLINK_MS).await;
        let off = self.indicator.set(Rgb::OFF, FAULT_BLINK_MS).await;
        on.and(off)
    }

    /// Blink forever
    pub async fn run(mut self) -> ! {
        loop {
            let _ = self.blink().await;
        }
    }

    pub fn into_indicator(self) -> IndicatorDriver<L, D> {
        self.indicator
    }
}
