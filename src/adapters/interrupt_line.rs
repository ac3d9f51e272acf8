//! Sensor interrupt line adapter
//!
//! Turns falling edges on the sensor's active-low, open-drain interrupt
//! output into readiness signals. On embassy this runs as its own task
//! awaiting the pin, standing in for an interrupt service routine.

use core::convert::Infallible;

use embedded_hal_async::digital::Wait;

use crate::app::ReadinessGate;

/// Watches the interrupt pin and marks the gate ready on every falling edge
///
/// The pin must be configured with a pull-up. The only side effect of an
/// edge is the gate write: no bus access, no logging.
pub struct InterruptLine<'g, P> {
    pin: P,
    gate: &'g ReadinessGate,
}

impl<'g, P: Wait> InterruptLine<'g, P> {
    pub fn new(pin: P, gate: &'g ReadinessGate) -> Self {
        Self { pin, gate }
    }

    /// Wait for one falling edge and signal the gate
    pub async fn next_edge(&mut self) -> Result<(), P::Error> {
        self.pin.wait_for_falling_edge().await?;
        self.gate.signal();
        Ok(())
    }
}

impl<'g, P: Wait<Error = Infallible>> InterruptLine<'g, P> {
    /// Signal the gate on every edge, forever
    ///
    /// Only for pins that cannot fail, so the loop always parks on the
    /// next edge.
    pub async fn watch(mut self) -> ! {
        loop {
            match self.next_edge().await {
                Ok(()) => {}
                Err(never) => match never {},
            }
        }
    }
}
