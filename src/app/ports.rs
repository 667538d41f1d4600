//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ HomeController (domain)
//! ```
//!
//! Driven adapters (the board HAL, the simulator, event sinks) implement
//! these traits. The decision functions and the
//! [`HomeController`](super::service::HomeController) consume them via
//! generics, so the domain core never touches hardware directly.

use embedded_hal::digital::PinState;

use crate::error::{ActuatorError, SensorError};
use crate::pins::{PinRole, TemperatureProbe};

// ───────────────────────────────────────────────────────────────
// HAL port (driven adapter: domain ↔ hardware)
// ───────────────────────────────────────────────────────────────

/// Narrow hardware abstraction consumed by the decision functions.
///
/// Two implementations exist: [`BoardHal`](crate::adapters::hardware::BoardHal)
/// for the real board and [`SimHal`](crate::adapters::sim::SimHal) for host
/// runs and tests. The choice is made once at start-up by whoever
/// constructs the controller.
pub trait HalPort {
    /// Sample a digital input.
    fn digital_read(&mut self, pin: PinRole) -> Result<PinState, SensorError>;

    /// Drive a digital output.
    fn digital_write(&mut self, pin: PinRole, level: PinState) -> Result<(), ActuatorError>;

    /// Raw analog sample (ADC counts).
    fn analog_read(&mut self, pin: PinRole) -> Result<u16, SensorError>;

    /// Set a PWM output duty cycle in percent (0.0 – 100.0).
    fn pwm_set_duty_cycle(&mut self, pin: PinRole, percent: f32) -> Result<(), ActuatorError>;

    /// Read a temperature probe in °C. May block for the sensor's
    /// single-wire transaction. Timing faults come back as
    /// [`SensorError::Timeout`] / [`SensorError::ChecksumMismatch`].
    fn read_temperature(&mut self, probe: TemperatureProbe) -> Result<f32, SensorError>;

    /// Release both temperature sensor drivers after a fatal fault.
    fn release_temperature_sensors(&mut self);

    /// Re-arm both temperature sensor drivers after a release.
    fn restart_temperature_sensors(&mut self);

    /// Block the calling task.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
