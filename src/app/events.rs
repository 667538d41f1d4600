//! Outbound application events.
//!
//! The [`HomeController`](super::service::HomeController) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them.

use crate::error::{Error, SensorError};

use super::state::ControllerState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller finished its start-up sequence.
    Started(ControllerState),

    /// The light was switched.
    LightChanged { on: bool },

    /// The window servo moved to the other end stop.
    WindowChanged { open: bool },

    /// The gas buzzer was switched.
    BuzzerChanged { on: bool },

    /// A temperature read failed transiently; window management skipped a cycle.
    TransientFault(SensorError),

    /// A poll cycle ended with an unrecoverable fault.
    Fault(Error),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub tick: u64,
    pub state: ControllerState,
    pub consecutive_faults: u8,
}
