//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (ESP-IDF logger → UART / USB-CDC in production).

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | tick={} | light={} window={} buzzer={} | faults={}",
                    t.tick,
                    on_off(t.state.light_on),
                    if t.state.window_open { "OPEN" } else { "CLOSED" },
                    on_off(t.state.buzzer_on),
                    t.consecutive_faults,
                );
            }
            AppEvent::Started(state) => {
                info!("START | state={:?}", state);
            }
            AppEvent::LightChanged { on } => {
                info!("LIGHT | {}", on_off(*on));
            }
            AppEvent::WindowChanged { open } => {
                info!("WINDOW | {}", if *open { "OPEN" } else { "CLOSED" });
            }
            AppEvent::BuzzerChanged { on } => {
                info!("BUZZER | {}", on_off(*on));
            }
            AppEvent::TransientFault(e) => {
                warn!("FAULT | transient: {}", e);
            }
            AppEvent::Fault(e) => {
                error!("FAULT | {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::TelemetryData;
    use crate::app::state::ControllerState;
    use crate::error::{Error, SensorError};

    #[test]
    fn on_off_labels() {
        assert_eq!(on_off(true), "ON");
        assert_eq!(on_off(false), "OFF");
    }

    #[test]
    fn renders_every_event_kind() {
        let mut sink = LogEventSink::default();
        let state = ControllerState::new();
        for event in [
            AppEvent::Started(state),
            AppEvent::LightChanged { on: true },
            AppEvent::WindowChanged { open: false },
            AppEvent::BuzzerChanged { on: false },
            AppEvent::TransientFault(SensorError::Timeout),
            AppEvent::Fault(Error::Sensor(SensorError::BusFault)),
            AppEvent::Telemetry(TelemetryData { tick: 60, state, consecutive_faults: 0 }),
        ] {
            sink.emit(&event);
        }
    }
}
