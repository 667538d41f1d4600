//! Application service, the hexagonal core.
//!
//! [`HomeController`] owns the [`ControllerState`] and configuration and
//! runs one poll cycle per [`tick`](HomeController::tick). All I/O flows
//! through port traits injected at call sites, making the whole service
//! testable with [`SimHal`](crate::adapters::sim::SimHal).
//!
//! ```text
//!  HalPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!              │        HomeController        │
//!  HalPort ◀── │  air quality · light · window │
//!              └──────────────────────────────┘
//! ```

use embedded_hal::digital::PinState;
use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::{self, WindowAction};
use crate::error::{Error, Result};
use crate::pins::PinRole;

use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, HalPort};
use super::state::ControllerState;

// ───────────────────────────────────────────────────────────────
// HomeController
// ───────────────────────────────────────────────────────────────

/// The controller orchestrates the decision functions.
pub struct HomeController {
    config: SystemConfig,
    state: ControllerState,
    tick_count: u64,
    consecutive_faults: u8,
}

impl HomeController {
    /// Construct the controller. Call [`start`](Self::start) before polling.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            state: ControllerState::new(),
            tick_count: 0,
            consecutive_faults: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every actuator to its "off" position so the hardware matches
    /// the all-off state, then let the sensors settle.
    pub fn start(&mut self, hal: &mut impl HalPort, sink: &mut impl EventSink) -> Result<()> {
        hal.digital_write(PinRole::Light, PinState::Low)?;
        hal.digital_write(PinRole::Buzzer, PinState::Low)?;
        control::close_window(&mut self.state, hal, &self.config)?;

        hal.delay_ms(self.config.startup_settle_ms);
        sink.emit(&AppEvent::Started(self.state));
        info!("HomeController started");
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one poll cycle: air quality → light → window.
    ///
    /// A fault in one rule does not stop the others; the first fault is
    /// returned once all three have run.
    pub fn tick(&mut self, hal: &mut impl HalPort, sink: &mut impl EventSink) -> Result<()> {
        self.tick_count += 1;
        let before = self.state;
        let mut first_fault: Option<Error> = None;

        if let Err(e) = control::monitor_air_quality(&mut self.state, hal) {
            warn!("air quality: {e}");
            first_fault.get_or_insert(e);
        }

        if let Err(e) = control::manage_light(&mut self.state, hal, &self.config) {
            warn!("light: {e}");
            first_fault.get_or_insert(e);
        }

        match control::manage_window(&mut self.state, hal, &self.config) {
            Ok(WindowAction::Skip(e)) => sink.emit(&AppEvent::TransientFault(e)),
            Ok(_) => {}
            Err(e) => {
                first_fault.get_or_insert(e);
            }
        }

        self.emit_changes(before, sink);

        if self.tick_count % u64::from(self.config.telemetry_interval_ticks) == 0 {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }

        match first_fault {
            Some(e) => {
                self.consecutive_faults = self.consecutive_faults.saturating_add(1);
                sink.emit(&AppEvent::Fault(e));
                Err(e)
            }
            None => {
                self.consecutive_faults = 0;
                Ok(())
            }
        }
    }

    fn emit_changes(&self, before: ControllerState, sink: &mut impl EventSink) {
        if before.buzzer_on != self.state.buzzer_on {
            sink.emit(&AppEvent::BuzzerChanged { on: self.state.buzzer_on });
        }
        if before.light_on != self.state.light_on {
            sink.emit(&AppEvent::LightChanged { on: self.state.light_on });
        }
        if before.window_open != self.state.window_open {
            sink.emit(&AppEvent::WindowChanged { open: self.state.window_open });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn consecutive_faults(&self) -> u8 {
        self.consecutive_faults
    }

    /// True once the poll loop should stop retrying and give up.
    pub fn fault_budget_exhausted(&self) -> bool {
        self.consecutive_faults >= self.config.max_consecutive_faults
    }

    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            tick: self.tick_count,
            state: self.state,
            consecutive_faults: self.consecutive_faults,
        }
    }
}
