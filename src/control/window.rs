//! Window management: a two-state machine (Closed / Open) driven by an
//! indoor and an outdoor temperature probe.
//!
//! Inside the valid band (both readings in `[18, 30]` °C by default):
//!
//! | Condition                     | Action |
//! |-------------------------------|--------|
//! | `indoor < outdoor + diff`     | Open   |
//! | `indoor > outdoor + diff`     | Close  |
//! | `indoor == outdoor + diff`    | Hold   |
//!
//! Outside the band the window is forced closed if it is open; a closed
//! window stays put without a servo command.
//!
//! ## Fault handling
//!
//! A transient probe fault (timeout, bad checksum) is logged, followed by
//! a fixed pause, and the cycle is skipped with state untouched. Any other
//! fault releases both temperature drivers and is returned to the caller.

use log::{error, info, warn};

use crate::app::ports::HalPort;
use crate::app::state::ControllerState;
use crate::config::SystemConfig;
use crate::drivers::servo::angle_to_duty;
use crate::error::{Error, FaultKind, Result, SensorError};
use crate::pins::{PinRole, TemperatureProbe};

/// Outcome of one window-management cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    /// Servo driven to the open position.
    Open,
    /// Servo driven to the closed position.
    Close,
    /// Out-of-band readings closed an open window.
    ForceClose,
    /// Nothing to do; no servo command issued.
    Hold,
    /// Transient probe fault; cycle skipped.
    Skip(SensorError),
}

/// Pure window rule. `window_open` is the current state.
pub fn decide_window(
    indoor_c: f32,
    outdoor_c: f32,
    window_open: bool,
    config: &SystemConfig,
) -> WindowAction {
    if config.in_band(indoor_c) && config.in_band(outdoor_c) {
        let pivot = outdoor_c + config.temp_differential_c;
        if indoor_c < pivot {
            WindowAction::Open
        } else if indoor_c > pivot {
            WindowAction::Close
        } else {
            WindowAction::Hold
        }
    } else if window_open {
        WindowAction::ForceClose
    } else {
        WindowAction::Hold
    }
}

/// Drive the servo to the open end stop and mark the window open.
pub fn open_window(
    state: &mut ControllerState,
    hal: &mut impl HalPort,
    config: &SystemConfig,
) -> Result<()> {
    hal.pwm_set_duty_cycle(PinRole::Servo, angle_to_duty(config.window_open_angle_deg))?;
    state.window_open = true;
    Ok(())
}

/// Drive the servo to the closed end stop and mark the window closed.
pub fn close_window(
    state: &mut ControllerState,
    hal: &mut impl HalPort,
    config: &SystemConfig,
) -> Result<()> {
    hal.pwm_set_duty_cycle(PinRole::Servo, angle_to_duty(config.window_closed_angle_deg))?;
    state.window_open = false;
    Ok(())
}

/// Read both probes and apply the window rule.
pub fn manage_window(
    state: &mut ControllerState,
    hal: &mut impl HalPort,
    config: &SystemConfig,
) -> Result<WindowAction> {
    match apply_window(state, hal, config) {
        Ok(action) => Ok(action),
        Err(Error::Sensor(e)) if e.kind() == FaultKind::Transient => {
            warn!("window: {e}, skipping cycle");
            hal.delay_ms(config.transient_retry_pause_ms);
            Ok(WindowAction::Skip(e))
        }
        Err(e) => {
            error!("window: {e}, releasing temperature sensors");
            hal.release_temperature_sensors();
            Err(e)
        }
    }
}

fn apply_window(
    state: &mut ControllerState,
    hal: &mut impl HalPort,
    config: &SystemConfig,
) -> Result<WindowAction> {
    let indoor = hal.read_temperature(TemperatureProbe::Indoor)?;
    let outdoor = hal.read_temperature(TemperatureProbe::Outdoor)?;
    let was_open = state.window_open;

    let action = decide_window(indoor, outdoor, was_open, config);
    match action {
        WindowAction::Open => open_window(state, hal, config)?,
        WindowAction::Close | WindowAction::ForceClose => close_window(state, hal, config)?,
        WindowAction::Hold | WindowAction::Skip(_) => {}
    }

    if state.window_open != was_open {
        info!(
            "window {} (indoor={:.1}\u{00b0}C, outdoor={:.1}\u{00b0}C)",
            if state.window_open { "OPEN" } else { "CLOSED" },
            indoor,
            outdoor
        );
    }
    Ok(action)
}
