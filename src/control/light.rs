//! Occupancy-driven lighting with an ambient-light veto.
//!
//! The light comes on only when the room is occupied **and** the
//! photoresistor reads strictly below the lux threshold. Presence alone
//! never overrides a bright room.

use embedded_hal::digital::PinState;
use log::info;

use crate::app::ports::HalPort;
use crate::app::state::ControllerState;
use crate::config::SystemConfig;
use crate::error::Result;
use crate::pins::PinRole;

use super::occupancy::check_occupancy;

/// Single instantaneous photoresistor sample, as a unitless lux proxy.
pub fn measure_lux(hal: &mut impl HalPort) -> Result<f32> {
    Ok(f32::from(hal.analog_read(PinRole::Photoresistor)?))
}

/// Pure lighting rule.
pub fn should_light(occupied: bool, lux: f32, threshold: f32) -> bool {
    occupied && lux < threshold
}

/// Read occupancy and ambient light, then drive the light output.
///
/// The output is re-issued every call; `state.light_on` is only updated
/// once the write succeeded. Returns the new flag.
pub fn manage_light(
    state: &mut ControllerState,
    hal: &mut impl HalPort,
    config: &SystemConfig,
) -> Result<bool> {
    let occupied = check_occupancy(hal)?;
    let lux = measure_lux(hal)?;
    let on = should_light(occupied, lux, config.lux_threshold);

    hal.digital_write(PinRole::Light, PinState::from(on))?;
    if state.light_on != on {
        info!("light {} (occupied={}, lux={:.0})", if on { "ON" } else { "OFF" }, occupied, lux);
    }
    state.light_on = on;
    Ok(on)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sim::{HalCommand, SimHal};
    use crate::error::{ActuatorError, Error};

    fn run(occupied: bool, lux: u16) -> (ControllerState, SimHal) {
        let mut hal = SimHal::new();
        hal.set_occupied(occupied);
        hal.set_lux_raw(lux);
        let mut state = ControllerState::new();
        manage_light(&mut state, &mut hal, &SystemConfig::default()).unwrap();
        (state, hal)
    }

    #[test]
    fn occupied_and_dark_turns_light_on() {
        let (state, hal) = run(true, 495);
        assert!(state.light_on);
        assert_eq!(hal.output(PinRole::Light), Some(PinState::High));
    }

    #[test]
    fn occupied_but_bright_keeps_light_off() {
        let (state, hal) = run(true, 505);
        assert!(!state.light_on);
        assert_eq!(hal.output(PinRole::Light), Some(PinState::Low));
    }

    #[test]
    fn threshold_itself_counts_as_bright() {
        let (state, _) = run(true, 500);
        assert!(!state.light_on);
    }

    #[test]
    fn vacant_room_stays_dark() {
        let (state, hal) = run(false, 10);
        assert!(!state.light_on);
        assert_eq!(hal.output(PinRole::Light), Some(PinState::Low));
    }

    #[test]
    fn light_turns_off_when_room_empties() {
        let mut hal = SimHal::new();
        let cfg = SystemConfig::default();
        let mut state = ControllerState::new();
        hal.set_occupied(true);
        hal.set_lux_raw(100);
        manage_light(&mut state, &mut hal, &cfg).unwrap();
        assert!(state.light_on);

        hal.set_occupied(false);
        manage_light(&mut state, &mut hal, &cfg).unwrap();
        assert!(!state.light_on);
    }

    #[test]
    fn repeated_calls_reissue_same_level() {
        let mut hal = SimHal::new();
        let cfg = SystemConfig::default();
        let mut state = ControllerState::new();
        hal.set_occupied(true);
        hal.set_lux_raw(100);
        manage_light(&mut state, &mut hal, &cfg).unwrap();
        let first = state;
        manage_light(&mut state, &mut hal, &cfg).unwrap();
        assert_eq!(state, first);
        let writes: Vec<_> = hal
            .commands()
            .iter()
            .filter(|c| matches!(c, HalCommand::DigitalWrite { pin: PinRole::Light, .. }))
            .collect();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], writes[1]);
    }

    #[test]
    fn failed_write_leaves_flag_untouched() {
        let mut hal = SimHal::new();
        hal.set_occupied(true);
        hal.set_lux_raw(100);
        hal.set_write_fault(Some(ActuatorError::GpioWriteFailed));
        let mut state = ControllerState::new();
        let err = manage_light(&mut state, &mut hal, &SystemConfig::default()).unwrap_err();
        assert_eq!(err, Error::Actuator(ActuatorError::GpioWriteFailed));
        assert!(!state.light_on);
    }

    #[test]
    fn should_light_truth_table() {
        assert!(should_light(true, 499.9, 500.0));
        assert!(!should_light(true, 500.0, 500.0));
        assert!(!should_light(false, 0.0, 500.0));
        assert!(!should_light(false, 900.0, 500.0));
    }
}
