//! Gas detection and buzzer control.
//!
//! The MQ-135 module thresholds at 500 ppm in its own comparator and only
//! exposes a binary level: HIGH below the threshold, LOW at or above it.
//! The buzzer follows that level directly, with no debounce or hysteresis.

use embedded_hal::digital::PinState;
use log::{info, warn};

use crate::app::ports::HalPort;
use crate::app::state::ControllerState;
use crate::error::Result;
use crate::pins::PinRole;

/// Comparator level meaning "gas at or above 500 ppm".
pub const GAS_DETECTED_LEVEL: PinState = PinState::Low;

/// True when the air-quality sensor reports gas at or above threshold.
pub fn gas_above_threshold(hal: &mut impl HalPort) -> Result<bool> {
    Ok(hal.digital_read(PinRole::AirQuality)? == GAS_DETECTED_LEVEL)
}

/// Sound the buzzer while gas is detected, silence it otherwise.
/// Returns the new buzzer flag.
pub fn monitor_air_quality(state: &mut ControllerState, hal: &mut impl HalPort) -> Result<bool> {
    let gas = gas_above_threshold(hal)?;

    hal.digital_write(PinRole::Buzzer, PinState::from(gas))?;
    if state.buzzer_on != gas {
        if gas {
            warn!("gas >= 500 ppm, buzzer ON");
        } else {
            info!("air quality back below threshold, buzzer OFF");
        }
    }
    state.buzzer_on = gas;
    Ok(gas)
}
