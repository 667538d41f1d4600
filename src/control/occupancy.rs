//! Room occupancy from the ceiling infrared proximity sensor.

use embedded_hal::digital::PinState;

use crate::app::ports::HalPort;
use crate::error::Result;
use crate::pins::PinRole;

/// Sensor output level meaning "something in front of me".
pub const OCCUPIED_LEVEL: PinState = PinState::Low;

/// True when the infrared sensor detects someone. No state is touched.
pub fn check_occupancy(hal: &mut impl HalPort) -> Result<bool> {
    Ok(hal.digital_read(PinRole::Infrared)? == OCCUPIED_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sim::SimHal;
    use crate::error::{Error, SensorError};

    #[test]
    fn low_means_occupied() {
        let mut hal = SimHal::new();
        hal.set_occupied(true);
        assert!(check_occupancy(&mut hal).unwrap());
    }

    #[test]
    fn high_means_vacant() {
        let mut hal = SimHal::new();
        hal.set_occupied(false);
        assert!(!check_occupancy(&mut hal).unwrap());
    }

    #[test]
    fn read_fault_propagates() {
        let mut hal = SimHal::new();
        hal.set_gpio_read_fault(true);
        assert_eq!(
            check_occupancy(&mut hal).unwrap_err(),
            Error::Sensor(SensorError::GpioReadFailed)
        );
    }
}
