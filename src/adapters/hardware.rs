//! Hardware adapter. Bridges real peripherals to the [`HalPort`] trait.
//!
//! Plain GPIO, the photoresistor ADC and the servo LEDC channel go through
//! the raw [`hw_init`] helpers; the two DHT11 probes are owned as
//! [`Dht11`] drivers on `embedded-hal` pins. This is the only module in the
//! system that touches actual hardware. On non-espidf targets the helpers
//! are cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::{debug, info, warn};

use crate::app::ports::HalPort;
use crate::drivers::hw_init;
use crate::drivers::servo::duty_to_ticks;
use crate::error::{ActuatorError, SensorError};
use crate::pins::{self, PinRole, TemperatureProbe};
use crate::sensors::dht11::Dht11;

/// Concrete adapter that combines all hardware behind [`HalPort`].
pub struct BoardHal<P, D> {
    indoor: Dht11<P, D>,
    outdoor: Dht11<P, D>,
}

impl<P, D> BoardHal<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(indoor: Dht11<P, D>, outdoor: Dht11<P, D>) -> Self {
        Self { indoor, outdoor }
    }

    fn probe(&mut self, probe: TemperatureProbe) -> &mut Dht11<P, D> {
        match probe {
            TemperatureProbe::Indoor => &mut self.indoor,
            TemperatureProbe::Outdoor => &mut self.outdoor,
        }
    }
}

impl<P, D> HalPort for BoardHal<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn digital_read(&mut self, pin: PinRole) -> Result<PinState, SensorError> {
        Ok(PinState::from(hw_init::gpio_read(pin.gpio())))
    }

    fn digital_write(&mut self, pin: PinRole, level: PinState) -> Result<(), ActuatorError> {
        hw_init::gpio_write(pin.gpio(), level == PinState::High).map_err(|rc| {
            warn!("gpio_write({}) failed rc={}", pin.gpio(), rc);
            ActuatorError::GpioWriteFailed
        })
    }

    fn analog_read(&mut self, pin: PinRole) -> Result<u16, SensorError> {
        if pin != PinRole::Photoresistor {
            return Err(SensorError::UnsupportedPin);
        }
        hw_init::adc1_read(hw_init::ADC1_CH_PHOTO).map_err(|rc| {
            warn!("adc1_read failed rc={}", rc);
            SensorError::AdcReadFailed
        })
    }

    fn pwm_set_duty_cycle(&mut self, pin: PinRole, percent: f32) -> Result<(), ActuatorError> {
        if pin != PinRole::Servo {
            return Err(ActuatorError::UnsupportedPin);
        }
        let ticks = duty_to_ticks(percent, pins::PWM_RESOLUTION_BITS);
        debug!("servo duty {:.2}% ({} ticks)", percent, ticks);
        hw_init::ledc_set(hw_init::LEDC_CH_SERVO, ticks).map_err(|rc| {
            warn!("ledc_set failed rc={}", rc);
            ActuatorError::PwmWriteFailed
        })
    }

    fn read_temperature(&mut self, probe: TemperatureProbe) -> Result<f32, SensorError> {
        self.probe(probe).read().map(|r| r.temperature_c)
    }

    fn release_temperature_sensors(&mut self) {
        self.indoor.release();
        self.outdoor.release();
        info!("DHT11 drivers released");
    }

    fn restart_temperature_sensors(&mut self) {
        self.indoor.restart();
        self.outdoor.restart();
        info!("DHT11 drivers restarted");
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
