//! Simulated HAL for host runs and tests.
//!
//! Inputs are set directly (occupancy, gas, lux, temperatures) and every
//! actuator command plus each delay/teardown is recorded in order, so tests
//! can assert on the full command history. Faults can be injected per
//! probe read or for all GPIO/PWM traffic.

use std::collections::VecDeque;

use embedded_hal::digital::PinState;

use crate::app::ports::HalPort;
use crate::error::{ActuatorError, SensorError};
use crate::pins::{PinRole, TemperatureProbe};

/// Everything the controller asked the hardware to do.
#[derive(Debug, Clone, PartialEq)]
pub enum HalCommand {
    DigitalWrite { pin: PinRole, level: PinState },
    DutyCycle { pin: PinRole, percent: f32 },
    ReleaseTemperatureSensors,
    RestartTemperatureSensors,
    Delay(u32),
}

#[derive(Debug, Default)]
struct ProbeScript {
    steady_c: f32,
    queued: VecDeque<Result<f32, SensorError>>,
}

impl ProbeScript {
    fn next(&mut self) -> Result<f32, SensorError> {
        self.queued.pop_front().unwrap_or(Ok(self.steady_c))
    }
}

pub struct SimHal {
    infrared: PinState,
    air_quality: PinState,
    photoresistor_raw: u16,
    indoor: ProbeScript,
    outdoor: ProbeScript,
    released: bool,
    gpio_read_fault: bool,
    write_fault: Option<ActuatorError>,
    commands: Vec<HalCommand>,
}

impl Default for SimHal {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHal {
    /// Vacant room, clean air, dark, both probes at 22 °C.
    pub fn new() -> Self {
        Self {
            infrared: PinState::High,
            air_quality: PinState::High,
            photoresistor_raw: 0,
            indoor: ProbeScript {
                steady_c: 22.0,
                ..ProbeScript::default()
            },
            outdoor: ProbeScript {
                steady_c: 22.0,
                ..ProbeScript::default()
            },
            released: false,
            gpio_read_fault: false,
            write_fault: None,
            commands: Vec::new(),
        }
    }

    // ── Input injection ───────────────────────────────────────

    pub fn set_occupied(&mut self, occupied: bool) {
        self.infrared = PinState::from(!occupied);
    }

    pub fn set_gas_detected(&mut self, detected: bool) {
        self.air_quality = PinState::from(!detected);
    }

    pub fn set_lux_raw(&mut self, raw: u16) {
        self.photoresistor_raw = raw;
    }

    pub fn set_temperatures(&mut self, indoor_c: f32, outdoor_c: f32) {
        self.indoor.steady_c = indoor_c;
        self.outdoor.steady_c = outdoor_c;
    }

    /// One-shot result for the next read of `probe`.
    pub fn queue_temperature(&mut self, probe: TemperatureProbe, reading: Result<f32, SensorError>) {
        self.probe_mut(probe).queued.push_back(reading);
    }

    pub fn set_gpio_read_fault(&mut self, fault: bool) {
        self.gpio_read_fault = fault;
    }

    /// Make every digital and PWM write fail with `fault`.
    pub fn set_write_fault(&mut self, fault: Option<ActuatorError>) {
        self.write_fault = fault;
    }

    // ── Observation ───────────────────────────────────────────

    pub fn commands(&self) -> &[HalCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Last level successfully written to `pin`.
    pub fn output(&self, pin: PinRole) -> Option<PinState> {
        self.commands.iter().rev().find_map(|c| match c {
            HalCommand::DigitalWrite { pin: p, level } if *p == pin => Some(*level),
            _ => None,
        })
    }

    /// Last duty cycle successfully written to the servo.
    pub fn servo_duty(&self) -> Option<f32> {
        self.commands.iter().rev().find_map(|c| match c {
            HalCommand::DutyCycle { pin: PinRole::Servo, percent } => Some(*percent),
            _ => None,
        })
    }

    pub fn temperature_sensors_released(&self) -> bool {
        self.released
    }

    fn probe_mut(&mut self, probe: TemperatureProbe) -> &mut ProbeScript {
        match probe {
            TemperatureProbe::Indoor => &mut self.indoor,
            TemperatureProbe::Outdoor => &mut self.outdoor,
        }
    }
}

impl HalPort for SimHal {
    fn digital_read(&mut self, pin: PinRole) -> Result<PinState, SensorError> {
        if self.gpio_read_fault {
            return Err(SensorError::GpioReadFailed);
        }
        Ok(match pin {
            PinRole::Infrared => self.infrared,
            PinRole::AirQuality => self.air_quality,
            other => self.output(other).unwrap_or(PinState::Low),
        })
    }

    fn digital_write(&mut self, pin: PinRole, level: PinState) -> Result<(), ActuatorError> {
        if let Some(fault) = self.write_fault {
            return Err(fault);
        }
        self.commands.push(HalCommand::DigitalWrite { pin, level });
        Ok(())
    }

    fn analog_read(&mut self, pin: PinRole) -> Result<u16, SensorError> {
        match pin {
            PinRole::Photoresistor => Ok(self.photoresistor_raw),
            _ => Err(SensorError::UnsupportedPin),
        }
    }

    fn pwm_set_duty_cycle(&mut self, pin: PinRole, percent: f32) -> Result<(), ActuatorError> {
        if pin != PinRole::Servo {
            return Err(ActuatorError::UnsupportedPin);
        }
        if let Some(fault) = self.write_fault {
            return Err(fault);
        }
        self.commands.push(HalCommand::DutyCycle { pin, percent });
        Ok(())
    }

    fn read_temperature(&mut self, probe: TemperatureProbe) -> Result<f32, SensorError> {
        if self.released {
            return Err(SensorError::Released);
        }
        self.probe_mut(probe).next()
    }

    fn release_temperature_sensors(&mut self) {
        self.released = true;
        self.commands.push(HalCommand::ReleaseTemperatureSensors);
    }

    fn restart_temperature_sensors(&mut self) {
        self.released = false;
        self.commands.push(HalCommand::RestartTemperatureSensors);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.commands.push(HalCommand::Delay(ms));
    }
}
