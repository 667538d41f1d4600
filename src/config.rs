//! System configuration parameters
//!
//! All tunable thresholds and timings for the SmartHome controller.
//! Values are immutable once the controller starts; the firmware may bake
//! in a JSON override at build time (see [`SystemConfig::from_json`]).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Lighting ---
    /// Photoresistor reading below which an occupied room gets light
    pub lux_threshold: f32,

    // --- Window ---
    /// Lower bound of the valid temperature band (Celsius, inclusive)
    pub temp_band_min_c: f32,
    /// Upper bound of the valid temperature band (Celsius, inclusive)
    pub temp_band_max_c: f32,
    /// Indoor/outdoor differential that flips the window (Celsius)
    pub temp_differential_c: f32,
    /// Servo angle for a fully open window (degrees)
    pub window_open_angle_deg: f32,
    /// Servo angle for a fully closed window (degrees)
    pub window_closed_angle_deg: f32,
    /// Servo PWM frequency (Hz)
    pub servo_pwm_freq_hz: u32,

    // --- Timing ---
    /// Pause after a transient temperature fault (milliseconds)
    pub transient_retry_pause_ms: u32,
    /// Settle time after start-up before the first poll (milliseconds)
    pub startup_settle_ms: u32,
    /// Poll loop interval (milliseconds)
    pub poll_interval_ms: u32,
    /// Telemetry cadence, in poll cycles
    pub telemetry_interval_ticks: u32,

    // --- Fault policy ---
    /// Consecutive failed poll cycles tolerated before the loop gives up
    pub max_consecutive_faults: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            lux_threshold: 500.0,

            temp_band_min_c: 18.0,
            temp_band_max_c: 30.0,
            temp_differential_c: 2.0,
            window_open_angle_deg: 0.0,
            window_closed_angle_deg: 180.0,
            servo_pwm_freq_hz: 50,

            transient_retry_pause_ms: 2000,
            startup_settle_ms: 2000,
            poll_interval_ms: 1000,       // 1 Hz
            telemetry_interval_ticks: 60, // 1/min at default poll rate

            max_consecutive_faults: 3,
        }
    }
}

impl SystemConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject invalid ranges instead of silently clamping them.
    pub fn validate(&self) -> Result<()> {
        if !(self.lux_threshold > 0.0) {
            return Err(Error::Config("lux_threshold must be positive"));
        }
        if !(self.temp_band_min_c < self.temp_band_max_c) {
            return Err(Error::Config("temperature band is empty or inverted"));
        }
        if !(self.temp_differential_c >= 0.0) {
            return Err(Error::Config("temp_differential_c must be non-negative"));
        }
        let angle_ok = |a: f32| (0.0..=180.0).contains(&a);
        if !angle_ok(self.window_open_angle_deg) || !angle_ok(self.window_closed_angle_deg) {
            return Err(Error::Config("servo angles must lie in 0..=180"));
        }
        if self.servo_pwm_freq_hz == 0 {
            return Err(Error::Config("servo_pwm_freq_hz must be non-zero"));
        }
        if self.poll_interval_ms == 0 || self.telemetry_interval_ticks == 0 {
            return Err(Error::Config("poll and telemetry intervals must be non-zero"));
        }
        if self.max_consecutive_faults == 0 {
            return Err(Error::Config("max_consecutive_faults must be non-zero"));
        }
        Ok(())
    }

    /// True if `celsius` lies inside the inclusive window-management band.
    pub fn in_band(&self, celsius: f32) -> bool {
        (self.temp_band_min_c..=self.temp_band_max_c).contains(&celsius)
    }
}
