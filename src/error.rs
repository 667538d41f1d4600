//! Unified error types for the SmartHome firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! poll loop's error handling uniform. All variants are `Copy` so they can
//! be passed through the controller and event sink without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned unusable data.
    Sensor(SensorError),
    /// An actuator command failed.
    Actuator(ActuatorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl Error {
    /// Recoverability of this error. Only sensor timing faults are transient.
    pub const fn kind(self) -> FaultKind {
        match self {
            Self::Sensor(e) => e.kind(),
            _ => FaultKind::Fatal,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Fault classification
// ---------------------------------------------------------------------------

/// Whether a fault can be retried on the next poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Skip this cycle and leave state untouched.
    Transient,
    /// Tear down the affected driver and report to the poll loop.
    Fatal,
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// GPIO read returned an error.
    GpioReadFailed,
    /// ADC read returned an error or timed out.
    AdcReadFailed,
    /// The pin role has no input of the requested kind.
    UnsupportedPin,
    /// Single-wire sensor did not answer within its timing window.
    Timeout,
    /// Sensor frame failed its checksum.
    ChecksumMismatch,
    /// The data line itself reported an error.
    BusFault,
    /// The driver was released and must be restarted before use.
    Released,
}

impl SensorError {
    pub const fn kind(self) -> FaultKind {
        match self {
            Self::Timeout | Self::ChecksumMismatch => FaultKind::Transient,
            _ => FaultKind::Fatal,
        }
    }

    pub const fn is_transient(self) -> bool {
        matches!(self.kind(), FaultKind::Transient)
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::UnsupportedPin => write!(f, "pin does not support this read"),
            Self::Timeout => write!(f, "sensor response timed out"),
            Self::ChecksumMismatch => write!(f, "checksum did not validate"),
            Self::BusFault => write!(f, "data line fault"),
            Self::Released => write!(f, "sensor driver released"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// The pin role has no output of the requested kind.
    UnsupportedPin,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::UnsupportedPin => write!(f, "pin does not support this output"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
