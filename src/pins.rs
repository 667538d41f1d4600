//! GPIO / peripheral pin assignments for the SmartHome controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers. The domain logic only ever sees [`PinRole`];
//! adapters translate roles into the numbers below.

// ---------------------------------------------------------------------------
// Sensors: Digital
// ---------------------------------------------------------------------------

/// MQ-135 air-quality module, digital comparator output.
/// HIGH = below 500 ppm, LOW = 500 ppm or above.
pub const AIR_QUALITY_GPIO: i32 = 5;
/// Ceiling infrared proximity sensor. LOW = something in front of it.
pub const INFRARED_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Sensors: Single-wire (DHT11)
// ---------------------------------------------------------------------------

/// Indoor DHT11, open-drain data line with external pull-up.
pub const DHT_INDOOR_GPIO: i32 = 17;
/// Outdoor DHT11, open-drain data line with external pull-up.
pub const DHT_OUTDOOR_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Sensors: Analog (ADC1)
// ---------------------------------------------------------------------------

/// Photoresistor divider. ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const PHOTO_ADC_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Smart light relay (active HIGH).
pub const LIGHT_GPIO: i32 = 7;
/// Active buzzer (active HIGH).
pub const BUZZER_GPIO: i32 = 16;
/// SG90 window servo, LEDC PWM.
pub const SERVO_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). 13-bit gives ~2.4 µs steps at 50 Hz.
pub const PWM_RESOLUTION_BITS: u32 = 13;

// ---------------------------------------------------------------------------
// Logical roles
// ---------------------------------------------------------------------------

/// Stable logical identifiers for every pin the controller touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinRole {
    AirQuality,
    Servo,
    Buzzer,
    IndoorTemperature,
    OutdoorTemperature,
    Infrared,
    Light,
    Photoresistor,
}

impl PinRole {
    pub const ALL: [PinRole; 8] = [
        Self::AirQuality,
        Self::Servo,
        Self::Buzzer,
        Self::IndoorTemperature,
        Self::OutdoorTemperature,
        Self::Infrared,
        Self::Light,
        Self::Photoresistor,
    ];

    /// GPIO number wired to this role.
    pub const fn gpio(self) -> i32 {
        match self {
            Self::AirQuality => AIR_QUALITY_GPIO,
            Self::Servo => SERVO_GPIO,
            Self::Buzzer => BUZZER_GPIO,
            Self::IndoorTemperature => DHT_INDOOR_GPIO,
            Self::OutdoorTemperature => DHT_OUTDOOR_GPIO,
            Self::Infrared => INFRARED_GPIO,
            Self::Light => LIGHT_GPIO,
            Self::Photoresistor => PHOTO_ADC_GPIO,
        }
    }
}

/// The two temperature probes used for window management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureProbe {
    Indoor,
    Outdoor,
}

impl TemperatureProbe {
    pub const fn pin_role(self) -> PinRole {
        match self {
            Self::Indoor => PinRole::IndoorTemperature,
            Self::Outdoor => PinRole::OutdoorTemperature,
        }
    }
}
