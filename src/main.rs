//! SmartHome firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │   BoardHal (GPIO · ADC · LEDC · 2× DHT11)   LogEventSink │
//! │                                                          │
//! │   ─────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │   ┌──────────────────────────────────────────────────┐   │
//! │   │        HomeController (decision core)            │   │
//! │   │   air quality · occupancy light · window servo   │   │
//! │   └──────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{IOPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info, warn};

use smarthome::adapters::hardware::BoardHal;
use smarthome::adapters::log_sink::LogEventSink;
use smarthome::app::ports::HalPort;
use smarthome::app::service::HomeController;
use smarthome::config::SystemConfig;
use smarthome::drivers::hw_init;
use smarthome::sensors::dht11::Dht11;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SmartHome v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration (defaults or baked-in override) ──────
    let config = match option_env!("SMARTHOME_CONFIG_JSON") {
        Some(json) => {
            info!("Config: using build-time override");
            SystemConfig::from_json(json)?
        }
        None => SystemConfig::default(),
    };

    // ── 3. Peripherals ────────────────────────────────────────
    // Any failure here is fatal: nothing may poll a half-initialised board.
    hw_init::init_peripherals(config.servo_pwm_freq_hz)?;

    let peripherals = Peripherals::take()?;
    // DHT_INDOOR_GPIO / DHT_OUTDOOR_GPIO in pins.rs
    let indoor_line = PinDriver::input_output_od(peripherals.pins.gpio17.downgrade())?;
    let outdoor_line = PinDriver::input_output_od(peripherals.pins.gpio18.downgrade())?;

    let mut hw = BoardHal::new(Dht11::new(indoor_line, Ets), Dht11::new(outdoor_line, Ets));
    let mut log_sink = LogEventSink::new();

    // ── 4. Controller ─────────────────────────────────────────
    let mut app = HomeController::new(config.clone());
    app.start(&mut hw, &mut log_sink)?;

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    let interval = Duration::from_millis(u64::from(config.poll_interval_ms));
    loop {
        if let Err(e) = app.tick(&mut hw, &mut log_sink) {
            if app.fault_budget_exhausted() {
                error!(
                    "{} consecutive failed cycles, last: {}, stopping",
                    app.consecutive_faults(),
                    e
                );
                return Err(e.into());
            }
            warn!("poll cycle failed ({}), restarting temperature sensors", e);
            hw.restart_temperature_sensors();
        }

        std::thread::sleep(interval);
    }
}
