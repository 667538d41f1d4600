//! Concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements | Connects to                          |
//! |-------------|------------|--------------------------------------|
//! | `hardware`  | HalPort    | ESP32 GPIO, ADC, LEDC, DHT11 probes  |
//! | `sim`       | HalPort    | In-memory inputs + command recorder  |
//! | `log_sink`  | EventSink  | Serial log output                    |

pub mod hardware;
pub mod log_sink;
pub mod sim;
