//! Decision functions that map sensor readings to actuator states.
//!
//! Each rule reads its inputs through [`HalPort`](crate::app::ports::HalPort),
//! applies one transition and updates the matching
//! [`ControllerState`](crate::app::state::ControllerState) flag. Rules are
//! independent of one another and safe to call redundantly.

pub mod air_quality;
pub mod light;
pub mod occupancy;
pub mod window;

pub use air_quality::{gas_above_threshold, monitor_air_quality};
pub use light::{manage_light, measure_lux, should_light};
pub use occupancy::check_occupancy;
pub use window::{WindowAction, close_window, decide_window, manage_window, open_window};
