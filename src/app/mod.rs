//! Application core. Pure domain logic, zero direct I/O.
//!
//! Holds the controller state, the poll-cycle orchestration and the
//! outbound events. All interaction with hardware happens through the
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
pub mod state;
