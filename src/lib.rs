//! SmartHome controller library.
//!
//! Exposes the decision core, the HAL port and both HAL adapters for
//! integration testing and host simulation. All ESP-IDF-specific code is
//! guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod sensors;
