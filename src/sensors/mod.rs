//! Sensor drivers that need more than a single GPIO or ADC read.

pub mod dht11;
