//! DHT11 temperature / humidity sensor over a single open-drain data line.
//!
//! ## Protocol
//!
//! 1. Host pulls the line LOW for at least 18 ms, then releases it.
//! 2. Sensor answers LOW ~80 µs, HIGH ~80 µs.
//! 3. Forty bits follow, MSB first. Each bit is ~50 µs LOW followed by
//!    HIGH for ~26 µs (`0`) or ~70 µs (`1`).
//! 4. Frame: humidity int, humidity dec, temperature int, temperature dec,
//!    checksum (low byte of the sum of the first four).
//!
//! ## Dual-target design
//!
//! The driver is generic over `embedded-hal` 1.0 pins and delays. On
//! ESP-IDF it runs on a `PinDriver` in input/output open-drain mode with the
//! `Ets` busy-wait delay; on host it runs on scripted test doubles.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::SensorError;

/// Host start pulse.
const START_LOW_MS: u32 = 18;
/// Upper bound on any single sensor phase (µs).
const PHASE_TIMEOUT_US: u32 = 100;
/// HIGH phases longer than this decode as `1`.
const BIT_ONE_THRESHOLD_US: u32 = 40;
const FRAME_BITS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dht11Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Validate and decode a raw 5-byte frame.
pub fn decode_frame(frame: [u8; 5]) -> Result<Dht11Reading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) * 0.1;
    let mut temperature_c = f32::from(frame[2]) + f32::from(frame[3] & 0x7f) * 0.1;
    if frame[3] & 0x80 != 0 {
        temperature_c = -temperature_c;
    }

    Ok(Dht11Reading {
        temperature_c,
        humidity_pct,
    })
}

pub struct Dht11<P, D> {
    pin: P,
    delay: D,
    released: bool,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            released: false,
        }
    }

    /// Run one full transaction. Blocks for ~23 ms.
    pub fn read(&mut self) -> Result<Dht11Reading, SensorError> {
        if self.released {
            return Err(SensorError::Released);
        }

        self.pin.set_low().map_err(|_| SensorError::BusFault)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| SensorError::BusFault)?;

        // Response preamble: LOW, HIGH, then LOW marks the first bit.
        self.wait_for(false)?;
        self.wait_for(true)?;
        self.wait_for(false)?;

        let mut frame = [0u8; 5];
        for bit in 0..FRAME_BITS {
            self.wait_for(true)?;
            let high_us = self.wait_for(false)?;
            if high_us > BIT_ONE_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }

        decode_frame(frame)
    }

    /// Park the line HIGH and refuse further reads until [`restart`](Self::restart).
    pub fn release(&mut self) {
        // Best effort: a failing pin is already the reason we are here.
        let _ = self.pin.set_high();
        self.released = true;
    }

    pub fn restart(&mut self) {
        let _ = self.pin.set_high();
        self.released = false;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Poll until the line reaches `high`, returning the µs spent waiting.
    fn wait_for(&mut self, high: bool) -> Result<u32, SensorError> {
        let mut elapsed = 0;
        while self.pin.is_high().map_err(|_| SensorError::BusFault)? != high {
            if elapsed >= PHASE_TIMEOUT_US {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted single-wire line and delay sharing a virtual µs clock.

    use std::cell::Cell;
    use std::convert::Infallible;
    use std::rc::Rc;

    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

    #[derive(Clone, Default)]
    pub struct Clock(Rc<Cell<u64>>);

    impl Clock {
        fn now(&self) -> u64 {
            self.0.get()
        }
    }

    pub struct VirtualDelay(pub Clock);

    impl DelayNs for VirtualDelay {
        fn delay_ns(&mut self, ns: u32) {
            let us = u64::from(ns.div_ceil(1000));
            self.0.0.set(self.0.now() + us);
        }
    }

    /// Replays `waveform` (level, duration µs) once the host releases the line.
    pub struct ScriptedLine {
        clock: Clock,
        released_at: Option<u64>,
        waveform: Vec<(bool, u64)>,
    }

    impl ScriptedLine {
        pub fn new(clock: Clock, waveform: Vec<(bool, u64)>) -> Self {
            Self {
                clock,
                released_at: None,
                waveform,
            }
        }

        fn level(&self) -> bool {
            let Some(t0) = self.released_at else {
                return false;
            };
            let mut t = self.clock.now() - t0;
            for &(level, duration) in &self.waveform {
                if t < duration {
                    return level;
                }
                t -= duration;
            }
            true
        }
    }

    impl ErrorType for ScriptedLine {
        type Error = Infallible;
    }

    impl OutputPin for ScriptedLine {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.released_at = None;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.released_at = Some(self.clock.now());
            Ok(())
        }
    }

    impl InputPin for ScriptedLine {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.level())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.level())
        }
    }

    /// Waveform a healthy sensor produces for `frame`.
    pub fn waveform(frame: [u8; 5]) -> Vec<(bool, u64)> {
        let mut w = vec![(true, 20), (false, 80), (true, 80)];
        for byte in frame {
            for i in (0..8).rev() {
                w.push((false, 50));
                w.push((true, if (byte >> i) & 1 == 1 { 70 } else { 26 }));
            }
        }
        w.push((false, 50));
        w
    }

    /// Frame for a whole-degree temperature with valid checksum.
    pub fn frame(humidity: u8, celsius: u8) -> [u8; 5] {
        [humidity, 0, celsius, 0, humidity.wrapping_add(celsius)]
    }

    pub fn sensor(frame: [u8; 5]) -> super::Dht11<ScriptedLine, VirtualDelay> {
        let clock = Clock::default();
        super::Dht11::new(
            ScriptedLine::new(clock.clone(), waveform(frame)),
            VirtualDelay(clock),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    #[test]
    fn decodes_positive_frame() {
        let r = decode_frame([45, 0, 23, 4, 72]).unwrap();
        assert!((r.temperature_c - 23.4).abs() < 1e-4);
        assert!((r.humidity_pct - 45.0).abs() < 1e-4);
    }

    #[test]
    fn decodes_negative_temperature() {
        let r = decode_frame([30, 0, 2, 0x85, 30u8.wrapping_add(2).wrapping_add(0x85)]).unwrap();
        assert!((r.temperature_c + 2.5).abs() < 1e-4);
    }

    #[test]
    fn bad_checksum_is_transient() {
        let err = decode_frame([45, 0, 23, 0, 0]).unwrap_err();
        assert_eq!(err, SensorError::ChecksumMismatch);
        assert!(err.is_transient());
    }

    #[test]
    fn reads_full_transaction() {
        let mut dht = sensor(frame(55, 21));
        let r = dht.read().unwrap();
        assert_eq!(r.temperature_c, 21.0);
        assert_eq!(r.humidity_pct, 55.0);
    }

    #[test]
    fn corrupted_transaction_fails_checksum() {
        let mut bad = frame(55, 21);
        bad[4] ^= 0x01;
        let mut dht = sensor(bad);
        assert_eq!(dht.read().unwrap_err(), SensorError::ChecksumMismatch);
    }

    #[test]
    fn silent_sensor_times_out() {
        let clock = Clock::default();
        let mut dht = Dht11::new(ScriptedLine::new(clock.clone(), Vec::new()), VirtualDelay(clock));
        assert_eq!(dht.read().unwrap_err(), SensorError::Timeout);
    }

    #[test]
    fn released_driver_refuses_reads_until_restart() {
        let mut dht = sensor(frame(40, 25));
        dht.release();
        assert!(dht.is_released());
        assert_eq!(dht.read().unwrap_err(), SensorError::Released);
        dht.restart();
        assert_eq!(dht.read().unwrap().temperature_c, 25.0);
    }

    struct BrokenLine;

    impl ErrorType for BrokenLine {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenLine {
        fn set_low(&mut self) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }
        fn set_high(&mut self) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    impl InputPin for BrokenLine {
        fn is_high(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }
        fn is_low(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn pin_error_is_fatal() {
        let mut dht = Dht11::new(BrokenLine, VirtualDelay(Clock::default()));
        let err = dht.read().unwrap_err();
        assert_eq!(err, SensorError::BusFault);
        assert!(!err.is_transient());
    }
}
