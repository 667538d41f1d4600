//! SG90 hobby servo angle → PWM duty mapping.
//!
//! At 50 Hz a 0.5 ms – 2.5 ms pulse spans 0° – 180°, which is 2 % – 12 %
//! duty. The servo itself is a dumb actuator; the window rule owns its state.

/// Maximum commanded angle (degrees).
pub const MAX_ANGLE_DEG: f32 = 180.0;

/// Duty cycle (percent) for a servo angle in degrees.
///
/// `duty = angle / 18 + 2`. Angles outside 0..=180 are clamped.
pub fn angle_to_duty(angle_deg: f32) -> f32 {
    angle_deg.clamp(0.0, MAX_ANGLE_DEG) / 18.0 + 2.0
}

/// Convert a duty percentage into LEDC ticks at `resolution_bits`.
pub fn duty_to_ticks(percent: f32, resolution_bits: u32) -> u32 {
    let max = (1u32 << resolution_bits) - 1;
    ((percent.clamp(0.0, 100.0) / 100.0) * max as f32).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_stops() {
        assert_eq!(angle_to_duty(0.0), 2.0);
        assert_eq!(angle_to_duty(180.0), 12.0);
        assert_eq!(angle_to_duty(90.0), 7.0);
    }

    #[test]
    fn clamps_out_of_range_angles() {
        assert_eq!(angle_to_duty(-45.0), 2.0);
        assert_eq!(angle_to_duty(270.0), 12.0);
    }

    #[test]
    fn ticks_scale_with_resolution() {
        assert_eq!(duty_to_ticks(0.0, 13), 0);
        assert_eq!(duty_to_ticks(100.0, 13), 8191);
        assert_eq!(duty_to_ticks(12.0, 13), 983);
        assert_eq!(duty_to_ticks(150.0, 8), 255);
    }
}
