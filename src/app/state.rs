//! The three actuator flags the decision functions own.

/// Current actuator flags.
///
/// Created all-off at start-up, mutated only by the decision functions
/// in [`crate::control`], discarded at shutdown. Each flag changes together
/// with its actuator output or not at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub light_on: bool,
    pub window_open: bool,
    pub buzzer_on: bool,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_all_off() {
        let s = ControllerState::new();
        assert!(!s.light_on);
        assert!(!s.window_open);
        assert!(!s.buzzer_on);
    }
}
