//! Frame timing
//!
//! The host calls us once per animation frame with a timestamp in
//! milliseconds. The first frame has no predecessor, so it gets a nominal
//! frame duration instead of a huge spurious step.

use crate::consts::DEFAULT_FRAME_MS;

/// Converts host frame timestamps into elapsed milliseconds
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and return the time since the previous one
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_timestamp {
            None => DEFAULT_FRAME_MS,
            // Clocks that step backwards yield an empty frame
            Some(last) => (timestamp_ms - last).max(0.0) as f32,
        };
        self.last_timestamp = Some(timestamp_ms);
        dt
    }

    /// Forget the previous timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_uses_default() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(123_456.0), DEFAULT_FRAME_MS);
        assert_eq!(clock.advance(123_476.0), 20.0);
        assert_eq!(clock.advance(123_509.5), 33.5);
    }

    #[test]
    fn test_backwards_clock_is_zero() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        assert_eq!(clock.advance(990.0), 0.0);
        assert_eq!(clock.advance(1006.0), 16.0);
    }

    #[test]
    fn test_reset_restores_default_step() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(16.0);
        clock.reset();
        assert_eq!(clock.advance(90_000.0), DEFAULT_FRAME_MS);
    }
}
