//! Rainbow cycle played when the work day ends
//!
//! The whole color wheel is spread across the strip and rotated by one
//! wheel position per step until a full turn is complete.

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::{
    color::{Rgb, wheel},
    math8::progress8,
};

/// Length of the celebration
pub const CELEBRATION_DURATION: Duration = Duration::from_millis(5000);

/// Number of frames in one celebration
pub const CELEBRATION_STEPS: u32 = 255;

/// Wheel positions spread across the strip
const WHEEL_SIZE: usize = 256;

/// Rainbow that rotates once over its duration
#[derive(Debug, Clone)]
pub struct RainbowCycle {
    /// Time at which the cycle started
    started_at: Instant,
    /// Duration of one complete turn
    duration: Duration,
}

impl Default for RainbowCycle {
    fn default() -> Self {
        Self::new(Instant::from_millis(0))
    }
}

impl RainbowCycle {
    /// Create a cycle starting at `now`
    pub const fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            duration: CELEBRATION_DURATION,
        }
    }

    /// Set the cycle duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Delay between two frames
    pub fn step_delay(&self) -> Duration {
        self.duration / CELEBRATION_STEPS
    }

    /// Wheel offset reached at `now`
    pub fn step(&self, now: Instant) -> u8 {
        let elapsed = now
            .checked_duration_since(self.started_at)
            .unwrap_or(Duration::from_millis(0));
        progress8(elapsed, self.duration)
    }
}

impl Effect for RainbowCycle {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        let len = leds.len();
        let step = usize::from(self.step(now));
        for (i, led) in leds.iter_mut().enumerate() {
            let position = i * WHEEL_SIZE / len + step;
            *led = wheel((position & 0xFF) as u8);
        }
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.checked_duration_since(self.started_at)
            .is_some_and(|elapsed| elapsed >= self.duration)
    }
}
