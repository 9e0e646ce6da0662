//! Time driven strip effects
//!
//! Effects render straight into a pixel slice and are driven by the
//! elapsed time since they were started.

mod rainbow;

use embassy_time::Instant;
pub use rainbow::{CELEBRATION_DURATION, CELEBRATION_STEPS, RainbowCycle};

use crate::color::Rgb;

pub trait Effect {
    /// Render a single frame
    fn render(&mut self, now: Instant, leds: &mut [Rgb]);

    /// Check if the effect has played to the end
    fn is_finished(&self, _now: Instant) -> bool {
        false
    }
}
