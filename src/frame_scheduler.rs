//! Tick policy
//!
//! Decides, once per scheduler tick, what the strip should show. The caller
//! owns the clock and the transport; this module only keeps the little state
//! that has to survive between ticks.
//!
//! # Usage
//!
//! ```ignore
//! let mut scheduler = DisplayScheduler::new();
//!
//! loop {
//!     let bounds = schedule.for_day(today());
//!     match scheduler.tick(bounds, hours_into_day()) {
//!         TickAction::ShowDay { marker_level } => show_day(marker_level),
//!         TickAction::Celebrate => celebrate_and_power_off(),
//!         TickAction::Idle => {}
//!     }
//!     sleep(DEFAULT_TICK_INTERVAL);
//! }
//! ```

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bounds::{TimeOfDay, WorkBounds};
use crate::schedule::is_working;

/// Default time between two ticks (five minutes).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Marker level used on the dim phase of the flash (30%).
pub const DIMMED_MARKER_LEVEL: u8 = 77;

/// What to do on this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Render the work day with the marker scaled by `marker_level`
    ShowDay { marker_level: u8 },
    /// The work day just ended: play the celebration, then power off
    Celebrate,
    /// Nothing to do
    Idle,
}

/// Per-tick display policy.
///
/// While working, every tick shows the day and the current time marker
/// alternates between full and dimmed intensity. Once work is over the
/// celebration is requested exactly once; it is armed again as soon as a
/// working tick is seen, or by [`DisplayScheduler::celebration_failed`].
#[derive(Debug, Clone)]
pub struct DisplayScheduler {
    flash: bool,
    dimmed_level: u8,
    flash_phase: bool,
    celebrated: bool,
}

impl Default for DisplayScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayScheduler {
    pub const fn new() -> Self {
        Self {
            flash: true,
            dimmed_level: DIMMED_MARKER_LEVEL,
            flash_phase: false,
            celebrated: false,
        }
    }

    /// Enable or disable marker flashing
    #[must_use]
    pub const fn with_flash(mut self, flash: bool) -> Self {
        self.flash = flash;
        self
    }

    /// Marker level used on the dim phase of the flash
    #[must_use]
    pub const fn with_dimmed_level(mut self, level: u8) -> Self {
        self.dimmed_level = level;
        self
    }

    /// Returns true if the celebration was already requested since the last
    /// working tick
    pub const fn has_celebrated(&self) -> bool {
        self.celebrated
    }

    /// Re-arm the celebration after it could not be shown
    ///
    /// The next non-working tick requests it again.
    pub fn celebration_failed(&mut self) {
        self.celebrated = false;
    }

    /// Decide the action for the tick at `now`
    pub fn tick(&mut self, bounds: WorkBounds, now: TimeOfDay) -> TickAction {
        if is_working(bounds, now) {
            self.celebrated = false;
            return TickAction::ShowDay {
                marker_level: self.next_marker_level(),
            };
        }

        if self.celebrated {
            return TickAction::Idle;
        }

        #[cfg(feature = "esp32-log")]
        println!("[DisplayScheduler.tick] work day over at {}, celebrating", now);
        self.celebrated = true;
        TickAction::Celebrate
    }

    fn next_marker_level(&mut self) -> u8 {
        if !self.flash {
            return 255;
        }
        self.flash_phase = !self.flash_phase;
        if self.flash_phase { 255 } else { self.dimmed_level }
    }
}
