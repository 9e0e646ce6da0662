/// Hours since midnight, `[0, 24)`
pub type TimeOfDay = f64;

/// Largest value accepted by [`parse_time_of_day`] (clock-out at midnight)
const MAX_HOURS: f64 = 24.0;

/// Clock-in/clock-out bounds of the work day
///
/// Equal bounds mean a day off, not an empty interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkBounds {
    pub clock_in: TimeOfDay,
    pub clock_out: TimeOfDay,
}

impl WorkBounds {
    /// Non-working day
    pub const OFF: Self = Self {
        clock_in: 0.0,
        clock_out: 0.0,
    };

    pub const fn new(clock_in: TimeOfDay, clock_out: TimeOfDay) -> Self {
        Self {
            clock_in,
            clock_out,
        }
    }

    /// Returns true if these bounds describe a day off
    #[allow(clippy::float_cmp)]
    pub fn is_day_off(self) -> bool {
        self.clock_in == self.clock_out
    }

    /// Length of the work day in hours
    pub fn span(self) -> f64 {
        self.clock_out - self.clock_in
    }
}

impl Default for WorkBounds {
    fn default() -> Self {
        Self::OFF
    }
}

/// Build a time of day from wall-clock hours and minutes
pub fn time_of_day(hours: u32, minutes: u32) -> TimeOfDay {
    f64::from(hours) + f64::from(minutes) / 60.0
}

/// Parse `"9"`, `"9.5"` or `"9:30"` into hours since midnight
///
/// Returns `None` for anything outside `0..=24` or minutes past 59.
pub fn parse_time_of_day(s: &str) -> Option<TimeOfDay> {
    let s = s.trim();
    let hours = if let Some((h, m)) = s.split_once(':') {
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return None;
        }
        let h: u32 = h.parse().ok()?;
        let m: u32 = m.parse().ok()?;
        if m >= 60 {
            return None;
        }
        time_of_day(h, m)
    } else {
        s.parse::<f64>().ok()?
    };

    if !(0.0..=MAX_HOURS).contains(&hours) {
        return None;
    }
    Some(hours)
}
