//! Weekly work schedule and the work/not-work decision

use crate::bounds::{TimeOfDay, WorkBounds};

const WEEKDAY_NAME_MONDAY: &str = "monday";
const WEEKDAY_NAME_TUESDAY: &str = "tuesday";
const WEEKDAY_NAME_WEDNESDAY: &str = "wednesday";
const WEEKDAY_NAME_THURSDAY: &str = "thursday";
const WEEKDAY_NAME_FRIDAY: &str = "friday";
const WEEKDAY_NAME_SATURDAY: &str = "saturday";
const WEEKDAY_NAME_SUNDAY: &str = "sunday";

/// Returns true while `now` is inside the work day, both ends inclusive
///
/// A day off (equal bounds) is never working. Bounds are not wrapped around
/// midnight.
pub fn is_working(bounds: WorkBounds, now: TimeOfDay) -> bool {
    if bounds.is_day_off() {
        return false;
    }
    now >= bounds.clock_in && now <= bounds.clock_out
}

/// Day of the week
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Day from its number counted from Monday (0) to Sunday (6)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => WEEKDAY_NAME_MONDAY,
            Self::Tuesday => WEEKDAY_NAME_TUESDAY,
            Self::Wednesday => WEEKDAY_NAME_WEDNESDAY,
            Self::Thursday => WEEKDAY_NAME_THURSDAY,
            Self::Friday => WEEKDAY_NAME_FRIDAY,
            Self::Saturday => WEEKDAY_NAME_SATURDAY,
            Self::Sunday => WEEKDAY_NAME_SUNDAY,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            WEEKDAY_NAME_MONDAY => Some(Self::Monday),
            WEEKDAY_NAME_TUESDAY => Some(Self::Tuesday),
            WEEKDAY_NAME_WEDNESDAY => Some(Self::Wednesday),
            WEEKDAY_NAME_THURSDAY => Some(Self::Thursday),
            WEEKDAY_NAME_FRIDAY => Some(Self::Friday),
            WEEKDAY_NAME_SATURDAY => Some(Self::Saturday),
            WEEKDAY_NAME_SUNDAY => Some(Self::Sunday),
            _ => None,
        }
    }
}

/// Work bounds for every day of the week
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekSchedule {
    days: [WorkBounds; 7],
}

impl WeekSchedule {
    /// Schedule without any working day
    pub const fn new() -> Self {
        Self {
            days: [WorkBounds::OFF; 7],
        }
    }

    /// Set the bounds of a single day
    #[must_use]
    pub const fn with_day(mut self, day: Weekday, bounds: WorkBounds) -> Self {
        self.days[day as usize] = bounds;
        self
    }

    /// Set the same bounds for Monday to Friday
    #[must_use]
    pub const fn with_weekdays(self, bounds: WorkBounds) -> Self {
        self.with_day(Weekday::Monday, bounds)
            .with_day(Weekday::Tuesday, bounds)
            .with_day(Weekday::Wednesday, bounds)
            .with_day(Weekday::Thursday, bounds)
            .with_day(Weekday::Friday, bounds)
    }

    pub const fn for_day(&self, day: Weekday) -> WorkBounds {
        self.days[day as usize]
    }

    /// Returns true if `now` on `day` is inside that day's work bounds
    pub fn is_working(&self, day: Weekday, now: TimeOfDay) -> bool {
        is_working(self.for_day(day), now)
    }
}
