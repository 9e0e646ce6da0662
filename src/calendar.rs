//! Calendar events and `gcalcli` agenda parsing
//!
//! The agenda is the tab separated output of
//! `gcalcli agenda --tsv --military`, one event per line:
//! `start_date start_time end_date end_time [...] title`.

use crate::bounds::{TimeOfDay, parse_time_of_day};

const HEADER_FIRST_COLUMN: &str = "start_date";
const START_TIME_COLUMN: usize = 1;
const END_TIME_COLUMN: usize = 3;
const MIN_COLUMNS: usize = 5;

/// A timed event of the current day
///
/// Start and end are not required to be ordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarEvent<'a> {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub title: Option<&'a str>,
}

impl<'a> CalendarEvent<'a> {
    pub const fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            start_time,
            end_time,
            title: None,
        }
    }

    #[must_use]
    pub const fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Returns true if `now` falls inside the event, both ends inclusive
    pub fn contains(&self, now: TimeOfDay) -> bool {
        now >= self.start_time && now <= self.end_time
    }
}

/// Parse one agenda line
///
/// Returns `None` for the header, blank lines, all-day events (no start or
/// end time) and lines with unparsable times.
pub fn parse_agenda_line(line: &str) -> Option<CalendarEvent<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    let mut columns: heapless::Vec<&str, 16> = heapless::Vec::new();
    for column in line.split('\t') {
        if columns.push(column).is_err() {
            break;
        }
    }
    if columns.len() < MIN_COLUMNS || columns[0] == HEADER_FIRST_COLUMN {
        return None;
    }

    let start = columns[START_TIME_COLUMN].trim();
    let end = columns[END_TIME_COLUMN].trim();
    if start.is_empty() || end.is_empty() {
        return None;
    }

    let title = line
        .rsplit('\t')
        .next()
        .map(str::trim)
        .filter(|title| !title.is_empty());

    Some(CalendarEvent {
        start_time: parse_time_of_day(start)?,
        end_time: parse_time_of_day(end)?,
        title,
    })
}

/// Iterate over every event of an agenda
pub fn parse_agenda(agenda: &str) -> impl Iterator<Item = CalendarEvent<'_>> {
    agenda.lines().filter_map(parse_agenda_line)
}
