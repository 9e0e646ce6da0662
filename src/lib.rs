#![no_std]

pub mod bounds;
pub mod calendar;
pub mod color;
pub mod compositor;
pub mod effect;
pub mod frame_scheduler;
pub mod mapper;
pub mod math8;
pub mod schedule;
pub mod segment;

pub use bounds::{TimeOfDay, WorkBounds, parse_time_of_day, time_of_day};
pub use calendar::{CalendarEvent, parse_agenda, parse_agenda_line};
pub use compositor::{PixelBuffer, RenderConfig, render, render_with_marker_level};
pub use effect::{Effect, RainbowCycle};
pub use frame_scheduler::{DisplayScheduler, TickAction};
pub use mapper::{INVALID_INDEX, StripIndex, is_valid_index, map_time_to_index};
pub use schedule::{WeekSchedule, Weekday, is_working};
pub use segment::{Segment, SegmentList, Segments, decode, encode, segments};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};
