//! Work day compositor
//!
//! Builds a complete frame in a fixed paint order: work day background,
//! calendar events, then the current time marker. Later layers overwrite
//! earlier ones.

use core::ops::Deref;

use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bounds::{TimeOfDay, WorkBounds};
use crate::calendar::CalendarEvent;
use crate::color::{Rgb, scale_color};
use crate::mapper::{StripIndex, is_valid_index, map_time_to_index};

/// Configuration for rendering the work day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Number of LEDs in the strip
    pub led_count: usize,
    /// Mirror the strip so the day runs from the last LED to the first
    pub flip: bool,
    /// Work day background
    pub bar_color: Rgb,
    /// Calendar event overlay
    pub event_color: Rgb,
    /// Current time marker
    pub current_time_color: Rgb,
    /// Per-segment brightness for background runs
    pub bar_brightness: Option<u8>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            led_count: 100,
            flip: false,
            bar_color: Rgb { r: 0, g: 25, b: 0 },
            event_color: Rgb { r: 0, g: 0, b: 255 },
            current_time_color: Rgb {
                r: 152,
                g: 80,
                b: 32,
            },
            bar_brightness: None,
        }
    }
}

/// A rendered frame, one color per LED
///
/// `N` is the maximum number of LEDs; the frame holds exactly as many pixels
/// as it was rendered for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer<const N: usize> {
    pixels: Vec<Rgb, N>,
}

impl<const N: usize> PixelBuffer<N> {
    /// Create a frame of `len` pixels filled with `color`
    ///
    /// `len` is clamped to the capacity `N`.
    pub fn filled(len: usize, color: Rgb) -> Self {
        let mut pixels = Vec::new();
        let _ = pixels.resize(len.min(N), color);
        Self { pixels }
    }

    /// Copy pixels from a slice, truncated to the capacity `N`
    pub fn from_slice(pixels: &[Rgb]) -> Self {
        let len = pixels.len().min(N);
        let mut buffer = Vec::new();
        let _ = buffer.extend_from_slice(&pixels[..len]);
        Self { pixels: buffer }
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn as_mut_slice(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// Paint a single pixel if `index` lies on the strip
    fn paint(&mut self, index: StripIndex, color: Rgb) {
        if !is_valid_index(index, self.pixels.len()) {
            return;
        }
        if let Ok(i) = usize::try_from(index) {
            self.pixels[i] = color;
        }
    }

    /// Paint the inclusive range `[from, to]`, skipping indices off the strip
    fn paint_range(&mut self, from: StripIndex, to: StripIndex, color: Rgb) {
        let last = StripIndex::try_from(self.pixels.len()).unwrap_or(StripIndex::MAX) - 1;
        let from = from.max(0);
        let to = to.min(last);
        for index in from..=to {
            self.paint(index, color);
        }
    }
}

impl<const N: usize> Deref for PixelBuffer<N> {
    type Target = [Rgb];

    fn deref(&self) -> &[Rgb] {
        &self.pixels
    }
}

/// Render the work day with a full-intensity time marker
///
/// A `led_count` above `N` is clamped to `N`, which shortens the frame and
/// also the scale times are mapped onto.
pub fn render<const N: usize>(
    now: TimeOfDay,
    bounds: WorkBounds,
    events: &[CalendarEvent<'_>],
    config: &RenderConfig,
) -> PixelBuffer<N> {
    render_with_marker_level(now, bounds, events, config, 255)
}

/// Render the work day, scaling the time marker color by `marker_level`
///
/// Events are painted only when both endpoints map onto the strip; an event
/// with one endpoint outside the work day is skipped entirely. Inverted
/// events are painted between the smaller and the larger index.
pub fn render_with_marker_level<const N: usize>(
    now: TimeOfDay,
    bounds: WorkBounds,
    events: &[CalendarEvent<'_>],
    config: &RenderConfig,
    marker_level: u8,
) -> PixelBuffer<N> {
    let mut frame = PixelBuffer::filled(config.led_count, config.bar_color);
    let led_count = frame.len();
    let map = |t: TimeOfDay| map_time_to_index(t, bounds, led_count, config.flip);

    for event in events {
        let start = map(event.start_time);
        let end = map(event.end_time);
        if start < 0 || end < 0 {
            #[cfg(feature = "esp32-log")]
            println!(
                "[render] skipping event {:?} ({} - {})",
                event.title, event.start_time, event.end_time
            );
            continue;
        }
        frame.paint_range(start.min(end), start.max(end), config.event_color);
    }

    let marker = map(now);
    frame.paint(marker, scale_color(config.current_time_color, marker_level));

    frame
}
