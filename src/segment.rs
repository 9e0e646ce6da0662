//! Run-length segment encoding
//!
//! LED controllers address the strip in segments: contiguous runs of a
//! single color. A frame is compressed into the shortest such list that
//! still covers every pixel.
//!
//! The encoded list always partitions `[0, len)`: segments are ordered,
//! contiguous, non-empty, and two neighbours never share a color.

use heapless::Vec;

use crate::color::Rgb;
use crate::compositor::{PixelBuffer, RenderConfig};

/// Contiguous run of identically colored pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// First pixel (inclusive)
    pub start: usize,
    /// End of the run (exclusive)
    pub stop: usize,
    pub color: Rgb,
}

impl Segment {
    pub const fn new(start: usize, stop: usize, color: Rgb) -> Self {
        Self { start, stop, color }
    }

    /// Number of pixels in the segment
    pub const fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Brightness to request for this segment, if any
    ///
    /// Only background runs carry a hint. The hint is presentation data and
    /// has no influence on where runs begin or end.
    pub fn brightness_hint(&self, config: &RenderConfig) -> Option<u8> {
        if self.color == config.bar_color {
            config.bar_brightness
        } else {
            None
        }
    }
}

/// Encoded frame with room for one segment per pixel
pub type SegmentList<const N: usize> = Vec<Segment, N>;

/// Iterator over the maximal runs of a pixel slice
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    pixels: &'a [Rgb],
    start: usize,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let color = *self.pixels.get(self.start)?;
        let run = self.pixels[self.start..]
            .iter()
            .take_while(|pixel| **pixel == color)
            .count();

        let segment = Segment::new(self.start, self.start + run, color);
        self.start = segment.stop;
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pixels.len().saturating_sub(self.start);
        (remaining.min(1), Some(remaining))
    }
}

/// Split a pixel slice into maximal same-color runs
pub fn segments(pixels: &[Rgb]) -> Segments<'_> {
    Segments { pixels, start: 0 }
}

/// Encode a frame into its segment list
pub fn encode<const N: usize>(frame: &PixelBuffer<N>) -> SegmentList<N> {
    let mut list = SegmentList::new();
    for segment in segments(frame) {
        // A frame of N pixels has at most N runs
        let _ = list.push(segment);
    }
    list
}

/// Expand segments back into a frame
///
/// Pixels past the capacity `N` are dropped.
pub fn decode<const N: usize>(segments: &[Segment]) -> PixelBuffer<N> {
    let len = segments.iter().map(|s| s.stop).max().unwrap_or(0);
    let mut frame = PixelBuffer::filled(len, Rgb::default());
    let pixels = frame.as_mut_slice();
    for segment in segments {
        let stop = segment.stop.min(pixels.len());
        if segment.start < stop {
            pixels[segment.start..stop].fill(segment.color);
        }
    }
    frame
}
