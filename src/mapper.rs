//! Time to pixel mapping
//!
//! Places a time of day on the strip proportionally to its position inside
//! the work day.

use crate::bounds::{TimeOfDay, WorkBounds};

/// Signed pixel index
///
/// Signed because the flipped mapping is not range checked and may land on
/// either side of the strip.
pub type StripIndex = i64;

/// Marker for "this time does not land on a displayable pixel"
pub const INVALID_INDEX: StripIndex = -1;

/// First index that the unflipped mapping may return.
///
/// Pixels 0 and 1 are reserved and never receive time-mapped content.
const FIRST_MAPPED_INDEX: StripIndex = 2;

/// Map a time of day to a pixel index
///
/// The unflipped result is either [`INVALID_INDEX`] or a position in
/// `2..led_count`. The flipped result mirrors the raw position
/// (`led_count - 1 - raw`) without any range check, so it must go through
/// [`is_valid_index`] before being written.
///
/// Equal bounds divide by zero; the non-finite result is reported as
/// [`INVALID_INDEX`] in both directions.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn map_time_to_index(
    t: TimeOfDay,
    bounds: WorkBounds,
    led_count: usize,
    flip: bool,
) -> StripIndex {
    let position = libm::floor(led_count as f64 * (t - bounds.clock_in) / bounds.span());
    if !position.is_finite() {
        return INVALID_INDEX;
    }
    // Saturating float to int conversion
    let raw = position as StripIndex;
    let count = StripIndex::try_from(led_count).unwrap_or(StripIndex::MAX);

    if flip {
        return count.saturating_sub(1).saturating_sub(raw);
    }

    if raw < FIRST_MAPPED_INDEX || raw >= count {
        return INVALID_INDEX;
    }
    raw
}

/// Returns true if `index` addresses a pixel of a `led_count` strip
pub fn is_valid_index(index: StripIndex, led_count: usize) -> bool {
    index >= 0 && usize::try_from(index).is_ok_and(|i| i < led_count)
}
