// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Slots: pixel-to-slot projection for calendar grids.
//!
//! Selection and drag previews need to translate between page pixels and
//! calendar positions in two geometries:
//!
//! - A **time column** (day view, one column of a week view): vertical,
//!   continuous. [`SlotMetrics`] divides the column's day window into
//!   fixed-width slots and answers "which slot is under this y pixel",
//!   "what is the next slot", and "where does this time range sit as
//!   percent top/height of the column".
//! - A **date-cell row** (month view row, all-day header row): horizontal,
//!   discrete. [`slot_at_x`] maps an x pixel to a cell index and
//!   [`cell_span`] projects a whole drag rectangle onto an inclusive cell
//!   range, including the multi-row cases where the drag started above or
//!   below the row being asked.
//!
//! All calendar arithmetic is delegated to the injected
//! [`Localizer`](trellis_localizer::Localizer); this crate only decides
//! which slot boundaries to ask about.
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

use kurbo::{Point, Rect};
use trellis_localizer::{Localizer, Timestamp, Unit};

const MS_PER_MINUTE: i64 = 60_000;

/// A resolved continuous time range inside one column.
///
/// `top` and `height` are percentages of the column height, clamped to the
/// column's day window, ready to hand to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotRange {
    /// Range start.
    pub start: Timestamp,
    /// Range end.
    pub end: Timestamp,
    /// Offset of the range top, in percent of the column height.
    pub top: f64,
    /// Height of the range, in percent of the column height.
    pub height: f64,
}

/// Slot geometry for one time column.
///
/// A column covers the window `min..max` divided into `num_slots` slots of
/// `step` minutes each. Slot boundaries are absolute offsets from `min`;
/// what those instants mean on the wall clock is the localizer's business.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotMetrics {
    min: Timestamp,
    max: Timestamp,
    step_ms: i64,
    num_slots: usize,
}

impl SlotMetrics {
    /// Builds metrics for the window `min..max` with `step_minutes` slots.
    ///
    /// The window is snapped up to a whole number of slots, mirroring how a
    /// rendered column always shows complete slots. A window of zero or
    /// negative length degrades to a single slot so every projection still
    /// lands somewhere.
    #[must_use]
    pub fn new(min: Timestamp, max: Timestamp, step_minutes: i64) -> Self {
        let step_ms = step_minutes.max(1) * MS_PER_MINUTE;
        let window = (max.millis() - min.millis()).max(step_ms);
        let num_slots = ((window + step_ms - 1) / step_ms) as usize;
        Self {
            min,
            max,
            step_ms,
            num_slots,
        }
    }

    /// Start of the column's day window.
    #[must_use]
    pub fn min(&self) -> Timestamp {
        self.min
    }

    /// End of the column's day window.
    #[must_use]
    pub fn max(&self) -> Timestamp {
        self.max
    }

    /// Number of slots in the column.
    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    fn slot_start(&self, index: usize) -> Timestamp {
        let index = index.min(self.num_slots.saturating_sub(1));
        Timestamp::from_millis(self.min.millis() + index as i64 * self.step_ms)
    }

    /// The slot whose band contains the vertical position `y` within
    /// `bounds`.
    ///
    /// Positions above the column clamp to the first slot, below it to the
    /// last; a pointer that drifts out of the column during a drag still
    /// resolves to a usable slot.
    #[must_use]
    pub fn closest_slot_from_point(&self, y: f64, bounds: Rect) -> Timestamp {
        let range = (bounds.y1 - bounds.y0).abs();
        if range <= 0.0 {
            return self.min;
        }
        let percent = (y - bounds.y0) / range;
        self.closest_slot_to_position(percent)
    }

    /// The slot at a fractional position (`0.0` = top, `1.0` = bottom).
    #[must_use]
    pub fn closest_slot_to_position(&self, percent: f64) -> Timestamp {
        let raw = percent * self.num_slots as f64;
        let index = (raw.floor().max(0.0) as usize).min(self.num_slots - 1);
        self.slot_start(index)
    }

    /// The slot containing `date`, shifted by `offset` slots and clamped to
    /// the column.
    #[must_use]
    pub fn closest_slot_from_date(&self, loc: &impl Localizer, date: Timestamp, offset: i64) -> Timestamp {
        if loc.lt(date, self.min) {
            return self.slot_start(0);
        }
        if loc.gt(date, self.max) {
            return self.slot_start(self.num_slots - 1);
        }
        let diff = loc.diff_ms(self.min, date);
        let index = (diff.div_euclid(self.step_ms) + offset).clamp(0, self.num_slots as i64 - 1);
        self.slot_start(index as usize)
    }

    /// The slot after `slot`, or one step past the column end when `slot`
    /// is already the last slot.
    #[must_use]
    pub fn next_slot(&self, loc: &impl Localizer, slot: Timestamp) -> Timestamp {
        let diff = loc.diff_ms(self.min, slot);
        let index = diff.div_euclid(self.step_ms);
        if index + 1 < self.num_slots as i64 {
            self.slot_start((index + 1).max(0) as usize)
        } else {
            loc.add(slot, self.step_ms, Unit::Milliseconds)
        }
    }

    /// Offset of `date` from the window start, in milliseconds, clamped to
    /// the window.
    #[must_use]
    pub fn position_from_date(&self, loc: &impl Localizer, date: Timestamp) -> i64 {
        loc.diff_ms(self.min, date).clamp(0, self.total_ms())
    }

    fn total_ms(&self) -> i64 {
        self.step_ms * self.num_slots as i64
    }

    /// Resolves `start..end` into a [`SlotRange`] with percent geometry.
    ///
    /// Unless the corresponding `ignore_*` flag is set, each edge is clamped
    /// into the column's window first; a preview for an event that begins
    /// yesterday still renders from the top of today's column. The returned
    /// `start`/`end` are the clamped instants.
    #[must_use]
    pub fn range(
        &self,
        loc: &impl Localizer,
        start: Timestamp,
        end: Timestamp,
        ignore_min: bool,
        ignore_max: bool,
    ) -> SlotRange {
        let mut range_start = start;
        let mut range_end = end;
        if !ignore_min {
            range_start = loc.min(self.max, loc.max(self.min, range_start));
        }
        if !ignore_max {
            range_end = loc.min(self.max, loc.max(self.min, range_end));
        }

        let total = self.total_ms() as f64;
        let top = self.position_from_date(loc, range_start) as f64 / total * 100.0;
        let bottom = self.position_from_date(loc, range_end) as f64 / total * 100.0;
        SlotRange {
            start: range_start,
            end: range_end,
            top,
            height: bottom - top,
        }
    }

    /// `true` when `date` lies before the column's window.
    #[must_use]
    pub fn starts_before_day(&self, loc: &impl Localizer, date: Timestamp) -> bool {
        loc.lt(date, self.min)
    }

    /// `true` when `date` lies after the column's window.
    #[must_use]
    pub fn ends_after_day(&self, loc: &impl Localizer, date: Timestamp) -> bool {
        loc.gt(date, self.max)
    }
}

/// Identifier of a resource column in a resource-partitioned view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u64);

/// An inclusive cell-index span within a date-cell row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellSpan {
    /// First selected cell index.
    pub start_idx: usize,
    /// Last selected cell index (inclusive).
    pub end_idx: usize,
}

/// Calendar shape of one date-cell row: which days its cells show.
///
/// Pixel geometry is deliberately not stored here: rows move and resize,
/// so bounds are passed into each query the way the platform reports them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowMetrics {
    /// Start of the first cell's day.
    pub first: Timestamp,
    /// Number of day cells in the row.
    pub day_count: usize,
    /// Right-to-left cell order.
    pub rtl: bool,
}

impl RowMetrics {
    /// Start of the day shown by cell `index`.
    #[must_use]
    pub fn date_for_slot(&self, loc: &impl Localizer, index: usize) -> Timestamp {
        loc.add(self.first, index as i64, Unit::Days)
    }

    /// Start of the last cell's day.
    #[must_use]
    pub fn last(&self, loc: &impl Localizer) -> Timestamp {
        self.date_for_slot(loc, self.day_count.saturating_sub(1))
    }

    /// Whether `t` falls within the row's days.
    #[must_use]
    pub fn in_range(&self, loc: &impl Localizer, t: Timestamp) -> bool {
        let end = loc.add(self.first, self.day_count as i64, Unit::Days);
        loc.gte(t, self.first) && loc.lt(t, end)
    }

    /// The day index `t` falls on, relative to the row's first day.
    ///
    /// Unclamped: negative before the row, `>= day_count` after it. The
    /// division rounds to the nearest whole day so 23- and 25-hour calendar
    /// days still land on the right cell.
    #[must_use]
    pub fn index_of(&self, loc: &impl Localizer, t: Timestamp) -> i64 {
        const MS_PER_DAY: i64 = 86_400_000;
        let diff = loc.diff_ms(loc.start_of(self.first, Unit::Days), loc.start_of(t, Unit::Days));
        // Round-to-nearest division, valid for negative diffs too.
        (diff + MS_PER_DAY / 2).div_euclid(MS_PER_DAY)
    }

    /// The cell index under the horizontal position `x` within `bounds`.
    #[must_use]
    pub fn slot_at(&self, bounds: Rect, x: f64) -> usize {
        slot_at_x(bounds, x, self.rtl, self.day_count)
    }
}

/// The cell index under the horizontal position `x` within `row`.
///
/// Cells are equal-width; in right-to-left layout the index counts from the
/// right edge. Positions outside the row clamp to the nearest cell.
#[must_use]
pub fn slot_at_x(row: Rect, x: f64, rtl: bool, slots: usize) -> usize {
    if slots == 0 {
        return 0;
    }
    let cell_width = row.width() / slots as f64;
    if cell_width <= 0.0 {
        return 0;
    }
    let index = (((x - row.x0) / cell_width).floor().max(0.0) as usize).min(slots - 1);
    if rtl { slots - 1 - index } else { index }
}

/// Projects a drag rectangle onto one row's inclusive cell span.
///
/// `initial` is the gesture anchor, `pointer` the current pointer position,
/// and `rect` the live selection rectangle (whose corners are those two
/// points). The row being asked may be the anchor's row, the pointer's row,
/// a row entirely between them, or unrelated:
///
/// - a row strictly between anchor and pointer is fully selected;
/// - the pointer's row is selected from its leading edge to the pointer
///   (from the pointer to its trailing edge when dragging upward);
/// - the anchor's row anchors the span at the anchor cell and extends
///   toward the pointer, or to the row edge when the pointer left the row;
/// - anything else reports no span.
#[must_use]
pub fn cell_span(
    initial: Point,
    row: Rect,
    rect: Rect,
    pointer: Point,
    slots: usize,
    rtl: bool,
) -> Option<CellSpan> {
    if slots == 0 {
        return None;
    }
    let last_slot = slots - 1;
    let mut span: Option<CellSpan> = None;

    let current_slot = slot_at_x(row, pointer.x, rtl, slots);

    let is_current_row = row.y0 < pointer.y && row.y1 > pointer.y;
    let is_start_row = row.y0 < initial.y && row.y1 > initial.y;

    let is_above_start = initial.y > row.y1;
    let is_below_start = row.y0 > initial.y;
    let is_between = rect.y0 < row.y0 && rect.y1 > row.y1;

    if is_between {
        span = Some(CellSpan {
            start_idx: 0,
            end_idx: last_slot,
        });
    }

    if is_current_row {
        if is_below_start {
            span = Some(CellSpan {
                start_idx: 0,
                end_idx: current_slot,
            });
        } else if is_above_start {
            span = Some(CellSpan {
                start_idx: current_slot,
                end_idx: last_slot,
            });
        }
    }

    if is_start_row {
        let anchor_slot = slot_at_x(row, initial.x, rtl, slots);
        let mut start_idx = anchor_slot;
        let mut end_idx = anchor_slot;

        if is_current_row {
            if current_slot < start_idx {
                start_idx = current_slot;
            } else {
                end_idx = current_slot;
            }
        } else if initial.y < pointer.y {
            // The pointer moved to a later row: extend to the row's end.
            end_idx = last_slot;
        } else {
            // The pointer moved to an earlier row: extend to the row's start.
            start_idx = 0;
        }
        span = Some(CellSpan { start_idx, end_idx });
    }

    span
}
