// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous time-range selection for one day column.

use alloc::vec::Vec;
use kurbo::{Point, Rect};
use trellis_localizer::{Localizer, Timestamp, Unit};
use trellis_slots::{SlotMetrics, SlotRange};

/// Per-column state for continuous time-range selection.
///
/// The first projected slot of a gesture becomes the fixed corner; every
/// later update sweeps the other corner to the slot under the pointer. The
/// moving edge is extended by one slot so the band always covers the slot
/// the pointer rests in, whichever direction the drag goes.
#[derive(Copy, Clone, Debug, Default)]
pub struct TimeRangeSelector {
    selecting: bool,
    initial_slot: Option<Timestamp>,
    range: Option<SlotRange>,
}

impl TimeRangeSelector {
    /// A selector with no gesture in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is currently highlighting this column.
    #[must_use]
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// The current highlighted range, while selecting.
    #[must_use]
    pub fn range(&self) -> Option<SlotRange> {
        self.range
    }

    /// Projects one `Selecting` pointer position into a candidate range.
    ///
    /// Records the gesture's fixed corner on the first call. The candidate
    /// is *not* stored; the wiring first offers it to the host's
    /// `on_selecting` veto and calls [`TimeRangeSelector::apply`] only when
    /// the update is accepted, so a vetoed update leaves the previous range
    /// on screen.
    pub fn on_selecting(
        &mut self,
        loc: &impl Localizer,
        metrics: &SlotMetrics,
        column_bounds: Rect,
        pointer: Point,
    ) -> SlotRange {
        let current = metrics.closest_slot_from_point(pointer.y, column_bounds);
        if !self.selecting {
            self.selecting = true;
            self.initial_slot = Some(current);
        }
        self.candidate(loc, metrics, current)
    }

    /// Stores an accepted candidate. Returns `false` when the range did not
    /// actually change (callers skip re-rendering then).
    pub fn apply(&mut self, range: SlotRange) -> bool {
        if self
            .range
            .is_some_and(|r| r.start == range.start && r.end == range.end)
        {
            return false;
        }
        self.range = Some(range);
        true
    }

    /// The one-slot range for a click-shaped gesture on this column.
    #[must_use]
    pub fn single_slot(
        &self,
        loc: &impl Localizer,
        metrics: &SlotMetrics,
        point: Point,
        column_bounds: Rect,
    ) -> SlotRange {
        let slot = metrics.closest_slot_from_point(point.y, column_bounds);
        metrics.range(loc, slot, metrics.next_slot(loc, slot), false, false)
    }

    /// Clears the column's highlight and reports what it was.
    pub fn clear(&mut self) -> Option<SlotRange> {
        let range = self.range.take();
        self.selecting = false;
        self.initial_slot = None;
        range
    }

    /// Cancels without reporting; the `Reset` path.
    pub fn on_reset(&mut self) {
        self.selecting = false;
        self.initial_slot = None;
        self.range = None;
    }

    fn candidate(
        &self,
        loc: &impl Localizer,
        metrics: &SlotMetrics,
        current: Timestamp,
    ) -> SlotRange {
        let mut initial = self.initial_slot.unwrap_or(current);
        let mut current = current;

        // Extend the moving edge one slot past the pointer's slot so the
        // band covers it in either drag direction.
        if loc.lte(initial, current) {
            current = metrics.next_slot(loc, current);
        } else {
            initial = metrics.next_slot(loc, initial);
        }

        metrics.range(
            loc,
            loc.min(initial, current),
            loc.max(initial, current),
            false,
            false,
        )
    }
}

/// Expands a committed range into the per-slot list handed to the host.
///
/// Steps by raw milliseconds rather than calendar minutes: on the day a
/// DST transition repeats a wall-clock hour, calendar stepping would never
/// pass the repeated hour and loop forever.
#[must_use]
pub fn slot_list(
    loc: &impl Localizer,
    start: Timestamp,
    end: Timestamp,
    step_minutes: i64,
) -> Vec<Timestamp> {
    let step_ms = step_minutes.max(1) * 60_000;
    let mut slots = Vec::new();
    let mut current = start;
    while loc.lte(current, end) {
        slots.push(current);
        current = loc.add(current, step_ms, Unit::Milliseconds);
    }
    slots
}
