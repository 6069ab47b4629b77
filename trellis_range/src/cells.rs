// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete cell-span selection for one date-cell row.

use kurbo::{Point, Rect};
use trellis_geometry::{Tolerance, objects_collide, point_in_box};
use trellis_gesture::events::SelectRect;
use trellis_slots::{CellSpan, cell_span};

/// What one `Selecting` event changed for a row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellUpdate {
    /// Set on the first update of a gesture: the point to report through
    /// `on_select_start`.
    pub select_start: Option<Point>,
    /// The row's current highlighted span, if the rectangle touches it.
    pub span: Option<CellSpan>,
}

/// Per-row state for background-cell range selection.
///
/// One instance per rendered row (per resource, in resource views). The
/// row's pixel bounds are passed into each call because rows move under
/// scrolling and relayout.
#[derive(Copy, Clone, Debug, Default)]
pub struct CellRangeSelector {
    selecting: bool,
    initial: Option<Point>,
    span: Option<CellSpan>,
}

impl CellRangeSelector {
    /// A selector with no gesture in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is currently highlighting this row.
    #[must_use]
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// The currently highlighted span, while selecting.
    #[must_use]
    pub fn span(&self) -> Option<CellSpan> {
        self.span
    }

    /// Routes one `Selecting` rectangle into the row.
    ///
    /// The first update of a gesture records the pointer as the projection
    /// anchor and asks the wiring to fire `on_select_start`. The span is
    /// recomputed from scratch on every call; a rectangle that no longer
    /// touches the row clears the row's highlight without ending the
    /// gesture.
    pub fn on_selecting(&mut self, rect: &SelectRect, row_bounds: Rect, slots: usize, rtl: bool) -> CellUpdate {
        let select_start = if self.selecting {
            None
        } else {
            self.selecting = true;
            self.initial = Some(rect.pointer);
            Some(rect.pointer)
        };

        let initial = self.initial.unwrap_or(rect.pointer);
        let span = if objects_collide(rect.bounds, row_bounds, Tolerance::ZERO) {
            cell_span(initial, row_bounds, rect.bounds, rect.pointer, slots, rtl)
        } else {
            None
        };
        self.span = span;

        CellUpdate { select_start, span }
    }

    /// The single-cell span for a click-shaped gesture, or `None` when the
    /// point misses the row.
    ///
    /// The caller has already established that the point did not land on a
    /// rendered event or an overflow indicator.
    #[must_use]
    pub fn single_cell(&self, point: Point, row_bounds: Rect, slots: usize, rtl: bool) -> Option<CellSpan> {
        if !point_in_box(row_bounds, point) {
            return None;
        }
        let idx = trellis_slots::slot_at_x(row_bounds, point.x, rtl, slots);
        Some(CellSpan {
            start_idx: idx,
            end_idx: idx,
        })
    }

    /// Clears the row's highlight and reports what it was.
    ///
    /// This is the row's answer to the `ClearRangePreviews` broadcast: at
    /// commit time the initiating row aggregates every row's cleared span
    /// into the final slot list.
    pub fn clear(&mut self) -> Option<CellSpan> {
        let span = self.span.take();
        self.selecting = false;
        self.initial = None;
        span
    }

    /// Cancels without reporting; the `Reset` path.
    pub fn on_reset(&mut self) {
        self.selecting = false;
        self.initial = None;
        self.span = None;
    }
}
