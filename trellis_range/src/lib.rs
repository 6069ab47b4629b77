// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Range: range-selection clients for calendar grids.
//!
//! These are the subscribers that interpret a gesture as *"the user is
//! sweeping out a range of empty calendar"*, as opposed to dragging an
//! existing event, which is the drag-reorder controller's interpretation.
//! Two geometries exist:
//!
//! - [`cells::CellRangeSelector`]: a date-cell row (month view row, all-day
//!   header). The selection is a discrete inclusive span of cell indices,
//!   projected from the drag rectangle by
//!   [`cell_span`](trellis_slots::cell_span).
//! - [`time::TimeRangeSelector`]: a day column in a time grid. The
//!   selection is a continuous start/end time range snapped to slots, with
//!   percent geometry for rendering.
//!
//! Both are plain state machines: each `on_*` method consumes one gesture
//! event's worth of pre-resolved facts and returns what changed. The
//! embedder registers thin closures on the
//! [`Selection`](trellis_gesture::Selection) hub that route events into
//! these methods and forward commits to its [`RangeHost`]; the
//! integration tests show the full wiring, including the
//! `ClearRangePreviews` broadcast that lets every resource column report
//! its deselected slots at commit time.
//!
//! A range client always *declines* the gesture while a drag session owns
//! it; the wiring passes that fact in, keeping the "at most one
//! authoritative interpretation" invariant in one visible place.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod cells;
pub mod time;

use kurbo::{Point, Rect};
use trellis_localizer::Timestamp;
use trellis_slots::ResourceId;

pub use cells::CellRangeSelector;
pub use time::TimeRangeSelector;

/// How a committed selection was produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectAction {
    /// A completed drag.
    Select,
    /// A click on a single cell or slot.
    Click,
    /// A double click on a single cell or slot.
    DoubleClick,
}

/// Whether a view participates in range selection at all.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Selectable {
    /// Range selection is off; the clients are not attached.
    No,
    /// Range selection is on.
    #[default]
    Yes,
    /// Range selection is on, and clicks landing on rendered events are
    /// ignored rather than interpreted as single-cell selections.
    IgnoreEvents,
}

impl Selectable {
    /// Whether the range clients should attach.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::No)
    }
}

/// A committed selection, as handed to [`RangeHost::on_select_slot`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotSelection {
    /// How the selection was produced.
    pub action: SelectAction,
    /// Range start (first selected slot).
    pub start: Timestamp,
    /// Range end (exclusive boundary of the last selected slot).
    pub end: Timestamp,
    /// The resource column the selection belongs to, if any.
    pub resource: Option<ResourceId>,
    /// The point that resolved the gesture, for click-shaped actions.
    pub point: Option<Point>,
    /// The final drag rectangle, for drag-shaped actions.
    pub bounds: Option<Rect>,
}

/// Host callbacks for range selection. All fire at most once per resolved
/// gesture.
pub trait RangeHost {
    /// A drag-selection gesture started.
    fn on_select_start(&mut self, point: Point) {
        let _ = point;
    }

    /// A continuous selection updated. Return `false` to veto this update;
    /// the previous range stays on screen.
    fn on_selecting(
        &mut self,
        start: Timestamp,
        end: Timestamp,
        resource: Option<ResourceId>,
    ) -> bool {
        let _ = (start, end, resource);
        true
    }

    /// A selection committed, with the resolved per-slot list.
    fn on_select_slot(&mut self, selection: &SlotSelection, slots: &[Timestamp]) {
        let _ = (selection, slots);
    }

    /// A drag-selection gesture finished (after the commit).
    fn on_select_end(&mut self) {}
}
