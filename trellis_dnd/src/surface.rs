// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendered-grid capability: what is drawn where.
//!
//! Drag controllers need to know whether a press landed on a rendered
//! event, and if so which resize handle (if any) it grabbed. The
//! presentation layer answers through [`GridSurface`], resolved fresh per
//! query, since event boxes move whenever the grid relays out.

use kurbo::{Point, Rect};
use trellis_localizer::{Localizer, Timestamp};
use trellis_slots::ResourceId;

/// Identifier of a calendar event entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventId(pub u64);

/// The slice of a calendar event the drag controllers need.
///
/// This is a value snapshot, not the host's entity: previews are computed
/// on copies and the real entity is only touched when the host commits a
/// drop or resize through its own callback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridEvent {
    /// Host entity id, round-tripped through callbacks.
    pub id: EventId,
    /// Event start.
    pub start: Timestamp,
    /// Event end.
    pub end: Timestamp,
    /// Resource column, in resource-partitioned views.
    pub resource: Option<ResourceId>,
    /// Whether the event lives in the all-day/span layer.
    pub all_day: bool,
}

impl GridEvent {
    /// Event duration in milliseconds.
    ///
    /// Durations are always carried in milliseconds so they survive
    /// daylight-saving transitions unchanged.
    #[must_use]
    pub fn duration_ms(&self, loc: &impl Localizer) -> i64 {
        loc.diff_ms(self.start, self.end)
    }
}

/// Which edge of an event a resize handle controls.
///
/// Time-grid events expose `Up`/`Down` handles; span-row events expose
/// `Left`/`Right`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// The start edge of a time-grid event.
    Up,
    /// The end edge of a time-grid event.
    Down,
    /// The start edge of a span-row event.
    Left,
    /// The end edge of a span-row event.
    Right,
}

/// A resolved hit on a rendered event node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventHit {
    /// The event under the point.
    pub event: GridEvent,
    /// The rendered node's page bounds.
    pub bounds: Rect,
    /// The resize handle grabbed, if the point landed on one.
    pub handle: Option<Direction>,
}

/// One rendered container (day column or span row) of the grid.
pub trait GridSurface {
    /// Current page bounds of the container.
    fn bounds(&self) -> Rect;

    /// The rendered event under `point`, if any.
    fn event_at(&self, point: Point) -> Option<EventHit>;
}
