// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-column drag controller for the time grid.
//!
//! One controller per rendered day column. Exactly one column drives the
//! preview at a time (the session's origin); the others watch the pointer
//! and clear their stale preview the moment it leaves them, which is how a
//! drag travels across a week view without two columns showing the same
//! event.

use kurbo::{Point, Rect};

use trellis_gesture::events::SelectRect;
use trellis_localizer::{Localizer, Timestamp, Unit};
use trellis_slots::{ResourceId, SlotMetrics};

use crate::ClaimDecision;
use crate::coordinator::{DndHost, DragCoordinator, OutsideDrop};
use crate::session::{DragAction, FinishInfo, OriginId};
use crate::surface::{Direction, GridEvent, GridSurface};

/// Whether a pointer counts as inside a day column.
///
/// The right edge gets 10px of slack: event boxes render a hair past the
/// column border under the scrollbar gutter, and a drag along the border
/// must not flicker between neighbors. There is deliberately no bottom
/// check, so a drag that overshoots the last slot still resolves into this
/// column.
#[must_use]
pub fn point_in_column(bounds: Rect, point: Point) -> bool {
    point.x < bounds.x1 + 10.0 && point.x > bounds.x0 && point.y > bounds.y0
}

/// The in-flight preview a column renders during a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotPreview {
    /// The dragged event (snapshot).
    pub event: GridEvent,
    /// Preview start.
    pub start: Timestamp,
    /// Preview end.
    pub end: Timestamp,
    /// Top of the preview box, percent of column height.
    pub top: f64,
    /// Height of the preview box, percent of column height.
    pub height: f64,
}

/// Drag controller for one time-grid day column.
#[derive(Copy, Clone, Debug)]
pub struct TimeGridController {
    origin: OriginId,
    resource: Option<ResourceId>,
    preview: Option<SlotPreview>,
}

impl TimeGridController {
    /// A controller identified by `origin`, serving `resource`'s column.
    #[must_use]
    pub fn new(origin: OriginId, resource: Option<ResourceId>) -> Self {
        Self {
            origin,
            resource,
            preview: None,
        }
    }

    /// This column's origin id.
    #[must_use]
    pub fn origin(&self) -> OriginId {
        self.origin
    }

    /// The live preview, if this column currently holds it.
    #[must_use]
    pub fn preview(&self) -> Option<SlotPreview> {
        self.preview
    }

    /// Routes a gesture-opening press.
    ///
    /// A press on a rendered event claims the gesture and opens a session
    /// (move, or resize when a handle was grabbed); a press on empty column
    /// space declines so the range selector underneath can interpret it. A
    /// press while a session is already active is rejected outright, which
    /// short-circuits every later subscriber.
    pub fn on_before_select(
        &mut self,
        point: Point,
        surface: &impl GridSurface,
        coordinator: &mut DragCoordinator,
        host: &mut impl DndHost,
        resizable: bool,
    ) -> ClaimDecision {
        if coordinator.is_dragging() {
            return ClaimDecision::Reject;
        }
        let Some(hit) = surface.event_at(point) else {
            return ClaimDecision::Decline;
        };

        let (action, direction) = match hit.handle {
            Some(dir) if resizable => (DragAction::Resize, Some(dir)),
            _ => (DragAction::Move, None),
        };
        let grab_offset_top = point.y - hit.bounds.y0;
        match coordinator.begin(host, hit.event, action, direction, self.origin, grab_offset_top) {
            Some(_) => ClaimDecision::Claim,
            None => ClaimDecision::Decline,
        }
    }

    /// Routes one `Selecting` rectangle. Returns whether this column now
    /// holds the preview.
    pub fn on_selecting(
        &mut self,
        loc: &impl Localizer,
        rect: &SelectRect,
        surface: &impl GridSurface,
        metrics: &SlotMetrics,
        coordinator: &mut DragCoordinator,
    ) -> bool {
        let Some((_, session)) = coordinator.active() else {
            return false;
        };
        let session = *session;
        let bounds = surface.bounds();

        match session.action {
            DragAction::Move => {
                if !point_in_column(bounds, rect.pointer) {
                    // The pointer left: a sibling column takes over.
                    self.preview = None;
                    return false;
                }
                coordinator.set_origin(self.origin);
                coordinator.mark_moved();

                let new_start = metrics
                    .closest_slot_from_point(rect.pointer.y - session.grab_offset_top, bounds);
                let duration = session.duration_ms();
                let new_end = loc.add(new_start, duration, Unit::Milliseconds);
                // The end may hang past this day; only the start is clamped.
                let range = metrics.range(loc, new_start, new_end, false, true);
                self.update(session.event, range.start, range.end, range.top, range.height);
                true
            }
            DragAction::Resize => {
                if !point_in_column(bounds, rect.pointer) {
                    return false;
                }
                coordinator.mark_moved();

                let new_time = metrics.closest_slot_from_point(rect.pointer.y, bounds);
                let (start, end) = (session.event.start, session.event.end);
                match session.direction {
                    Some(Direction::Up) => {
                        // The moving start stops one slot short of the fixed
                        // end; the end itself is carried verbatim, even when
                        // it lies past this day's boundary.
                        let new_start =
                            loc.min(new_time, metrics.closest_slot_from_date(loc, end, -1));
                        let range = metrics.range(loc, new_start, end, false, false);
                        self.update(session.event, range.start, end, range.top, range.height);
                        true
                    }
                    Some(Direction::Down) => {
                        let new_end =
                            loc.max(new_time, metrics.closest_slot_from_date(loc, start, 0));
                        let range = metrics.range(loc, start, new_end, false, false);
                        self.update(session.event, start, range.end, range.top, range.height);
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    /// Routes the gesture end. The column holding the preview commits it;
    /// every other column reports `false` so the real owner can finish.
    pub fn on_end_move(
        &mut self,
        coordinator: &mut DragCoordinator,
        host: &mut impl DndHost,
    ) -> bool {
        let Some(preview) = self.preview.take() else {
            return false;
        };
        coordinator.finish(
            host,
            Some(FinishInfo {
                start: preview.start,
                end: preview.end,
                resource: self.resource,
                all_day: false,
            }),
        );
        true
    }

    /// An external item dropped over the grid. Places a one-slot event at
    /// the pointer when the drop lands in this column.
    pub fn on_drop_from_outside(
        &mut self,
        loc: &impl Localizer,
        point: Point,
        surface: &impl GridSurface,
        metrics: &SlotMetrics,
        host: &mut impl DndHost,
    ) -> bool {
        let bounds = surface.bounds();
        if !point_in_column(bounds, point) {
            return false;
        }
        let start = metrics.closest_slot_from_point(point.y, bounds);
        host.on_drop_from_outside(&OutsideDrop {
            start,
            end: metrics.next_slot(loc, start),
            all_day: false,
            resource: self.resource,
        });
        true
    }

    /// An external item dragged across the grid: previews a one-slot
    /// placement under the pointer.
    pub fn on_drag_over_from_outside(
        &mut self,
        loc: &impl Localizer,
        point: Point,
        surface: &impl GridSurface,
        metrics: &SlotMetrics,
        host: &mut impl DndHost,
    ) -> bool {
        let Some(item) = host.drag_from_outside_item() else {
            return false;
        };
        let bounds = surface.bounds();
        if !point_in_column(bounds, point) {
            self.preview = None;
            return false;
        }
        host.on_drag_over_from_outside(point);
        let start = metrics.closest_slot_from_point(point.y, bounds);
        let end = metrics.next_slot(loc, start);
        let range = metrics.range(loc, start, end, false, true);
        self.update(item, range.start, range.end, range.top, range.height);
        true
    }

    /// A click resolved the gesture: a tap on an event without movement.
    /// The session dies with no callback.
    pub fn on_click(&mut self, coordinator: &mut DragCoordinator) {
        self.preview = None;
        coordinator.cancel();
    }

    /// A `Reset` broadcast: discard everything, no callback.
    pub fn on_reset(&mut self, coordinator: &mut DragCoordinator) {
        self.preview = None;
        coordinator.cancel();
    }

    fn update(&mut self, event: GridEvent, start: Timestamp, end: Timestamp, top: f64, height: f64) {
        if self
            .preview
            .is_some_and(|p| p.start == start && p.end == end)
        {
            return;
        }
        self.preview = Some(SlotPreview {
            event,
            start,
            end,
            top,
            height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_membership_has_right_edge_slack_and_no_bottom() {
        let bounds = Rect::new(100.0, 0.0, 200.0, 480.0);
        assert!(point_in_column(bounds, Point::new(150.0, 10.0)));
        assert!(point_in_column(bounds, Point::new(205.0, 10.0)));
        assert!(!point_in_column(bounds, Point::new(215.0, 10.0)));
        assert!(!point_in_column(bounds, Point::new(50.0, 10.0)));
        // Below the column still counts.
        assert!(point_in_column(bounds, Point::new(150.0, 900.0)));
        // Above does not.
        assert!(!point_in_column(bounds, Point::new(150.0, -5.0)));
    }
}
