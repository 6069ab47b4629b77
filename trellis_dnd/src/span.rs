// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-row drag controller for span layers (month rows, all-day rows).
//!
//! Events here occupy horizontal runs of day cells. Moving an event changes
//! which day it starts on while keeping its time of day and duration;
//! resizing drags one end across day cells, and dragging past the row's
//! edge extends the event into the neighboring week while the off-row edge
//! keeps its original time of day.

use kurbo::{Point, Rect};

use trellis_geometry::point_in_box;
use trellis_gesture::events::SelectRect;
use trellis_localizer::{Localizer, Timestamp, Unit};
use trellis_slots::{CellSpan, ResourceId, RowMetrics};

use crate::ClaimDecision;
use crate::coordinator::{DndHost, DragCoordinator};
use crate::session::{DragAction, FinishInfo, OriginId};
use crate::surface::{Direction, GridEvent, GridSurface};

/// The in-flight preview a span row renders during a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpanPreview {
    /// The dragged event (snapshot).
    pub event: GridEvent,
    /// Preview start.
    pub start: Timestamp,
    /// Preview end.
    pub end: Timestamp,
    /// The day cells the preview covers within this row.
    pub span: CellSpan,
}

/// Drag controller for one span row.
#[derive(Copy, Clone, Debug)]
pub struct SpanController {
    origin: OriginId,
    resource: Option<ResourceId>,
    all_day: bool,
    preview: Option<SpanPreview>,
}

impl SpanController {
    /// A controller identified by `origin`, serving one row.
    #[must_use]
    pub fn new(origin: OriginId, resource: Option<ResourceId>, all_day: bool) -> Self {
        Self {
            origin,
            resource,
            all_day,
            preview: None,
        }
    }

    /// The live preview, if this row currently holds it.
    #[must_use]
    pub fn preview(&self) -> Option<SpanPreview> {
        self.preview
    }

    /// Routes a gesture-opening press landing anywhere on the page.
    ///
    /// Presses outside this row decline immediately (a time column below
    /// may claim instead); presses on empty row space decline so the
    /// background cells can range-select; presses on a rendered event open
    /// a session and claim.
    pub fn on_before_select(
        &mut self,
        point: Point,
        row_bounds: Rect,
        surface: &impl GridSurface,
        coordinator: &mut DragCoordinator,
        host: &mut impl DndHost,
        resizable: bool,
    ) -> ClaimDecision {
        if coordinator.is_dragging() {
            return ClaimDecision::Reject;
        }
        if !point_in_box(row_bounds, point) {
            return ClaimDecision::Decline;
        }
        let Some(hit) = surface.event_at(point) else {
            return ClaimDecision::Decline;
        };

        let (action, direction) = match hit.handle {
            Some(dir) if resizable => (DragAction::Resize, Some(dir)),
            _ => (DragAction::Move, None),
        };
        match coordinator.begin(host, hit.event, action, direction, self.origin, 0.0) {
            Some(_) => ClaimDecision::Claim,
            None => ClaimDecision::Decline,
        }
    }

    /// Routes one `Selecting` rectangle. Returns whether this row now holds
    /// the preview.
    pub fn on_selecting(
        &mut self,
        loc: &impl Localizer,
        rect: &SelectRect,
        row_bounds: Rect,
        row: &RowMetrics,
        coordinator: &mut DragCoordinator,
    ) -> bool {
        let Some((_, session)) = coordinator.active() else {
            return false;
        };
        let session = *session;

        match session.action {
            DragAction::Move => {
                if !point_in_box(row_bounds, rect.pointer) {
                    self.preview = None;
                    return false;
                }
                coordinator.set_origin(self.origin);
                coordinator.mark_moved();

                // Land on the day under the pointer, keep the time of day.
                let slot = row.slot_at(row_bounds, rect.pointer.x);
                let date = row.date_for_slot(loc, slot);
                let start = loc.merge(date, session.event.start);
                let end = loc.add(start, session.duration_ms(), Unit::Milliseconds);
                self.update(loc, row, session.event, start, end)
            }
            DragAction::Resize => {
                coordinator.mark_moved();
                let resized = match session.direction {
                    Some(Direction::Right) => {
                        self.resize_right(loc, rect.pointer, row_bounds, row, &session.event)
                    }
                    Some(Direction::Left) => {
                        self.resize_left(loc, rect.pointer, row_bounds, row, &session.event)
                    }
                    _ => None,
                };
                match resized {
                    Some((start, end)) => self.update(loc, row, session.event, start, end),
                    None => {
                        self.preview = None;
                        false
                    }
                }
            }
        }
    }

    /// Routes the gesture end; the row holding the preview commits it.
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
                all_day: self.all_day,
            }),
        );
        true
    }

    /// A click resolved the gesture; the session dies with no callback.
    pub fn on_click(&mut self, coordinator: &mut DragCoordinator) {
        self.preview = None;
        coordinator.cancel();
    }

    /// A `Reset` broadcast: discard everything, no callback.
    pub fn on_reset(&mut self, coordinator: &mut DragCoordinator) {
        self.preview = None;
        coordinator.cancel();
    }

    fn resize_right(
        &self,
        loc: &impl Localizer,
        pointer: Point,
        row_bounds: Rect,
        row: &RowMetrics,
        event: &GridEvent,
    ) -> Option<(Timestamp, Timestamp)> {
        let (start, original_end) = (event.start, event.end);
        let cursor_in_row = point_in_box(row_bounds, pointer);

        let mut end;
        if cursor_in_row {
            // The whole event lives after this row: nothing to resize here.
            if loc.lt(row.last(loc), start) {
                return None;
            }
            let date = row.date_for_slot(loc, row.slot_at(row_bounds, pointer.x));
            // An event ending exactly at midnight covers the pointed-at day
            // in full; otherwise the end lands on the pointed-at day.
            if loc.same(loc.start_of(original_end, Unit::Days), original_end) {
                end = loc.add(date, 1, Unit::Days);
            } else {
                end = date;
            }
        } else if row.in_range(loc, start)
            || (row_bounds.y1 < pointer.y && loc.gt(row.first, start))
        {
            // Dragged below the row: extend through the row's end into the
            // next week.
            end = loc.add(row.date_for_slot(loc, row.day_count - 1), 1, Unit::Days);
        } else {
            return None;
        }

        // The moving end keeps the original end's time of day.
        end = loc.merge(end, original_end);
        if loc.lt(end, start) {
            end = original_end;
        }
        Some((start, end))
    }

    fn resize_left(
        &self,
        loc: &impl Localizer,
        pointer: Point,
        row_bounds: Rect,
        row: &RowMetrics,
        event: &GridEvent,
    ) -> Option<(Timestamp, Timestamp)> {
        let (original_start, end) = (event.start, event.end);
        let cursor_in_row = point_in_box(row_bounds, pointer);

        let mut start;
        if cursor_in_row {
            if loc.gt(row.first, end) {
                return None;
            }
            start = row.date_for_slot(loc, row.slot_at(row_bounds, pointer.x));
        } else if row.in_range(loc, end)
            || (row_bounds.y0 > pointer.y && loc.lt(row.last(loc), end))
        {
            // Dragged above the row: extend past the row's start into the
            // previous week.
            start = loc.add(row.first, -1, Unit::Milliseconds);
        } else {
            return None;
        }

        // The moving start keeps the original start's time of day.
        start = loc.merge(start, original_start);
        if loc.gt(start, end) {
            start = original_start;
        }
        Some((start, end))
    }

    fn update(
        &mut self,
        loc: &impl Localizer,
        row: &RowMetrics,
        event: GridEvent,
        start: Timestamp,
        end: Timestamp,
    ) -> bool {
        if self
            .preview
            .is_some_and(|p| p.start == start && p.end == end)
        {
            return true;
        }

        // Project onto this row's cells; the last covered instant decides
        // the final cell so a midnight end does not bleed into the next day.
        let last_covered = loc.max(start, loc.add(end, -1, Unit::Milliseconds));
        let first_idx = row.index_of(loc, start).max(0);
        let last_idx = row
            .index_of(loc, last_covered)
            .min(row.day_count as i64 - 1);
        if last_idx < 0 || first_idx > last_idx {
            self.preview = None;
            return false;
        }

        self.preview = Some(SpanPreview {
            event,
            start,
            end,
            span: CellSpan {
                start_idx: first_idx as usize,
                end_idx: last_idx as usize,
            },
        });
        true
    }
}
