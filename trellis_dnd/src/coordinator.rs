// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinator: session lifecycle plus host callback routing.
//!
//! One coordinator is shared by every drag controller of a view (all day
//! columns, all span rows). It owns the [`SessionArena`], gates session
//! opening on the host's draggable/resizable accessors, and routes the
//! final geometry to `on_event_drop` or `on_event_resize` depending on the
//! session's action. The host never sees a preview, only the commit.

use kurbo::Point;

use trellis_localizer::Timestamp;
use trellis_slots::ResourceId;

use crate::session::{DragAction, DragSession, FinishInfo, OriginId, SessionArena, SessionId};
use crate::surface::{Direction, GridEvent};

/// A committed move, as handed to [`DndHost::on_event_drop`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventDrop {
    /// The moved event (pre-move snapshot).
    pub event: GridEvent,
    /// New start.
    pub start: Timestamp,
    /// New end.
    pub end: Timestamp,
    /// Resource column the event landed in.
    pub resource: Option<ResourceId>,
    /// Whether it landed in the all-day/span layer.
    pub all_day: bool,
}

/// A committed resize, as handed to [`DndHost::on_event_resize`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventResize {
    /// The resized event (pre-resize snapshot).
    pub event: GridEvent,
    /// New start.
    pub start: Timestamp,
    /// New end.
    pub end: Timestamp,
}

/// A drop of an external item, as handed to
/// [`DndHost::on_drop_from_outside`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OutsideDrop {
    /// Placement start (the slot under the pointer).
    pub start: Timestamp,
    /// Placement end (one slot later; external items have no duration).
    pub end: Timestamp,
    /// Whether the drop landed in the all-day/span layer.
    pub all_day: bool,
    /// Resource column the drop landed in.
    pub resource: Option<ResourceId>,
}

/// Host callbacks for drag and drop. All fire at most once per resolved
/// gesture.
pub trait DndHost {
    /// A drag or resize session opened.
    fn on_drag_start(&mut self, session: &DragSession) {
        let _ = session;
    }

    /// A move committed.
    fn on_event_drop(&mut self, drop: &EventDrop) {
        let _ = drop;
    }

    /// A resize committed.
    fn on_event_resize(&mut self, resize: &EventResize) {
        let _ = resize;
    }

    /// An external item dropped.
    fn on_drop_from_outside(&mut self, drop: &OutsideDrop) {
        let _ = drop;
    }

    /// An external item is being dragged over the grid.
    fn on_drag_over_from_outside(&mut self, point: Point) {
        let _ = point;
    }

    /// The external item currently being dragged, if any.
    fn drag_from_outside_item(&self) -> Option<GridEvent> {
        None
    }

    /// Per-event move eligibility.
    fn draggable(&self, event: &GridEvent) -> bool {
        let _ = event;
        true
    }

    /// Per-event resize eligibility.
    fn resizable(&self, event: &GridEvent) -> bool {
        let _ = event;
        true
    }
}

/// Shared session lifecycle for one view's drag controllers.
#[derive(Clone, Debug, Default)]
pub struct DragCoordinator {
    arena: SessionArena,
}

impl DragCoordinator {
    /// A coordinator with no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is currently active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.arena.active().is_some()
    }

    /// The active session, if any.
    #[must_use]
    pub fn active(&self) -> Option<(SessionId, &DragSession)> {
        self.arena.active()
    }

    /// Opens a session for `event`, gated on the host's accessors.
    ///
    /// Returns `None` when another session is active or the accessor
    /// refuses the event. On success the host's `on_drag_start` has fired.
    pub fn begin(
        &mut self,
        host: &mut impl DndHost,
        event: GridEvent,
        action: DragAction,
        direction: Option<Direction>,
        origin: OriginId,
        grab_offset_top: f64,
    ) -> Option<SessionId> {
        let allowed = match action {
            DragAction::Move => host.draggable(&event),
            DragAction::Resize => host.resizable(&event),
        };
        if !allowed {
            return None;
        }

        let mut session = DragSession::new(event, action, direction);
        session.origin = Some(origin);
        session.grab_offset_top = grab_offset_top;
        let id = self.arena.begin(session)?;
        if let Some(session) = self.arena.get(id) {
            host.on_drag_start(session);
        }
        Some(id)
    }

    /// Marks the active session as having effectively moved.
    pub fn mark_moved(&mut self) {
        if let Some((_, session)) = self.arena.active_mut() {
            session.actually_moved = true;
        }
    }

    /// Transfers preview responsibility to `origin`.
    pub fn set_origin(&mut self, origin: OriginId) {
        self.arena.set_origin(origin);
    }

    /// Commits the active session with `info`, routing to the host callback
    /// matching the session's action. With `None`, the session is discarded
    /// without any callback (tap, reset, or cancelled gesture).
    pub fn finish(&mut self, host: &mut impl DndHost, info: Option<FinishInfo>) {
        let Some(session) = self.arena.cancel_active() else {
            return;
        };
        let Some(info) = info else {
            return;
        };
        match session.action {
            DragAction::Move => host.on_event_drop(&EventDrop {
                event: session.event,
                start: info.start,
                end: info.end,
                resource: info.resource,
                all_day: info.all_day,
            }),
            DragAction::Resize => host.on_event_resize(&EventResize {
                event: session.event,
                start: info.start,
                end: info.end,
            }),
        }
    }

    /// Discards the active session with no callback. Safe when idle.
    pub fn cancel(&mut self) {
        self.arena.cancel_active();
    }
}
