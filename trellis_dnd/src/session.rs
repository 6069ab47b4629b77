// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-session storage: generational handles, one active session.
//!
//! A drag session is owned by the arena, not by the controller that opened
//! it; controllers hold a [`SessionId`] and the container currently
//! responsible for the preview is recorded as the session's *origin*.
//! Crossing a container boundary is an explicit origin transfer, never an
//! identity comparison between controllers.
//!
//! Handles are generational: once a session ends, its id goes stale and can
//! never alias a later session that reuses the slot.

use alloc::vec::Vec;

use trellis_localizer::Timestamp;

use crate::surface::{Direction, GridEvent};

/// What kind of manipulation a session performs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragAction {
    /// The whole event moves; duration is preserved.
    Move,
    /// One edge moves; the other is fixed.
    Resize,
}

/// Identifier of the container (column or row) currently driving a
/// session's preview.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OriginId(pub u64);

/// State of one in-flight drag or resize.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession {
    /// The event being manipulated (a snapshot, not the host entity).
    pub event: GridEvent,
    /// Move or resize.
    pub action: DragAction,
    /// The grabbed resize handle; `None` for moves.
    pub direction: Option<Direction>,
    /// The session is live (set at begin, cleared at end).
    pub interacting: bool,
    /// At least one effective move was seen; a session that ends without
    /// this is a tap/click, not a drag.
    pub actually_moved: bool,
    /// The container currently responsible for the preview.
    pub origin: Option<OriginId>,
    /// Vertical distance from the event node's top to the grab point, so a
    /// move preview keeps the grab point under the finger.
    pub grab_offset_top: f64,
}

impl DragSession {
    /// A fresh session for `event`.
    #[must_use]
    pub fn new(event: GridEvent, action: DragAction, direction: Option<Direction>) -> Self {
        Self {
            event,
            action,
            direction,
            interacting: true,
            actually_moved: false,
            origin: None,
            grab_offset_top: 0.0,
        }
    }

    /// Duration of the session's event in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        self.event.end.millis() - self.event.start.millis()
    }
}

/// Stable handle to a session slot; goes stale when the session ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u32, u32);

/// Generational session storage enforcing the one-active-session rule.
#[derive(Clone, Debug, Default)]
pub struct SessionArena {
    slots: Vec<Option<DragSession>>,
    generations: Vec<u32>,
    active: Option<SessionId>,
}

impl SessionArena {
    /// An empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session. Refused (returns `None`) while another session is
    /// active; the caller signals the refusal to the gesture layer as its
    /// short-circuiting sentinel.
    pub fn begin(&mut self, session: DragSession) -> Option<SessionId> {
        if self.active.is_some() {
            return None;
        }
        let idx = self.slots.iter().position(Option::is_none);
        let id = match idx {
            Some(idx) => {
                self.generations[idx] += 1;
                self.slots[idx] = Some(session);
                SessionId(idx as u32, self.generations[idx])
            }
            None => {
                self.slots.push(Some(session));
                self.generations.push(1);
                SessionId(self.slots.len() as u32 - 1, 1)
            }
        };
        self.active = Some(id);
        Some(id)
    }

    /// Whether `id` still refers to a live session.
    #[must_use]
    pub fn is_alive(&self, id: SessionId) -> bool {
        self.generations.get(id.0 as usize).copied() == Some(id.1)
            && self.slots.get(id.0 as usize).is_some_and(Option::is_some)
    }

    /// The active session, if any.
    #[must_use]
    pub fn active(&self) -> Option<(SessionId, &DragSession)> {
        let id = self.active?;
        self.slots[id.0 as usize].as_ref().map(|s| (id, s))
    }

    /// Mutable access to the active session.
    pub fn active_mut(&mut self) -> Option<(SessionId, &mut DragSession)> {
        let id = self.active?;
        self.slots[id.0 as usize].as_mut().map(|s| (id, s))
    }

    /// The session behind `id`, if still alive.
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<&DragSession> {
        if !self.is_alive(id) {
            return None;
        }
        self.slots[id.0 as usize].as_ref()
    }

    /// Transfers preview responsibility for the active session.
    pub fn set_origin(&mut self, origin: OriginId) {
        if let Some((_, session)) = self.active_mut() {
            session.origin = Some(origin);
        }
    }

    /// Ends the session behind `id`, returning its final state. The handle
    /// goes stale.
    pub fn take(&mut self, id: SessionId) -> Option<DragSession> {
        if !self.is_alive(id) {
            return None;
        }
        if self.active == Some(id) {
            self.active = None;
        }
        self.slots[id.0 as usize].take()
    }

    /// Ends the active session, if any.
    pub fn cancel_active(&mut self) -> Option<DragSession> {
        let id = self.active?;
        self.take(id)
    }
}

/// The committed geometry a finishing container reports.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FinishInfo {
    /// Final start.
    pub start: Timestamp,
    /// Final end.
    pub end: Timestamp,
    /// The resource column the event landed in.
    pub resource: Option<trellis_slots::ResourceId>,
    /// Whether it landed in the all-day/span layer.
    pub all_day: bool,
}
