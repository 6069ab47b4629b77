// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis DnD: drag-and-drop controllers for calendar grids.
//!
//! These are the subscribers that interpret a gesture as *"the user is
//! moving or resizing an existing event"*. They sit in front of the range
//! selectors in registration order: a press that lands on a rendered event
//! claims the gesture at `BeforeSelect`, and the range clients underneath
//! never hear it.
//!
//! ## The pieces
//!
//! - [`session`]: one [`session::SessionArena`] per view holds at most one
//!   in-flight [`session::DragSession`] behind a generational handle. The
//!   container responsible for the preview is the session's *origin*;
//!   crossing container boundaries transfers the origin explicitly.
//! - [`coordinator::DragCoordinator`]: opens sessions (gated on the host's
//!   draggable/resizable accessors) and routes the committed geometry to
//!   [`coordinator::DndHost::on_event_drop`] or
//!   [`coordinator::DndHost::on_event_resize`]. Previews never touch the
//!   host's entities.
//! - [`timegrid::TimeGridController`]: one per day column. Move keeps the
//!   event's millisecond duration exactly (daylight-saving transitions
//!   included) and keeps the grab point under the pointer; resize moves
//!   only the grabbed edge, clamped so it can never cross the fixed one.
//! - [`span::SpanController`]: one per month/all-day row. Moves land on the
//!   day under the pointer keeping time of day; resizes sweep day cells,
//!   and leaving the row extends the event into the neighboring week.
//! - [`surface::GridSurface`]: the presentation layer's answer to "what
//!   event is rendered at this point, and which resize handle was hit".
//!
//! ## Gesture protocol
//!
//! Per session: `BeforeSelect` (claim, open session) → `Selecting` 0..n
//! (preview updates, origin hand-off between containers) → `EndMove` (the
//! preview-holding container commits) or `Click`/`Reset` (discard, no
//! callback). A second press while a session is active is rejected, which
//! short-circuits all later subscribers for that press.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod coordinator;
pub mod session;
pub mod span;
pub mod surface;
pub mod timegrid;

pub use coordinator::{DndHost, DragCoordinator, EventDrop, EventResize, OutsideDrop};
pub use session::{DragAction, DragSession, FinishInfo, OriginId, SessionArena, SessionId};
pub use span::SpanController;
pub use surface::{Direction, EventHit, EventId, GridEvent, GridSurface};
pub use timegrid::TimeGridController;

/// A drag controller's answer to a gesture-opening press.
///
/// The wiring maps this onto the hub's reply: `Claim` becomes a claiming
/// reply (later subscribers are skipped), `Decline` passes the press on,
/// and `Reject` is the veto sentinel used while a session is already
/// active; nobody else may reinterpret that press either.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClaimDecision {
    /// This controller owns the gesture.
    Claim,
    /// Not ours; let later subscribers interpret it.
    Decline,
    /// Nobody may own this press (a session is already active).
    Reject,
}
