// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `Selection` facade: one engine plus one hub, wired together.
//!
//! This is the object an embedding view owns per viewport. It feeds raw
//! input through the [`GestureEngine`], pushes every emitted event through
//! the [`Hub`] in order, and runs the two protocols that need both halves:
//!
//! - **Touch probe**: before a touch can arm a gesture, subscribers are
//!   asked (`ProbeEventDrag`) whether the touch already overlaps a
//!   draggable rendered event. A claim arms the gesture immediately.
//! - **Reset broadcast**: `Reset` is delivered to *every* subscriber, not
//!   claimed by the first; cancellation is global by definition.
//!
//! Each input method returns an [`InputDisposition`] telling the host
//! whether to suppress the platform default for the causing native event.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::engine::{EngineConfig, Feed, GestureEngine};
use crate::events::{EventKind, GestureEvent, SelectRect};
use crate::hub::{DispatchOutcome, HandlerId, Hub, Reply};
use crate::input::{GesturePoint, Key, PointerPress, TouchPress, Viewport};

/// What the host should do with the causing native event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputDisposition {
    /// Call the platform's prevent-default for this native event.
    pub prevent_default: bool,
}

/// One gesture engine and its subscribers, bound to one viewport.
///
/// `Ctx` is the embedder's application state, passed into every handler;
/// `R` is the claim payload type. Construct once per viewport, subscribe
/// clients in z-order (most specific first), feed input for the lifetime of
/// the owning view, and [`teardown`](Selection::teardown) on unmount.
pub struct Selection<Ctx, R = ()> {
    engine: GestureEngine,
    hub: Hub<Ctx, R>,
}

impl<Ctx, R> fmt::Debug for Selection<Ctx, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("engine", &self.engine)
            .field("hub", &self.hub)
            .finish()
    }
}

impl<Ctx, R> Default for Selection<Ctx, R> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<Ctx, R> Selection<Ctx, R> {
    /// A selection bound to nothing yet: no subscribers, idle engine.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: GestureEngine::new(config),
            hub: Hub::new(),
        }
    }

    /// Read access to the engine (phase, mode, live rectangle).
    #[must_use]
    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    /// Registers a subscriber; see [`Hub::on`]. Order is z-order.
    pub fn on(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&mut Ctx, &GestureEvent) -> Reply<R> + 'static,
    ) -> HandlerId {
        self.hub.on(kind, handler)
    }

    /// Removes a subscriber; see [`Hub::off`].
    pub fn off(&mut self, id: HandlerId) -> bool {
        self.hub.off(id)
    }

    /// A mouse press.
    pub fn pointer_down(
        &mut self,
        ctx: &mut Ctx,
        viewport: &impl Viewport,
        press: PointerPress,
    ) -> InputDisposition {
        let feed = self.engine.pointer_down(viewport, press);
        self.flush(ctx, feed)
    }

    /// A mouse move.
    pub fn pointer_move(&mut self, ctx: &mut Ctx, point: GesturePoint) -> InputDisposition {
        let feed = self.engine.pointer_move(point);
        self.flush(ctx, feed)
    }

    /// A mouse release.
    pub fn pointer_up(
        &mut self,
        ctx: &mut Ctx,
        point: GesturePoint,
        now: u64,
    ) -> InputDisposition {
        let feed = self.engine.pointer_up(point, now);
        self.flush(ctx, feed)
    }

    /// A touch press. Runs the drag probe against the subscribers before
    /// asking the engine whether to arm.
    pub fn touch_start(
        &mut self,
        ctx: &mut Ctx,
        viewport: &impl Viewport,
        press: TouchPress,
        now: u64,
    ) -> InputDisposition {
        let probe = GestureEvent::ProbeEventDrag { point: press.point };
        let over_event = self.hub.dispatch(ctx, &probe).is_claimed();
        let feed = self.engine.touch_start(viewport, press, now, over_event);
        self.flush(ctx, feed)
    }

    /// A touch move.
    pub fn touch_move(&mut self, ctx: &mut Ctx, point: GesturePoint) -> InputDisposition {
        let feed = self.engine.touch_move(point);
        self.flush(ctx, feed)
    }

    /// A touch release.
    pub fn touch_end(&mut self, ctx: &mut Ctx, now: u64) -> InputDisposition {
        let feed = self.engine.touch_end(now);
        self.flush(ctx, feed)
    }

    /// Host-clock poll; resolves pending long presses.
    pub fn poll(
        &mut self,
        ctx: &mut Ctx,
        viewport: &impl Viewport,
        now: u64,
    ) -> InputDisposition {
        let feed = self.engine.poll(viewport, now);
        self.flush(ctx, feed)
    }

    /// A key press.
    pub fn key_down(&mut self, ctx: &mut Ctx, key: Key) -> InputDisposition {
        let feed = self.engine.key_down(key);
        self.flush(ctx, feed)
    }

    /// A key release.
    pub fn key_up(&mut self, ctx: &mut Ctx, key: Key) -> InputDisposition {
        let feed = self.engine.key_up(key);
        self.flush(ctx, feed)
    }

    /// An external item dropped over the viewport.
    pub fn drop_from_outside(&mut self, ctx: &mut Ctx, point: GesturePoint) -> InputDisposition {
        let feed = self.engine.drop_from_outside(point);
        self.flush(ctx, feed)
    }

    /// An external item dragged over the viewport.
    pub fn drag_over_from_outside(
        &mut self,
        ctx: &mut Ctx,
        point: GesturePoint,
    ) -> InputDisposition {
        let feed = self.engine.drag_over_from_outside(point);
        self.flush(ctx, feed)
    }

    /// Cancels anything in flight and broadcasts `Reset` to every
    /// subscriber. Safe with no gesture active.
    pub fn reset(&mut self, ctx: &mut Ctx) {
        let feed = self.engine.reset();
        self.flush(ctx, feed);
    }

    /// Asks every range subscriber to clear its preview, collecting what
    /// each one had highlighted.
    pub fn clear_range_previews(&mut self, ctx: &mut Ctx) -> Vec<R> {
        self.hub.broadcast(ctx, &GestureEvent::ClearRangePreviews)
    }

    /// Whether `bounds` collides with the live selection rectangle.
    #[must_use]
    pub fn is_selected(&self, bounds: Rect) -> bool {
        self.engine.is_selected(bounds)
    }

    /// The live selection rectangle, while selecting.
    #[must_use]
    pub fn select_rect(&self) -> Option<SelectRect> {
        self.engine.select_rect()
    }

    /// Detaches the engine and drops every subscriber. Idempotent; feeds
    /// arriving after teardown are no-ops.
    pub fn teardown(&mut self) {
        self.engine.teardown();
        self.hub.clear();
    }

    /// Whether [`Selection::teardown`] has run.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.engine.is_detached()
    }

    fn flush(&mut self, ctx: &mut Ctx, feed: Feed) -> InputDisposition {
        for event in &feed.events {
            match event.kind() {
                // Cancellation is global: every subscriber hears it.
                EventKind::Reset => {
                    self.hub.broadcast(ctx, event);
                }
                _ => {
                    let _: DispatchOutcome<R> = self.hub.dispatch(ctx, event);
                }
            }
        }
        InputDisposition {
            prevent_default: feed.prevent_default,
        }
    }
}
