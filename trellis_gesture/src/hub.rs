// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered subscriber registry with claim arbitration.
//!
//! Subscribers register per [`EventKind`] and are invoked in registration
//! order. Each handler answers with a [`Reply`]:
//!
//! - [`Reply::Declined`]: not interested, keep walking.
//! - [`Reply::Claimed`]: this handler owns the interpretation of the event;
//!   stop walking and surface its payload.
//! - [`Reply::Vetoed`]: nobody may interpret this event; stop walking.
//!
//! This makes registration order load-bearing: subscribers with higher
//! visual specificity (an individual rendered event) must register before
//! lower-specificity ones (the whole column background) so that claim
//! arbitration matches what the user sees stacked on screen.
//!
//! [`Hub::dispatch`] is the short-circuiting walk; [`Hub::broadcast`] is
//! the distinct execute-all call that runs *every* handler and collects the
//! claimed payloads, used for queries where each subscriber contributes an
//! answer (for example "clear your range preview and report what it was").
//!
//! Handlers receive a `&mut Ctx` chosen by the embedder (the application
//! state the subscribers live in), so the hub itself never owns client
//! state.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_gesture::hub::{Hub, Reply, DispatchOutcome};
//! use trellis_gesture::events::{EventKind, GestureEvent};
//!
//! let mut hub: Hub<Vec<&'static str>, ()> = Hub::new();
//!
//! // Higher-specificity subscriber first: it claims.
//! hub.on(EventKind::Reset, |log, _ev| {
//!     log.push("event layer");
//!     Reply::Claimed(())
//! });
//! // Registered after: never reached on dispatch.
//! hub.on(EventKind::Reset, |log, _ev| {
//!     log.push("background layer");
//!     Reply::Declined
//! });
//!
//! let mut log = Vec::new();
//! let outcome = hub.dispatch(&mut log, &GestureEvent::Reset);
//! assert!(matches!(outcome, DispatchOutcome::Claimed(())));
//! assert_eq!(log, ["event layer"]);
//!
//! // Broadcast reaches everyone.
//! log.clear();
//! hub.broadcast(&mut log, &GestureEvent::Reset);
//! assert_eq!(log, ["event layer", "background layer"]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::events::{EventKind, GestureEvent};

/// A handler's answer to one event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reply<R = ()> {
    /// Own the event; later handlers are not consulted.
    Claimed(R),
    /// Not interested; the walk continues.
    Declined,
    /// Nobody may own the event; the walk stops.
    Vetoed,
}

/// The aggregate result of a short-circuiting dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome<R = ()> {
    /// Some handler claimed the event; its payload.
    Claimed(R),
    /// Some handler vetoed the event.
    Vetoed,
    /// Every handler declined (or none was registered).
    Unclaimed,
}

impl<R> DispatchOutcome<R> {
    /// `true` for [`DispatchOutcome::Claimed`].
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        matches!(self, Self::Claimed(_))
    }
}

/// Handle returned by [`Hub::on`]; removes exactly that registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<Ctx, R> = Box<dyn FnMut(&mut Ctx, &GestureEvent) -> Reply<R>>;

struct HandlerEntry<Ctx, R> {
    id: HandlerId,
    callback: Handler<Ctx, R>,
}

/// Ordered, per-kind subscriber registry.
///
/// `Ctx` is the embedder's application state, threaded into every handler;
/// `R` is the claim payload type shared by all subscribers of one hub.
pub struct Hub<Ctx, R = ()> {
    handlers: HashMap<EventKind, Vec<HandlerEntry<Ctx, R>>>,
    next_id: u64,
}

impl<Ctx, R> Default for Hub<Ctx, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, R> fmt::Debug for Hub<Ctx, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count: usize = self.handlers.values().map(Vec::len).sum();
        f.debug_struct("Hub")
            .field("handlers", &count)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<Ctx, R> Hub<Ctx, R> {
    /// An empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Registers `handler` under `kind`, after all existing handlers of that
    /// kind. Duplicate registrations are kept; each gets its own id.
    pub fn on(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&mut Ctx, &GestureEvent) -> Reply<R> + 'static,
    ) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.entry(kind).or_default().push(HandlerEntry {
            id,
            callback: Box::new(handler),
        });
        id
    }

    /// Removes the registration behind `id`. Returns whether it was found.
    pub fn off(&mut self, id: HandlerId) -> bool {
        for entries in self.handlers.values_mut() {
            if let Some(pos) = entries.iter().position(|e| e.id == id) {
                entries.remove(pos);
                return true;
            }
        }
        false
    }

    /// Walks `event.kind()` handlers in order until one claims or vetoes.
    pub fn dispatch(&mut self, ctx: &mut Ctx, event: &GestureEvent) -> DispatchOutcome<R> {
        let Some(entries) = self.handlers.get_mut(&event.kind()) else {
            return DispatchOutcome::Unclaimed;
        };
        for entry in entries.iter_mut() {
            match (entry.callback)(ctx, event) {
                Reply::Declined => {}
                Reply::Claimed(payload) => return DispatchOutcome::Claimed(payload),
                Reply::Vetoed => return DispatchOutcome::Vetoed,
            }
        }
        DispatchOutcome::Unclaimed
    }

    /// Runs *every* handler of `event.kind()` in order and collects each
    /// claimed payload. Vetoes do not stop the walk here; a broadcast is a
    /// poll of all subscribers, not an arbitration.
    pub fn broadcast(&mut self, ctx: &mut Ctx, event: &GestureEvent) -> Vec<R> {
        let mut results = Vec::new();
        let Some(entries) = self.handlers.get_mut(&event.kind()) else {
            return results;
        };
        for entry in entries.iter_mut() {
            if let Reply::Claimed(payload) = (entry.callback)(ctx, event) {
                results.push(payload);
            }
        }
        results
    }

    /// Number of handlers currently registered under `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Drops every registration.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
