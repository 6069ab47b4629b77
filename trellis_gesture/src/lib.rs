// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Gesture: the gesture engine for calendar grids.
//!
//! This crate turns raw pointer, touch, and keyboard input over a viewport
//! into a small vocabulary of semantic gesture events (click, double
//! click, drag-select, drag end, external drop) and arbitrates which
//! subscriber owns each gesture's interpretation.
//!
//! ## The pieces
//!
//! - [`engine::GestureEngine`]: the classification state machine. Feed it
//!   typed input ([`input::PointerPress`], [`input::TouchPress`], key
//!   events); it tracks the gesture phase (idle → armed → selecting), the
//!   live selection rectangle, click tolerance, double-click/double-tap
//!   windows, and the long-press deadline, and emits
//!   [`events::GestureEvent`]s.
//! - [`hub::Hub`]: the ordered subscriber registry. Handlers reply
//!   [`hub::Reply::Claimed`], [`hub::Reply::Declined`], or
//!   [`hub::Reply::Vetoed`]; dispatch walks in registration order and
//!   stops at the first claim or veto, which is how a press on a rendered
//!   event wins the gesture away from the column background underneath it.
//! - [`Selection`]: the facade a view owns, one engine plus one hub,
//!   running the touch-probe and reset-broadcast protocols between them.
//!
//! ## What stays outside
//!
//! The engine is platform-free and clock-free. The host owns the native
//! event loop, converts each input into the typed forms (with page and
//! client coordinates, and its clock's timestamp where one is needed), and
//! answers the [`input::Viewport`] queries a gesture start depends on. In
//! return, every feed reports whether the host should suppress the
//! platform's default reaction via
//! [`selection::InputDisposition::prevent_default`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use trellis_gesture::{Selection, EngineConfig};
//! use trellis_gesture::events::{EventKind, GestureEvent};
//! use trellis_gesture::hub::Reply;
//! use trellis_gesture::input::{Button, GesturePoint, PointerPress, TargetId, Viewport};
//!
//! struct Grid; // the whole page is one container
//! impl Viewport for Grid {
//!     fn container_bounds(&self) -> Option<Rect> {
//!         Some(Rect::new(0.0, 0.0, 800.0, 600.0))
//!     }
//!     fn over_container(&self, _client: Point) -> bool { true }
//!     fn target_in_container(&self, _target: TargetId) -> bool { true }
//! }
//!
//! #[derive(Default)]
//! struct App { clicks: u32 }
//!
//! let mut selection: Selection<App> = Selection::new(EngineConfig::default());
//! selection.on(EventKind::Click, |app: &mut App, _ev: &GestureEvent| {
//!     app.clicks += 1;
//!     Reply::Claimed(())
//! });
//!
//! let mut app = App::default();
//! let press = PointerPress {
//!     point: GesturePoint::unscrolled(Point::new(100.0, 100.0)),
//!     target: Some(TargetId(7)),
//!     button: Button::Primary,
//! };
//! selection.pointer_down(&mut app, &Grid, press);
//! selection.pointer_up(&mut app, GesturePoint::unscrolled(Point::new(100.0, 100.0)), 1_000);
//! assert_eq!(app.clicks, 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod engine;
pub mod events;
pub mod hub;
pub mod input;
pub mod selection;

pub use engine::{EngineConfig, GestureEngine, InputModeState};
pub use selection::{InputDisposition, Selection};
