// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The raw-input classification state machine.
//!
//! [`GestureEngine`] turns platform input into semantic [`GestureEvent`]s.
//! It is deliberately clock-free and platform-free: timestamps arrive on
//! the inputs that need them, and the only window back onto the platform is
//! the [`Viewport`] capability passed to the calls that can open a gesture.
//! Every feed returns a [`Feed`]: the events to dispatch plus whether the
//! host should suppress the platform's default reaction (text selection,
//! scrolling) for the causing native event.
//!
//! The machine's shape follows the data model it enforces:
//!
//! - [`GesturePhase`]: `Idle` → `Armed` (anchor recorded) → `Selecting`
//!   (tolerance exceeded, rectangle live). Illegal combinations, such as a
//!   selection rectangle without an anchor, are unrepresentable.
//! - [`InputModeState`]: the cross-gesture latches (touch-only mode, the
//!   double-tap/double-click clocks, modifier keys, the holding flag) in
//!   one auditable struct.
//!
//! One gesture at a time: a press while a gesture is mid-flight is dropped,
//! which serializes overlapping rapid gestures by construction.

use core::mem;

use kurbo::Rect;
use smallvec::SmallVec;
use trellis_geometry::{Tolerance, objects_collide, point_rect};

use crate::events::{GestureEvent, PressInfo, SelectRect};
use crate::input::{Button, GesturePoint, Key, Modifiers, PointerPress, TargetId, TouchPress, Viewport};

/// Immutable engine configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// When `true`, gestures may start anywhere, not only over the
    /// container.
    pub global: bool,
    /// How long a still touch must rest before it arms a gesture, in
    /// milliseconds.
    pub long_press_threshold: u64,
    /// Manhattan distance (per axis, in pixels) under which a mouse drag
    /// still counts as a click.
    pub click_tolerance: f64,
    /// Window for click→double-click and tap→double-tap, in milliseconds.
    pub double_click_interval: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            global: false,
            long_press_threshold: 250,
            click_tolerance: 5.0,
            double_click_interval: 250,
        }
    }
}

/// Cross-gesture input latches.
///
/// Kept as one value so the transition table stays auditable: every latch
/// the classification consults lives here, and [`GestureEngine::mode`]
/// exposes it read-only.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputModeState {
    /// Set on the first touch; permanently disables the mouse path.
    pub only_touch: bool,
    /// A touch gesture is armed and routing moves/ends into the engine.
    pub holding: bool,
    /// Timestamp of the most recent touch-start, for double-tap detection.
    pub last_tap: Option<u64>,
    /// Timestamp of the most recent click, for double-click detection.
    pub last_click: Option<u64>,
    /// Live modifier-key state.
    pub modifiers: Modifiers,
}

/// Where the engine is within a gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
enum GesturePhase {
    /// No gesture in flight.
    #[default]
    Idle,
    /// A press was accepted; the anchor is recorded, tolerance not yet
    /// exceeded.
    Armed {
        anchor: GesturePoint,
        touch: bool,
    },
    /// Tolerance exceeded; the selection rectangle is live.
    Selecting {
        anchor: GesturePoint,
        rect: SelectRect,
        last: GesturePoint,
        touch: bool,
    },
}

#[derive(Copy, Clone, Debug)]
struct LongPress {
    deadline: u64,
    press: TouchPress,
}

/// What one input produced: events to dispatch, and whether the host should
/// call the platform's prevent-default for the causing native event.
#[derive(Debug, Default)]
pub struct Feed {
    /// Semantic events, in emission order.
    pub events: SmallVec<[GestureEvent; 2]>,
    /// Suppress the platform default (scroll, text selection) for the
    /// causing input.
    pub prevent_default: bool,
}

impl Feed {
    fn none() -> Self {
        Self::default()
    }

    fn one(event: GestureEvent) -> Self {
        let mut events = SmallVec::new();
        events.push(event);
        Self {
            events,
            prevent_default: false,
        }
    }
}

/// The raw-input classification state machine.
#[derive(Debug)]
pub struct GestureEngine {
    config: EngineConfig,
    mode: InputModeState,
    phase: GesturePhase,
    pending_long_press: Option<LongPress>,
    detached: bool,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GestureEngine {
    /// An idle engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            mode: InputModeState::default(),
            phase: GesturePhase::Idle,
            pending_long_press: None,
            detached: false,
        }
    }

    /// The configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The cross-gesture latches, read-only.
    #[must_use]
    pub fn mode(&self) -> &InputModeState {
        &self.mode
    }

    /// `true` once the current gesture has exceeded the click tolerance.
    #[must_use]
    pub fn selecting(&self) -> bool {
        matches!(self.phase, GesturePhase::Selecting { .. })
    }

    /// The live selection rectangle, while selecting.
    #[must_use]
    pub fn select_rect(&self) -> Option<SelectRect> {
        match self.phase {
            GesturePhase::Selecting { rect, .. } => Some(rect),
            _ => None,
        }
    }

    /// The current gesture's anchor, while one is in flight.
    #[must_use]
    pub fn anchor(&self) -> Option<GesturePoint> {
        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Armed { anchor, .. } | GesturePhase::Selecting { anchor, .. } => {
                Some(anchor)
            }
        }
    }

    /// Whether [`GestureEngine::teardown`] has run.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Whether `bounds` collides with the live selection rectangle.
    ///
    /// Always `false` while not selecting.
    #[must_use]
    pub fn is_selected(&self, bounds: Rect) -> bool {
        match self.phase {
            GesturePhase::Selecting { rect, .. } => {
                objects_collide(rect.bounds, bounds, Tolerance::ZERO)
            }
            _ => false,
        }
    }

    /// Retains the items whose bounds collide with the live selection
    /// rectangle; empty while not selecting.
    #[must_use]
    pub fn filter_colliding<T>(
        &self,
        items: impl IntoIterator<Item = (T, Rect)>,
    ) -> alloc::vec::Vec<T> {
        items
            .into_iter()
            .filter(|(_, bounds)| self.is_selected(*bounds))
            .map(|(item, _)| item)
            .collect()
    }

    /// A mouse press. Opens a gesture when the press passes the container
    /// checks; otherwise a silent no-op.
    pub fn pointer_down(&mut self, viewport: &impl Viewport, press: PointerPress) -> Feed {
        if self.detached || self.mode.only_touch {
            return Feed::none();
        }
        if press.button != Button::Primary {
            return Feed::none();
        }
        // Gestures are serialized: a press while one is mid-flight is dropped.
        if !matches!(self.phase, GesturePhase::Idle) {
            return Feed::none();
        }
        self.begin_gesture(viewport, press.point, press.target, false)
    }

    /// A mouse move. Only meaningful while a gesture is in flight.
    pub fn pointer_move(&mut self, point: GesturePoint) -> Feed {
        if self.detached || self.mode.only_touch {
            return Feed::none();
        }
        self.handle_move(point)
    }

    /// A mouse release at `point`, at host time `now`.
    pub fn pointer_up(&mut self, point: GesturePoint, now: u64) -> Feed {
        if self.detached || self.mode.only_touch {
            return Feed::none();
        }
        self.handle_end(Some(point), now)
    }

    /// A touch press at host time `now`.
    ///
    /// `over_event` is the answer to the drag probe: whether the touch
    /// already overlaps a draggable rendered event (the facade asks the
    /// subscribers before calling). That, or a second tap inside the
    /// double-tap window, arms the gesture immediately; otherwise a long
    /// press is armed and resolved by [`GestureEngine::poll`].
    pub fn touch_start(
        &mut self,
        viewport: &impl Viewport,
        press: TouchPress,
        now: u64,
        over_event: bool,
    ) -> Feed {
        if self.detached {
            return Feed::none();
        }
        // First input type wins: after a touch, the mouse path stays off.
        self.mode.only_touch = true;

        let since_last_tap = self.mode.last_tap.map(|t| now.saturating_sub(t));
        let double_tap =
            since_last_tap.is_some_and(|d| d > 0 && d < self.config.double_click_interval);
        self.mode.last_tap = Some(now);

        if over_event || double_tap {
            if !matches!(self.phase, GesturePhase::Idle) {
                return Feed::none();
            }
            self.pending_long_press = None;
            let feed = self.begin_gesture(viewport, press.point, press.target, true);
            // Holding only latches when the press actually armed a gesture.
            self.mode.holding = !matches!(self.phase, GesturePhase::Idle);
            feed
        } else {
            // Leave the touch to the platform (scrolling); arm a long press.
            self.mode.holding = false;
            self.pending_long_press = Some(LongPress {
                deadline: now + self.config.long_press_threshold,
                press,
            });
            Feed::none()
        }
    }

    /// Host-clock poll. Resolves a pending long press whose deadline has
    /// passed into a held touch gesture; otherwise a no-op.
    pub fn poll(&mut self, viewport: &impl Viewport, now: u64) -> Feed {
        if self.detached {
            return Feed::none();
        }
        let Some(long_press) = self.pending_long_press else {
            return Feed::none();
        };
        if now < long_press.deadline {
            return Feed::none();
        }
        self.pending_long_press = None;
        if self.mode.holding || !matches!(self.phase, GesturePhase::Idle) {
            return Feed::none();
        }
        let feed = self.begin_gesture(viewport, long_press.press.point, long_press.press.target, true);
        self.mode.holding = !matches!(self.phase, GesturePhase::Idle);
        feed
    }

    /// A touch move. Routed into the gesture only while holding; otherwise
    /// it cancels any pending long press and lets the platform scroll.
    pub fn touch_move(&mut self, point: GesturePoint) -> Feed {
        if self.detached {
            return Feed::none();
        }
        if !self.mode.holding {
            self.pending_long_press = None;
            return Feed::none();
        }
        self.handle_move(point)
    }

    /// A touch release at host time `now`.
    ///
    /// Touch ends carry no position; a drag resolves at the last recorded
    /// move position.
    pub fn touch_end(&mut self, now: u64) -> Feed {
        if self.detached {
            return Feed::none();
        }
        self.pending_long_press = None;
        if !self.mode.holding {
            return Feed::none();
        }
        self.handle_end(None, now)
    }

    /// A key press. Updates the modifier latch; Escape cancels an in-flight
    /// gesture with a `Reset`.
    pub fn key_down(&mut self, key: Key) -> Feed {
        if self.detached {
            return Feed::none();
        }
        if let Some(flag) = modifier_flag(key) {
            self.mode.modifiers.insert(flag);
            return Feed::none();
        }
        if key == Key::Escape && !matches!(self.phase, GesturePhase::Idle) {
            return self.cancel();
        }
        Feed::none()
    }

    /// A key release. Updates the modifier latch.
    pub fn key_up(&mut self, key: Key) -> Feed {
        if self.detached {
            return Feed::none();
        }
        if let Some(flag) = modifier_flag(key) {
            self.mode.modifiers.remove(flag);
        }
        Feed::none()
    }

    /// An external item dropped over the viewport.
    pub fn drop_from_outside(&mut self, point: GesturePoint) -> Feed {
        if self.detached {
            return Feed::none();
        }
        let mut feed = Feed::one(GestureEvent::DropFromOutside { point });
        feed.prevent_default = true;
        feed
    }

    /// An external item dragged over the viewport.
    pub fn drag_over_from_outside(&mut self, point: GesturePoint) -> Feed {
        if self.detached {
            return Feed::none();
        }
        let mut feed = Feed::one(GestureEvent::DragOverFromOutside { point });
        feed.prevent_default = true;
        feed
    }

    /// Cancels whatever is in flight and emits `Reset`. Safe to call with
    /// no gesture active.
    pub fn reset(&mut self) -> Feed {
        if self.detached {
            return Feed::none();
        }
        self.cancel()
    }

    /// Detaches the engine: resets all state and makes every later feed a
    /// no-op. Idempotent.
    pub fn teardown(&mut self) {
        self.detached = true;
        self.phase = GesturePhase::Idle;
        self.mode = InputModeState::default();
        self.pending_long_press = None;
    }

    fn cancel(&mut self) -> Feed {
        self.phase = GesturePhase::Idle;
        self.mode.holding = false;
        self.pending_long_press = None;
        Feed::one(GestureEvent::Reset)
    }

    /// Shared gesture-open path for mouse, double-tap, probe, and long
    /// press.
    fn begin_gesture(
        &mut self,
        viewport: &impl Viewport,
        point: GesturePoint,
        target: Option<TargetId>,
        touch: bool,
    ) -> Feed {
        if !viewport.over_container(point.client) {
            return Feed::none();
        }
        if !self.config.global {
            // A container that cannot be resolved degrades to always-reject.
            let Some(bounds) = viewport.container_bounds() else {
                return Feed::none();
            };
            let target_inside = target.is_some_and(|t| viewport.target_in_container(t));
            if !target_inside && !objects_collide(point_rect(point.page), bounds, Tolerance::ZERO) {
                return Feed::none();
            }
        }
        if let Some(t) = target
            && !viewport.in_valid_region(t)
        {
            return Feed::none();
        }

        // The anchor is recorded whether or not a subscriber vetoes: a later
        // within-tolerance release still needs it to classify as a click.
        self.phase = GesturePhase::Armed {
            anchor: point,
            touch,
        };

        let mut feed = Feed::one(GestureEvent::BeforeSelect {
            point,
            press: PressInfo {
                target,
                touch,
                modifiers: self.mode.modifiers,
            },
        });
        if touch {
            feed.events.push(GestureEvent::SelectStart { point });
            feed.prevent_default = true;
        }
        feed
    }

    fn handle_move(&mut self, point: GesturePoint) -> Feed {
        let (anchor, touch) = match self.phase {
            GesturePhase::Idle => return Feed::none(),
            GesturePhase::Armed { anchor, touch }
            | GesturePhase::Selecting { anchor, touch, .. } => (anchor, touch),
        };

        let w = (anchor.page.x - point.page.x).abs();
        let h = (anchor.page.y - point.page.y).abs();

        // Mouse jitter inside the click tolerance never starts (or updates)
        // a selection; any touch movement counts.
        let within_click =
            !touch && w <= self.config.click_tolerance && h <= self.config.click_tolerance;
        if within_click {
            return Feed::none();
        }

        let left = anchor.page.x.min(point.page.x);
        let top = anchor.page.y.min(point.page.y);
        let rect = SelectRect {
            bounds: Rect::new(left, top, left + w, top + h),
            pointer: point.page,
        };
        self.phase = GesturePhase::Selecting {
            anchor,
            rect,
            last: point,
            touch,
        };

        let mut feed = Feed::one(GestureEvent::Selecting { rect });
        feed.prevent_default = true;
        feed
    }

    fn handle_end(&mut self, point: Option<GesturePoint>, now: u64) -> Feed {
        self.mode.holding = false;
        self.pending_long_press = None;

        match mem::take(&mut self.phase) {
            GesturePhase::Idle => Feed::none(),
            GesturePhase::Armed { anchor, .. } => {
                // Never exceeded tolerance: a click, at anchor granularity.
                let double = self
                    .mode
                    .last_click
                    .is_some_and(|t| now.saturating_sub(t) < self.config.double_click_interval);
                if double {
                    self.mode.last_click = None;
                    Feed::one(GestureEvent::DoubleClick { point: anchor })
                } else {
                    self.mode.last_click = Some(now);
                    Feed::one(GestureEvent::Click {
                        point: anchor,
                        modifiers: self.mode.modifiers,
                    })
                }
            }
            GesturePhase::Selecting { last, .. } => Feed::one(GestureEvent::EndMove {
                point: point.unwrap_or(last),
            }),
        }
    }
}

fn modifier_flag(key: Key) -> Option<Modifiers> {
    match key {
        Key::Control => Some(Modifiers::CTRL),
        Key::Meta => Some(Modifiers::META),
        Key::Shift => Some(Modifiers::SHIFT),
        Key::Alt => Some(Modifiers::ALT),
        Key::Escape | Key::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::Point;

    struct TestViewport {
        bounds: Option<Rect>,
        over: bool,
        contains_target: bool,
    }

    impl Default for TestViewport {
        fn default() -> Self {
            Self {
                bounds: Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)),
                over: true,
                contains_target: true,
            }
        }
    }

    impl Viewport for TestViewport {
        fn container_bounds(&self) -> Option<Rect> {
            self.bounds
        }

        fn over_container(&self, _client: Point) -> bool {
            self.over
        }

        fn target_in_container(&self, _target: TargetId) -> bool {
            self.contains_target
        }
    }

    fn press_at(x: f64, y: f64) -> PointerPress {
        PointerPress {
            point: GesturePoint::unscrolled(Point::new(x, y)),
            target: Some(TargetId(1)),
            button: Button::Primary,
        }
    }

    fn kinds(feed: &Feed) -> Vec<crate::events::EventKind> {
        feed.events.iter().map(GestureEvent::kind).collect()
    }

    #[test]
    fn press_arms_and_emits_before_select() {
        let mut engine = GestureEngine::default();
        let feed = engine.pointer_down(&TestViewport::default(), press_at(100.0, 100.0));
        assert_eq!(kinds(&feed), [crate::events::EventKind::BeforeSelect]);
        assert!(!feed.prevent_default);
        assert!(!engine.selecting());
        assert_eq!(
            engine.anchor(),
            Some(GesturePoint::unscrolled(Point::new(100.0, 100.0)))
        );
    }

    #[test]
    fn secondary_button_never_starts_a_gesture() {
        let mut engine = GestureEngine::default();
        let press = PointerPress {
            button: Button::Secondary,
            ..press_at(100.0, 100.0)
        };
        let feed = engine.pointer_down(&TestViewport::default(), press);
        assert!(feed.events.is_empty());
        assert!(engine.anchor().is_none());
    }

    #[test]
    fn press_outside_container_is_silently_dropped() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport {
            over: false,
            ..TestViewport::default()
        };
        let feed = engine.pointer_down(&viewport, press_at(100.0, 100.0));
        assert!(feed.events.is_empty());
    }

    #[test]
    fn missing_container_degrades_to_reject() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport {
            bounds: None,
            ..TestViewport::default()
        };
        let feed = engine.pointer_down(&viewport, press_at(100.0, 100.0));
        assert!(feed.events.is_empty());
        assert!(engine.anchor().is_none());
    }

    #[test]
    fn foreign_target_needs_point_collision_with_container() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport {
            contains_target: false,
            ..TestViewport::default()
        };
        // Page point inside the container bounds: accepted.
        let feed = engine.pointer_down(&viewport, press_at(100.0, 100.0));
        assert_eq!(feed.events.len(), 1);

        // Outside the container bounds: rejected.
        let mut engine = GestureEngine::default();
        let feed = engine.pointer_down(&viewport, press_at(2000.0, 100.0));
        assert!(feed.events.is_empty());
    }

    #[test]
    fn global_engine_skips_containment() {
        let mut engine = GestureEngine::new(EngineConfig {
            global: true,
            ..EngineConfig::default()
        });
        let viewport = TestViewport {
            bounds: None,
            contains_target: false,
            ..TestViewport::default()
        };
        let feed = engine.pointer_down(&viewport, press_at(5000.0, 5000.0));
        assert_eq!(feed.events.len(), 1);
    }

    #[test]
    fn moves_within_tolerance_are_suppressed() {
        let mut engine = GestureEngine::default();
        engine.pointer_down(&TestViewport::default(), press_at(100.0, 100.0));

        let feed = engine.pointer_move(GesturePoint::unscrolled(Point::new(103.0, 104.0)));
        assert!(feed.events.is_empty());
        assert!(!engine.selecting());
    }

    #[test]
    fn exceeding_tolerance_emits_selecting_with_normalized_rect() {
        let mut engine = GestureEngine::default();
        engine.pointer_down(&TestViewport::default(), press_at(100.0, 100.0));

        // Drag up and left: corners still normalize.
        let feed = engine.pointer_move(GesturePoint::unscrolled(Point::new(40.0, 30.0)));
        assert_eq!(kinds(&feed), [crate::events::EventKind::Selecting]);
        assert!(feed.prevent_default);
        let rect = engine.select_rect().unwrap();
        assert_eq!(rect.bounds, Rect::new(40.0, 30.0, 100.0, 100.0));
        assert_eq!(rect.pointer, Point::new(40.0, 30.0));
    }

    #[test]
    fn release_without_movement_is_a_click_at_the_anchor() {
        let mut engine = GestureEngine::default();
        engine.pointer_down(&TestViewport::default(), press_at(100.0, 100.0));
        let feed = engine.pointer_up(GesturePoint::unscrolled(Point::new(102.0, 101.0)), 1_000);
        match feed.events.as_slice() {
            [GestureEvent::Click { point, .. }] => {
                assert_eq!(point.page, Point::new(100.0, 100.0));
            }
            other => panic!("expected a click, got {other:?}"),
        }
    }

    #[test]
    fn second_click_within_window_is_a_double_click() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport::default();

        engine.pointer_down(&viewport, press_at(100.0, 100.0));
        let first = engine.pointer_up(GesturePoint::unscrolled(Point::new(100.0, 100.0)), 1_000);
        assert_eq!(kinds(&first), [crate::events::EventKind::Click]);

        engine.pointer_down(&viewport, press_at(100.0, 100.0));
        let second = engine.pointer_up(GesturePoint::unscrolled(Point::new(100.0, 100.0)), 1_100);
        assert_eq!(kinds(&second), [crate::events::EventKind::DoubleClick]);

        // The window restarts: a third click is a plain click again.
        engine.pointer_down(&viewport, press_at(100.0, 100.0));
        let third = engine.pointer_up(GesturePoint::unscrolled(Point::new(100.0, 100.0)), 1_200);
        assert_eq!(kinds(&third), [crate::events::EventKind::Click]);
    }

    #[test]
    fn clicks_outside_window_stay_single() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport::default();

        engine.pointer_down(&viewport, press_at(100.0, 100.0));
        engine.pointer_up(GesturePoint::unscrolled(Point::new(100.0, 100.0)), 1_000);
        engine.pointer_down(&viewport, press_at(100.0, 100.0));
        let feed = engine.pointer_up(GesturePoint::unscrolled(Point::new(100.0, 100.0)), 1_400);
        assert_eq!(kinds(&feed), [crate::events::EventKind::Click]);
    }

    #[test]
    fn drag_ends_with_end_move_at_release_point() {
        let mut engine = GestureEngine::default();
        engine.pointer_down(&TestViewport::default(), press_at(100.0, 100.0));
        engine.pointer_move(GesturePoint::unscrolled(Point::new(100.0, 160.0)));
        let feed = engine.pointer_up(GesturePoint::unscrolled(Point::new(100.0, 160.0)), 1_000);
        match feed.events.as_slice() {
            [GestureEvent::EndMove { point }] => {
                assert_eq!(point.page, Point::new(100.0, 160.0));
            }
            other => panic!("expected an end-move, got {other:?}"),
        }
        assert!(!engine.selecting());
        assert!(engine.anchor().is_none());
    }

    #[test]
    fn presses_are_serialized_while_a_gesture_is_in_flight() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport::default();
        engine.pointer_down(&viewport, press_at(100.0, 100.0));
        let second = engine.pointer_down(&viewport, press_at(300.0, 300.0));
        assert!(second.events.is_empty());
        // The original anchor is untouched.
        assert_eq!(engine.anchor().unwrap().page, Point::new(100.0, 100.0));
    }

    #[test]
    fn escape_cancels_with_reset() {
        let mut engine = GestureEngine::default();
        engine.pointer_down(&TestViewport::default(), press_at(100.0, 100.0));
        engine.pointer_move(GesturePoint::unscrolled(Point::new(200.0, 200.0)));

        let feed = engine.key_down(Key::Escape);
        assert_eq!(kinds(&feed), [crate::events::EventKind::Reset]);
        assert!(!engine.selecting());

        // Escape with nothing in flight is a no-op.
        let feed = engine.key_down(Key::Escape);
        assert!(feed.events.is_empty());
    }

    #[test]
    fn modifier_keys_latch_and_release() {
        let mut engine = GestureEngine::default();
        engine.key_down(Key::Control);
        engine.key_down(Key::Shift);
        assert!(engine.mode().modifiers.contains(Modifiers::CTRL | Modifiers::SHIFT));
        engine.key_up(Key::Control);
        assert!(!engine.mode().modifiers.contains(Modifiers::CTRL));
        assert!(engine.mode().modifiers.contains(Modifiers::SHIFT));
    }

    fn touch_at(x: f64, y: f64) -> TouchPress {
        TouchPress {
            point: GesturePoint::unscrolled(Point::new(x, y)),
            target: Some(TargetId(1)),
        }
    }

    #[test]
    fn touch_latches_only_touch_and_disables_mouse() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport::default();
        engine.touch_start(&viewport, touch_at(100.0, 100.0), 1_000, false);
        assert!(engine.mode().only_touch);

        let feed = engine.pointer_down(&viewport, press_at(100.0, 100.0));
        assert!(feed.events.is_empty());
    }

    #[test]
    fn probed_touch_arms_immediately_and_prevents_default() {
        let mut engine = GestureEngine::default();
        let feed = engine.touch_start(&TestViewport::default(), touch_at(100.0, 100.0), 1_000, true);
        assert_eq!(
            kinds(&feed),
            [
                crate::events::EventKind::BeforeSelect,
                crate::events::EventKind::SelectStart
            ]
        );
        assert!(feed.prevent_default);
        assert!(engine.mode().holding);
    }

    #[test]
    fn double_tap_arms_a_holding_gesture() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport::default();

        let first = engine.touch_start(&viewport, touch_at(100.0, 100.0), 1_000, false);
        assert!(first.events.is_empty());
        engine.touch_end(1_020);

        let second = engine.touch_start(&viewport, touch_at(100.0, 100.0), 1_150, false);
        assert_eq!(second.events.len(), 2);
        assert!(engine.mode().holding);
    }

    #[test]
    fn long_press_arms_via_poll_unless_interrupted() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport::default();

        engine.touch_start(&viewport, touch_at(100.0, 100.0), 1_000, false);
        assert!(engine.poll(&viewport, 1_100).events.is_empty());
        let fired = engine.poll(&viewport, 1_260);
        assert_eq!(fired.events.len(), 2);
        assert!(engine.mode().holding);

        // A moved finger cancels the pending long press.
        let mut engine = GestureEngine::default();
        engine.touch_start(&viewport, touch_at(100.0, 100.0), 1_000, false);
        engine.touch_move(GesturePoint::unscrolled(Point::new(100.0, 180.0)));
        assert!(engine.poll(&viewport, 1_300).events.is_empty());
        assert!(!engine.mode().holding);
    }

    #[test]
    fn touch_drag_ends_at_last_move_position() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport::default();
        engine.touch_start(&viewport, touch_at(100.0, 100.0), 1_000, true);
        engine.touch_move(GesturePoint::unscrolled(Point::new(100.0, 170.0)));
        let feed = engine.touch_end(1_400);
        match feed.events.as_slice() {
            [GestureEvent::EndMove { point }] => {
                assert_eq!(point.page, Point::new(100.0, 170.0));
            }
            other => panic!("expected an end-move, got {other:?}"),
        }
    }

    #[test]
    fn any_touch_movement_exceeds_tolerance() {
        let mut engine = GestureEngine::default();
        engine.touch_start(&TestViewport::default(), touch_at(100.0, 100.0), 1_000, true);
        // 2px of movement: far inside the mouse tolerance, but touch drags
        // have none.
        let feed = engine.touch_move(GesturePoint::unscrolled(Point::new(101.0, 102.0)));
        assert_eq!(kinds(&feed), [crate::events::EventKind::Selecting]);
    }

    #[test]
    fn teardown_is_idempotent_and_silences_feeds() {
        let mut engine = GestureEngine::default();
        let viewport = TestViewport::default();
        engine.pointer_down(&viewport, press_at(100.0, 100.0));
        engine.pointer_move(GesturePoint::unscrolled(Point::new(200.0, 200.0)));

        engine.teardown();
        engine.teardown();
        assert!(engine.is_detached());
        assert!(!engine.selecting());

        assert!(engine.pointer_down(&viewport, press_at(1.0, 1.0)).events.is_empty());
        assert!(engine.pointer_move(GesturePoint::unscrolled(Point::new(9.0, 9.0))).events.is_empty());
        assert!(engine.pointer_up(GesturePoint::unscrolled(Point::new(9.0, 9.0)), 2_000).events.is_empty());
        assert!(engine.reset().events.is_empty());
    }

    #[test]
    fn reset_is_safe_with_no_gesture_active() {
        let mut engine = GestureEngine::default();
        let feed = engine.reset();
        assert_eq!(kinds(&feed), [crate::events::EventKind::Reset]);
        let feed = engine.reset();
        assert_eq!(kinds(&feed), [crate::events::EventKind::Reset]);
    }

    #[test]
    fn selection_collision_queries() {
        let mut engine = GestureEngine::default();
        engine.pointer_down(&TestViewport::default(), press_at(100.0, 100.0));
        assert!(!engine.is_selected(Rect::new(0.0, 0.0, 500.0, 500.0)));

        engine.pointer_move(GesturePoint::unscrolled(Point::new(200.0, 200.0)));
        assert!(engine.is_selected(Rect::new(150.0, 150.0, 160.0, 160.0)));
        assert!(!engine.is_selected(Rect::new(300.0, 300.0, 400.0, 400.0)));

        let hits = engine.filter_colliding([
            ("a", Rect::new(150.0, 150.0, 160.0, 160.0)),
            ("b", Rect::new(300.0, 300.0, 400.0, 400.0)),
        ]);
        assert_eq!(hits, ["a"]);
    }
}
