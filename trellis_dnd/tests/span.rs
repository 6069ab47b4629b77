// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Span-row controller tests: moving keeps time of day and duration,
//! resizing sweeps day cells with the off-row edge rules, and previews
//! project onto the row's cells.

use kurbo::{Point, Rect};
use trellis_dnd::span::SpanController;
use trellis_dnd::{
    DndHost, DragAction, DragCoordinator, Direction, EventDrop, EventId, EventResize, GridEvent,
    OriginId,
};
use trellis_gesture::events::SelectRect;
use trellis_localizer::{Timestamp, UtcLocalizer};
use trellis_slots::RowMetrics;

const HOUR: i64 = 3_600_000;
const DAY: i64 = 86_400_000;

// A 7-day row, 100px per cell, days 0..7.
const ROW: Rect = Rect::new(0.0, 0.0, 700.0, 100.0);

fn row() -> RowMetrics {
    RowMetrics {
        first: Timestamp::from_millis(0),
        day_count: 7,
        rtl: false,
    }
}

#[derive(Default)]
struct RecHost {
    drops: Vec<EventDrop>,
    resizes: Vec<EventResize>,
}

impl DndHost for RecHost {
    fn on_event_drop(&mut self, drop: &EventDrop) {
        self.drops.push(*drop);
    }

    fn on_event_resize(&mut self, resize: &EventResize) {
        self.resizes.push(*resize);
    }
}

/// Tuesday 14:00–15:00.
fn tuesday_event() -> GridEvent {
    GridEvent {
        id: EventId(1),
        start: Timestamp::from_millis(2 * DAY + 14 * HOUR),
        end: Timestamp::from_millis(2 * DAY + 15 * HOUR),
        resource: None,
        all_day: false,
    }
}

fn rect_at(x: f64, y: f64) -> SelectRect {
    SelectRect {
        bounds: Rect::new(x, y, x, y),
        pointer: Point::new(x, y),
    }
}

fn begin(
    coordinator: &mut DragCoordinator,
    host: &mut RecHost,
    event: GridEvent,
    action: DragAction,
    direction: Option<Direction>,
) {
    coordinator
        .begin(host, event, action, direction, OriginId(1), 0.0)
        .expect("session should open");
}

#[test]
fn move_lands_on_the_pointed_day_keeping_time_of_day() {
    let loc = UtcLocalizer;
    let mut controller = SpanController::new(OriginId(1), None, true);
    let mut coordinator = DragCoordinator::new();
    let mut host = RecHost::default();
    begin(&mut coordinator, &mut host, tuesday_event(), DragAction::Move, None);

    // Drag onto Friday (cell 5).
    assert!(controller.on_selecting(&loc, &rect_at(550.0, 50.0), ROW, &row(), &mut coordinator));
    let preview = controller.preview().unwrap();
    assert_eq!(preview.start.millis(), 5 * DAY + 14 * HOUR);
    assert_eq!(preview.end.millis(), 5 * DAY + 15 * HOUR);
    assert_eq!(preview.span.start_idx, 5);
    assert_eq!(preview.span.end_idx, 5);

    // Commit routes to the drop callback with the all-day flag.
    assert!(controller.on_end_move(&mut coordinator, &mut host));
    assert_eq!(host.drops.len(), 1);
    assert!(host.drops[0].all_day);
    assert_eq!(host.drops[0].start.millis(), 5 * DAY + 14 * HOUR);
}

#[test]
fn move_outside_the_row_clears_the_preview() {
    let loc = UtcLocalizer;
    let mut controller = SpanController::new(OriginId(1), None, true);
    let mut coordinator = DragCoordinator::new();
    let mut host = RecHost::default();
    begin(&mut coordinator, &mut host, tuesday_event(), DragAction::Move, None);

    controller.on_selecting(&loc, &rect_at(550.0, 50.0), ROW, &row(), &mut coordinator);
    assert!(controller.preview().is_some());

    assert!(!controller.on_selecting(&loc, &rect_at(550.0, 300.0), ROW, &row(), &mut coordinator));
    assert!(controller.preview().is_none());

    // Ending with no preview declines so a sibling row can commit.
    assert!(!controller.on_end_move(&mut coordinator, &mut host));
    assert!(host.drops.is_empty());
}

#[test]
fn resize_right_sweeps_day_cells() {
    let loc = UtcLocalizer;
    let mut controller = SpanController::new(OriginId(1), None, true);
    let mut coordinator = DragCoordinator::new();
    let mut host = RecHost::default();
    begin(
        &mut coordinator,
        &mut host,
        tuesday_event(),
        DragAction::Resize,
        Some(Direction::Right),
    );

    // Drag the end handle onto Friday: the end lands on Friday keeping the
    // original end's time of day; the start never moves.
    controller.on_selecting(&loc, &rect_at(550.0, 50.0), ROW, &row(), &mut coordinator);
    let preview = controller.preview().unwrap();
    assert_eq!(preview.start.millis(), 2 * DAY + 14 * HOUR);
    assert_eq!(preview.end.millis(), 5 * DAY + 15 * HOUR);
    assert_eq!((preview.span.start_idx, preview.span.end_idx), (2, 5));

    controller.on_end_move(&mut coordinator, &mut host);
    assert_eq!(host.resizes.len(), 1);
    assert_eq!(host.resizes[0].end.millis(), 5 * DAY + 15 * HOUR);
}

#[test]
fn resize_right_before_the_start_falls_back_to_the_original_end() {
    let loc = UtcLocalizer;
    let mut controller = SpanController::new(OriginId(1), None, true);
    let mut coordinator = DragCoordinator::new();
    let mut host = RecHost::default();
    begin(
        &mut coordinator,
        &mut host,
        tuesday_event(),
        DragAction::Resize,
        Some(Direction::Right),
    );

    // Drag the end handle onto Sunday (cell 0), before the event starts:
    // the end snaps back to the original.
    controller.on_selecting(&loc, &rect_at(50.0, 50.0), ROW, &row(), &mut coordinator);
    let preview = controller.preview().unwrap();
    assert_eq!(preview.end.millis(), 2 * DAY + 15 * HOUR);
    assert!(preview.end > preview.start, "edges never cross");
}

#[test]
fn resize_right_below_the_row_extends_through_its_end() {
    let loc = UtcLocalizer;
    let mut controller = SpanController::new(OriginId(1), None, true);
    let mut coordinator = DragCoordinator::new();
    let mut host = RecHost::default();
    begin(
        &mut coordinator,
        &mut host,
        tuesday_event(),
        DragAction::Resize,
        Some(Direction::Right),
    );

    // Pointer below the row while the event starts inside it: extend into
    // the next week, keeping the end's time of day.
    controller.on_selecting(&loc, &rect_at(350.0, 300.0), ROW, &row(), &mut coordinator);
    let preview = controller.preview().unwrap();
    assert_eq!(preview.end.millis(), 7 * DAY + 15 * HOUR);
    assert_eq!(preview.span.end_idx, 6, "the preview clamps to the row");
}

#[test]
fn resize_left_sweeps_day_cells_and_clamps() {
    let loc = UtcLocalizer;
    let mut controller = SpanController::new(OriginId(1), None, true);
    let mut coordinator = DragCoordinator::new();
    let mut host = RecHost::default();
    begin(
        &mut coordinator,
        &mut host,
        tuesday_event(),
        DragAction::Resize,
        Some(Direction::Left),
    );

    // Drag the start handle onto Sunday (cell 0).
    controller.on_selecting(&loc, &rect_at(50.0, 50.0), ROW, &row(), &mut coordinator);
    let preview = controller.preview().unwrap();
    assert_eq!(preview.start.millis(), 14 * HOUR);
    assert_eq!(preview.end.millis(), 2 * DAY + 15 * HOUR);
    assert_eq!((preview.span.start_idx, preview.span.end_idx), (0, 2));

    // Drag past the event's end (Saturday): the start snaps back.
    controller.on_selecting(&loc, &rect_at(650.0, 50.0), ROW, &row(), &mut coordinator);
    let preview = controller.preview().unwrap();
    assert_eq!(preview.start.millis(), 2 * DAY + 14 * HOUR);
    assert!(preview.start < preview.end, "edges never cross");
}

#[test]
fn resize_left_above_the_row_extends_into_the_previous_week() {
    let loc = UtcLocalizer;
    // A row one week later so there is a previous week to extend into.
    let later_row = RowMetrics {
        first: Timestamp::from_millis(7 * DAY),
        day_count: 7,
        rtl: false,
    };
    let row_bounds = Rect::new(0.0, 200.0, 700.0, 300.0);
    let event = GridEvent {
        id: EventId(2),
        start: Timestamp::from_millis(9 * DAY + 10 * HOUR),
        end: Timestamp::from_millis(9 * DAY + 11 * HOUR),
        resource: None,
        all_day: false,
    };
    let mut controller = SpanController::new(OriginId(2), None, true);
    let mut coordinator = DragCoordinator::new();
    let mut host = RecHost::default();
    begin(
        &mut coordinator,
        &mut host,
        event,
        DragAction::Resize,
        Some(Direction::Left),
    );

    // Pointer above the row while the event ends inside it: the start
    // extends just past the row's first day, keeping its time of day.
    controller.on_selecting(
        &loc,
        &rect_at(350.0, 50.0),
        row_bounds,
        &later_row,
        &mut coordinator,
    );
    let preview = controller.preview().unwrap();
    assert_eq!(preview.start.millis(), 6 * DAY + 10 * HOUR);
    assert_eq!(preview.span.start_idx, 0, "the preview clamps to the row");
}

#[test]
fn reset_discards_the_session_and_preview() {
    let loc = UtcLocalizer;
    let mut controller = SpanController::new(OriginId(1), None, true);
    let mut coordinator = DragCoordinator::new();
    let mut host = RecHost::default();
    begin(&mut coordinator, &mut host, tuesday_event(), DragAction::Move, None);

    controller.on_selecting(&loc, &rect_at(550.0, 50.0), ROW, &row(), &mut coordinator);
    controller.on_reset(&mut coordinator);

    assert!(controller.preview().is_none());
    assert!(!coordinator.is_dragging());
    assert!(host.drops.is_empty());
}
