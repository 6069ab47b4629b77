// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The semantic event vocabulary the engine emits.

use kurbo::{Point, Rect};

use crate::input::{GesturePoint, Modifiers, TargetId};

/// The live selection rectangle while a drag is in progress.
///
/// `bounds` is the axis-aligned box spanned by the gesture anchor and the
/// current pointer, in page coordinates, with normalized corners
/// (`y0 <= y1`, `x0 <= x1`). `pointer` is the current pointer corner;
/// clients that project the rectangle onto rows need to know which corner
/// is moving. Replaced wholesale on every move; owned by the engine, copied
/// into event payloads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelectRect {
    /// Normalized box from anchor to pointer.
    pub bounds: Rect,
    /// The pointer corner, page coordinates.
    pub pointer: Point,
}

/// Facts about the press that opened a gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PressInfo {
    /// The node the press landed on, when resolved.
    pub target: Option<TargetId>,
    /// Whether the gesture is touch-originated.
    pub touch: bool,
    /// Modifier state at press time.
    pub modifiers: Modifiers,
}

/// A semantic gesture event.
///
/// Per gesture, the only legal sequence is `BeforeSelect` →
/// `Selecting`* → (`Click` | `DoubleClick` | `EndMove`), with `Reset`
/// allowed to interleave anywhere. `ProbeEventDrag` and
/// `ClearRangePreviews` are queries addressed to subscribers, not part of
/// the gesture sequence.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureEvent {
    /// A gesture is opening at this anchor. Subscribers claim or veto here.
    BeforeSelect {
        /// The anchor point.
        point: GesturePoint,
        /// Details of the originating press.
        press: PressInfo,
    },
    /// A touch gesture armed; emitted right after `BeforeSelect`.
    SelectStart {
        /// The anchor point.
        point: GesturePoint,
    },
    /// The drag moved past the click tolerance; the rectangle is live.
    Selecting {
        /// The replaced-wholesale selection rectangle.
        rect: SelectRect,
    },
    /// The gesture ended without exceeding the click tolerance.
    Click {
        /// The gesture anchor (not the release point).
        point: GesturePoint,
        /// Modifier state at release time.
        modifiers: Modifiers,
    },
    /// A second click landed within the double-click window.
    DoubleClick {
        /// The gesture anchor.
        point: GesturePoint,
    },
    /// The drag ended; the final pointer position.
    EndMove {
        /// Release position (touch: the last recorded move position).
        point: GesturePoint,
    },
    /// Cancel everything in flight. Broadcast, never claimed.
    Reset,
    /// An external item was dropped over the viewport.
    DropFromOutside {
        /// Drop position.
        point: GesturePoint,
    },
    /// An external item is being dragged over the viewport.
    DragOverFromOutside {
        /// Current drag position.
        point: GesturePoint,
    },
    /// Query: does this touch point land on a draggable rendered event?
    ProbeEventDrag {
        /// The touch position.
        point: GesturePoint,
    },
    /// Query: every range client clears its preview and reports what it had.
    ClearRangePreviews,
}

/// The name under which subscribers register, one per event variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`GestureEvent::BeforeSelect`].
    BeforeSelect,
    /// See [`GestureEvent::SelectStart`].
    SelectStart,
    /// See [`GestureEvent::Selecting`].
    Selecting,
    /// See [`GestureEvent::Click`].
    Click,
    /// See [`GestureEvent::DoubleClick`].
    DoubleClick,
    /// See [`GestureEvent::EndMove`].
    EndMove,
    /// See [`GestureEvent::Reset`].
    Reset,
    /// See [`GestureEvent::DropFromOutside`].
    DropFromOutside,
    /// See [`GestureEvent::DragOverFromOutside`].
    DragOverFromOutside,
    /// See [`GestureEvent::ProbeEventDrag`].
    ProbeEventDrag,
    /// See [`GestureEvent::ClearRangePreviews`].
    ClearRangePreviews,
}

impl GestureEvent {
    /// The registration name this event dispatches under.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::BeforeSelect { .. } => EventKind::BeforeSelect,
            Self::SelectStart { .. } => EventKind::SelectStart,
            Self::Selecting { .. } => EventKind::Selecting,
            Self::Click { .. } => EventKind::Click,
            Self::DoubleClick { .. } => EventKind::DoubleClick,
            Self::EndMove { .. } => EventKind::EndMove,
            Self::Reset => EventKind::Reset,
            Self::DropFromOutside { .. } => EventKind::DropFromOutside,
            Self::DragOverFromOutside { .. } => EventKind::DragOverFromOutside,
            Self::ProbeEventDrag { .. } => EventKind::ProbeEventDrag,
            Self::ClearRangePreviews => EventKind::ClearRangePreviews,
        }
    }
}
