// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Geometry: page-coordinate geometry helpers for calendar grids.
//!
//! Everything in the gesture core reasons about **page coordinates**: the
//! coordinate space of the whole scrollable document, not the visible
//! viewport. A platform usually reports element bounds relative to the
//! viewport ("client" coordinates); [`bounds_on_page`] converts those into
//! page coordinates by adding the current scroll offset, and every other
//! helper in this crate assumes its inputs already live on the page.
//!
//! The helpers are deliberately tiny:
//!
//! - [`bounds_on_page`]: client bounds + scroll offset → page bounds.
//! - [`objects_collide`]: axis-aligned rectangle overlap with a per-edge
//!   [`Tolerance`]. A point is just a degenerate rectangle, so the same
//!   check serves "does the drag rectangle touch this cell" and "did the
//!   pointer land inside this node".
//! - [`point_in_box`]: inclusive point containment.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use trellis_geometry::{bounds_on_page, objects_collide, point_in_box, Tolerance};
//!
//! // A cell reported at (10, 20)..(110, 60) in the viewport, with the page
//! // scrolled down by 300 pixels.
//! let cell = bounds_on_page(Rect::new(10.0, 20.0, 110.0, 60.0), Vec2::new(0.0, 300.0));
//! assert_eq!(cell, Rect::new(10.0, 320.0, 110.0, 360.0));
//!
//! // The live drag rectangle overlaps the cell.
//! let drag = Rect::new(100.0, 350.0, 180.0, 420.0);
//! assert!(objects_collide(drag, cell, Tolerance::ZERO));
//!
//! // Points are inclusive on all edges.
//! assert!(point_in_box(cell, Point::new(110.0, 360.0)));
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

use kurbo::{Point, Rect, Vec2};

/// Per-edge slack applied when testing rectangle collision.
///
/// A positive tolerance on an edge lets rectangles that miss each other by
/// up to that many pixels still count as colliding; the zero tolerance is
/// the exact overlap test. Construct per-edge values directly, or use the
/// `From<f64>` impl for the common uniform case.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Tolerance {
    /// Slack applied to the top edge.
    pub top: f64,
    /// Slack applied to the left edge.
    pub left: f64,
    /// Slack applied to the bottom edge.
    pub bottom: f64,
    /// Slack applied to the right edge.
    pub right: f64,
}

impl Tolerance {
    /// The exact-overlap tolerance.
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// A uniform tolerance on all four edges.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }

    /// Grows `rect` outward by this tolerance.
    ///
    /// Used when a caller wants to pre-inflate a container's bounds and then
    /// run an exact containment or collision check against the result.
    #[must_use]
    pub fn inflate(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0 - self.left,
            rect.y0 - self.top,
            rect.x1 + self.right,
            rect.y1 + self.bottom,
        )
    }
}

impl From<f64> for Tolerance {
    fn from(value: f64) -> Self {
        Self::uniform(value)
    }
}

/// Converts viewport-relative bounds into page coordinates.
///
/// `scroll` is the current page scroll offset: how far the document has been
/// scrolled right (`x`) and down (`y`). The platform layer is expected to
/// read it once per query and pass it in; this crate never asks the
/// platform anything.
#[must_use]
pub fn bounds_on_page(client_rect: Rect, scroll: Vec2) -> Rect {
    client_rect + scroll
}

/// Axis-aligned collision between two rectangles with per-edge slack.
///
/// Two boxes collide unless one of the four edge-separation checks holds:
/// `a` ends above `b`, starts below `b`, ends left of `b`, or starts right
/// of `b`, each check relaxed by the corresponding tolerance edge. Passing
/// a degenerate rectangle (zero width and/or height) tests a point or a
/// line segment against a box.
#[must_use]
pub fn objects_collide(a: Rect, b: Rect, tolerance: impl Into<Tolerance>) -> bool {
    let t = tolerance.into();
    !(
        // 'a' bottom doesn't reach 'b' top
        a.y1 + t.bottom < b.y0
            // 'a' top is past 'b' bottom
            || a.y0 - t.top > b.y1
            // 'a' right doesn't reach 'b' left
            || a.x1 + t.right < b.x0
            // 'a' left is past 'b' right
            || a.x0 - t.left > b.x1
    )
}

/// Inclusive point-in-rectangle containment.
///
/// All four edges count as inside, matching how grid rows treat a pointer
/// resting exactly on a cell border.
#[must_use]
pub fn point_in_box(rect: Rect, point: Point) -> bool {
    point.y >= rect.y0 && point.y <= rect.y1 && point.x >= rect.x0 && point.x <= rect.x1
}

/// A point as a degenerate rectangle, for feeding [`objects_collide`].
#[must_use]
pub fn point_rect(point: Point) -> Rect {
    Rect::new(point.x, point.y, point.x, point.y)
}
