// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed raw input fed into the engine, and the viewport capability used to
//! scope gestures.
//!
//! The embedding host owns the platform event loop. For every native input
//! it builds one of these small value types, carrying page *and* client
//! coordinates, the pressed target's opaque id, and the host clock's
//! timestamp where the engine needs one, and feeds it to the engine. The
//! engine never calls back into the platform except through [`Viewport`],
//! which answers the two scoping questions a gesture start depends on.

use kurbo::{Point, Rect};

/// A pointer position in both coordinate spaces.
///
/// `page` is the document-space position (scroll-corrected); `client` is
/// viewport-relative. Selection geometry runs on `page`; container
/// hit-testing ("what is under the pointer right now") runs on `client`,
/// matching how platforms expose point queries.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GesturePoint {
    /// Document-space position.
    pub page: Point,
    /// Viewport-relative position.
    pub client: Point,
}

impl GesturePoint {
    /// A point whose page and client positions coincide (no scroll).
    #[must_use]
    pub const fn unscrolled(point: Point) -> Self {
        Self {
            page: point,
            client: point,
        }
    }
}

/// Opaque identifier of the platform node a press landed on.
///
/// The engine never interprets the value; it only hands it to
/// [`Viewport`] queries. Hosts typically use a scene-tree or DOM node
/// handle here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

bitflags::bitflags! {
    /// Keyboard modifier state tracked across a gesture.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CTRL  = 0b0000_0001;
        /// Meta / command key.
        const META  = 0b0000_0010;
        /// Shift key.
        const SHIFT = 0b0000_0100;
        /// Alt / option key.
        const ALT   = 0b0000_1000;
    }
}

/// Mouse button of a pointer press.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Button {
    /// The primary (usually left) button.
    #[default]
    Primary,
    /// The secondary (usually right) button. Never starts a gesture.
    Secondary,
    /// Any other button. Never starts a gesture.
    Auxiliary,
}

/// A mouse pointer press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerPress {
    /// Where the press landed.
    pub point: GesturePoint,
    /// The node under the press, when the host can resolve one.
    pub target: Option<TargetId>,
    /// Which button went down.
    pub button: Button,
}

/// A touch press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPress {
    /// Where the first touch landed.
    pub point: GesturePoint,
    /// The node under the touch, when the host can resolve one.
    pub target: Option<TargetId>,
}

/// Keys the engine cares about. Everything else is [`Key::Other`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// Escape cancels an in-flight gesture.
    Escape,
    /// Control modifier.
    Control,
    /// Meta / command modifier.
    Meta,
    /// Shift modifier.
    Shift,
    /// Alt / option modifier.
    Alt,
    /// Any other key; ignored.
    Other,
}

/// The engine's window onto the platform, resolved fresh on every gesture
/// start.
///
/// Implementations answer in *current* terms: the container may move,
/// resize, or disappear between gestures, which is why the engine never
/// caches any of these answers.
pub trait Viewport {
    /// Page-coordinate bounds of the container the engine is scoped to.
    ///
    /// `None` means the container cannot currently be resolved; a scoped
    /// engine then rejects every gesture rather than guessing.
    fn container_bounds(&self) -> Option<Rect>;

    /// Whether the element under `client` belongs to the container.
    ///
    /// This is the "what is at this point right now" query; it is asked of
    /// the press's client position before any gesture starts.
    fn over_container(&self, client: Point) -> bool;

    /// Whether `target` is a descendant of the container.
    fn target_in_container(&self, target: TargetId) -> bool;

    /// Whether `target` lies inside one of the configured valid sub-regions.
    ///
    /// Hosts with no such restriction keep the default.
    fn in_valid_region(&self, target: TargetId) -> bool {
        let _ = target;
        true
    }
}
