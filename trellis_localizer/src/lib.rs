// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Localizer: the injected date/time capability for calendar grids.
//!
//! The gesture and preview code never does calendar math itself; every
//! comparison, addition, and wall-clock merge goes through a [`Localizer`].
//! Embedders are expected to implement the trait on top of whatever date
//! library their application already uses; this crate ships two reference
//! implementations that are sufficient for the grid itself and for tests:
//!
//! - [`UtcLocalizer`]: plain epoch-millisecond arithmetic with no offset.
//!   Day boundaries are exact multiples of 24 hours.
//! - [`ShiftLocalizer`]: a clock whose UTC offset changes once, at a
//!   configured instant. This is the smallest model that exhibits
//!   daylight-saving behavior (a calendar day that is 23 or 25 hours long),
//!   which is exactly what duration-preservation logic must be tested
//!   against, without dragging in a timezone database.
//!
//! Times are carried as [`Timestamp`], a transparent count of milliseconds
//! since an arbitrary epoch. The trait deliberately has no formatting
//! surface: rendering labels is a presentation concern.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_localizer::{Localizer, Timestamp, Unit, UtcLocalizer};
//!
//! let l = UtcLocalizer;
//! let nine = Timestamp::from_millis(9 * 60 * 60 * 1000);
//! let ten = l.add(nine, 1, Unit::Hours);
//!
//! assert!(l.lt(nine, ten));
//! assert_eq!(l.diff_ms(nine, ten), 60 * 60 * 1000);
//! assert_eq!(l.start_of(ten, Unit::Days), Timestamp::from_millis(0));
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

/// Milliseconds since an arbitrary epoch.
///
/// The grid never interprets the absolute value; only the [`Localizer`] in
/// use assigns it calendar meaning. The type is totally ordered so range
/// bookkeeping (`min`/`max`, clamping) works without consulting the
/// localizer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Wraps a raw millisecond count.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// The raw millisecond count.
    #[must_use]
    pub const fn millis(self) -> i64 {
        self.0
    }
}

/// Calendar units understood by [`Localizer::add`] and friends.
///
/// `Milliseconds` through `Hours` are absolute durations; `Days` is a
/// *calendar* unit: adding one day lands on the same wall-clock time the
/// next day, which is not always 24 absolute hours.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Absolute milliseconds.
    Milliseconds,
    /// Absolute seconds.
    Seconds,
    /// Absolute minutes.
    Minutes,
    /// Absolute hours.
    Hours,
    /// Calendar days (wall-clock preserving).
    Days,
}

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Date/time capability consumed by the gesture core.
///
/// Comparisons and `min`/`max` have provided implementations in terms of
/// [`Timestamp`]'s total order; implementors supply the calendar-aware
/// operations. All operations are pure.
pub trait Localizer {
    /// Adds `amount` of `unit` to `t`.
    ///
    /// Absolute units shift the instant; [`Unit::Days`] preserves the
    /// wall-clock time across the day boundary (so it may shift the instant
    /// by 23 or 25 hours around a transition).
    fn add(&self, t: Timestamp, amount: i64, unit: Unit) -> Timestamp;

    /// Absolute difference `b − a` in milliseconds.
    ///
    /// This is the duration arithmetic the drag previews rely on: it is
    /// offset-independent by construction, so durations survive transitions.
    fn diff_ms(&self, a: Timestamp, b: Timestamp) -> i64 {
        b.millis() - a.millis()
    }

    /// Combines the calendar date of `date` with the wall-clock time of
    /// `time`.
    ///
    /// This is how a span drag keeps an event's time-of-day while changing
    /// which day it starts on.
    fn merge(&self, date: Timestamp, time: Timestamp) -> Timestamp;

    /// Truncates `t` down to the start of `unit` (wall clock for `Days`).
    fn start_of(&self, t: Timestamp, unit: Unit) -> Timestamp;

    /// Rounds `t` up to the next boundary of `unit`; identity when already
    /// on a boundary.
    fn ceil(&self, t: Timestamp, unit: Unit) -> Timestamp {
        let floored = self.start_of(t, unit);
        if floored == t { t } else { self.add(floored, 1, unit) }
    }

    /// `a < b`.
    fn lt(&self, a: Timestamp, b: Timestamp) -> bool {
        a < b
    }

    /// `a <= b`.
    fn lte(&self, a: Timestamp, b: Timestamp) -> bool {
        a <= b
    }

    /// `a > b`.
    fn gt(&self, a: Timestamp, b: Timestamp) -> bool {
        a > b
    }

    /// `a >= b`.
    fn gte(&self, a: Timestamp, b: Timestamp) -> bool {
        a >= b
    }

    /// `a == b` as instants.
    fn same(&self, a: Timestamp, b: Timestamp) -> bool {
        a == b
    }

    /// `a != b` as instants.
    fn neq(&self, a: Timestamp, b: Timestamp) -> bool {
        a != b
    }

    /// The earlier of the two instants.
    fn min(&self, a: Timestamp, b: Timestamp) -> Timestamp {
        if a <= b { a } else { b }
    }

    /// The later of the two instants.
    fn max(&self, a: Timestamp, b: Timestamp) -> Timestamp {
        if a >= b { a } else { b }
    }
}

fn absolute_ms(unit: Unit) -> Option<i64> {
    match unit {
        Unit::Milliseconds => Some(1),
        Unit::Seconds => Some(MS_PER_SECOND),
        Unit::Minutes => Some(MS_PER_MINUTE),
        Unit::Hours => Some(MS_PER_HOUR),
        Unit::Days => None,
    }
}

/// Offset-free localizer: wall clock equals the instant.
///
/// Day boundaries fall on exact multiples of 24 hours from the epoch, so
/// every calendar day is 24 absolute hours long.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UtcLocalizer;

impl Localizer for UtcLocalizer {
    fn add(&self, t: Timestamp, amount: i64, unit: Unit) -> Timestamp {
        let ms = absolute_ms(unit).unwrap_or(MS_PER_DAY);
        Timestamp::from_millis(t.millis() + amount * ms)
    }

    fn merge(&self, date: Timestamp, time: Timestamp) -> Timestamp {
        let day = date.millis().div_euclid(MS_PER_DAY) * MS_PER_DAY;
        let time_of_day = time.millis().rem_euclid(MS_PER_DAY);
        Timestamp::from_millis(day + time_of_day)
    }

    fn start_of(&self, t: Timestamp, unit: Unit) -> Timestamp {
        let ms = absolute_ms(unit).unwrap_or(MS_PER_DAY);
        Timestamp::from_millis(t.millis().div_euclid(ms) * ms)
    }
}

/// A clock whose UTC offset changes once, at `transition`.
///
/// Before the transition instant the wall clock runs at `offset_before_ms`
/// ahead of the instant; at and after it, `offset_after_ms`. A spring-forward
/// transition (`offset_after_ms > offset_before_ms`) produces one 23-hour
/// calendar day; fall-back produces a 25-hour day. Wall times inside the
/// skipped or repeated interval resolve with the post-transition offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShiftLocalizer {
    /// The instant at which the offset changes.
    pub transition: Timestamp,
    /// Wall-clock offset in milliseconds before the transition.
    pub offset_before_ms: i64,
    /// Wall-clock offset in milliseconds at and after the transition.
    pub offset_after_ms: i64,
}

impl ShiftLocalizer {
    /// A spring-forward transition at `transition`, jumping ahead by
    /// `jump_ms` (for example one hour).
    #[must_use]
    pub const fn spring_forward(transition: Timestamp, jump_ms: i64) -> Self {
        Self {
            transition,
            offset_before_ms: 0,
            offset_after_ms: jump_ms,
        }
    }

    fn offset_at(&self, t: Timestamp) -> i64 {
        if t < self.transition {
            self.offset_before_ms
        } else {
            self.offset_after_ms
        }
    }

    fn to_wall(&self, t: Timestamp) -> i64 {
        t.millis() + self.offset_at(t)
    }

    fn from_wall(&self, wall: i64) -> Timestamp {
        // Guess with the pre-transition offset, then re-resolve if the
        // candidate lands on the other side. Wall times in the ambiguous or
        // skipped window resolve with the post-transition offset.
        let candidate = Timestamp::from_millis(wall - self.offset_before_ms);
        if candidate < self.transition {
            candidate
        } else {
            Timestamp::from_millis(wall - self.offset_after_ms)
        }
    }
}

impl Localizer for ShiftLocalizer {
    fn add(&self, t: Timestamp, amount: i64, unit: Unit) -> Timestamp {
        match absolute_ms(unit) {
            Some(ms) => Timestamp::from_millis(t.millis() + amount * ms),
            // Calendar days: preserve the wall-clock time of day.
            None => self.from_wall(self.to_wall(t) + amount * MS_PER_DAY),
        }
    }

    fn merge(&self, date: Timestamp, time: Timestamp) -> Timestamp {
        let day = self.to_wall(date).div_euclid(MS_PER_DAY) * MS_PER_DAY;
        let time_of_day = self.to_wall(time).rem_euclid(MS_PER_DAY);
        self.from_wall(day + time_of_day)
    }

    fn start_of(&self, t: Timestamp, unit: Unit) -> Timestamp {
        match absolute_ms(unit) {
            Some(ms) => Timestamp::from_millis(t.millis().div_euclid(ms) * ms),
            None => self.from_wall(self.to_wall(t).div_euclid(MS_PER_DAY) * MS_PER_DAY),
        }
    }
}
