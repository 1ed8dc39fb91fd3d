//! Countdown units and ordered unit sets.
//!
//! A countdown is rendered into some subset of seven units, from years down to
//! seconds. Months and years use fixed lengths (30 and 365 days); they are
//! display buckets, not calendar arithmetic.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_countdown::unit::{Unit, UnitSet};
//!
//! let set: UnitSet = [Unit::Seconds, Unit::Days].into_iter().collect();
//! let order: Vec<Unit> = set.iter().collect();
//! assert_eq!(order, vec![Unit::Days, Unit::Seconds]);
//! assert_eq!(set.largest(), Some(Unit::Days));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_IN_MINUTE: u64 = 60;
const SECONDS_IN_HOUR: u64 = 60 * SECONDS_IN_MINUTE;
const SECONDS_IN_DAY: u64 = 24 * SECONDS_IN_HOUR;
const SECONDS_IN_WEEK: u64 = 7 * SECONDS_IN_DAY;
// Approximations: a month is 30 days and a year is 365 days.
const SECONDS_IN_MONTH: u64 = 30 * SECONDS_IN_DAY;
const SECONDS_IN_YEAR: u64 = 365 * SECONDS_IN_DAY;

/// One of the seven units a countdown can display.
///
/// Variants are declared largest first, so the derived `Ord` sorts years
/// before seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// 365 days.
    Years,
    /// 30 days.
    Months,
    /// 7 days.
    Weeks,
    /// 24 hours.
    Days,
    /// 60 minutes.
    Hours,
    /// 60 seconds.
    Minutes,
    /// The smallest unit.
    Seconds,
}

impl Unit {
    /// Every unit, largest to smallest.
    pub const ALL: [Unit; 7] = [
        Unit::Years,
        Unit::Months,
        Unit::Weeks,
        Unit::Days,
        Unit::Hours,
        Unit::Minutes,
        Unit::Seconds,
    ];

    /// Length of one unit in seconds.
    pub const fn seconds(self) -> u64 {
        match self {
            Unit::Years => SECONDS_IN_YEAR,
            Unit::Months => SECONDS_IN_MONTH,
            Unit::Weeks => SECONDS_IN_WEEK,
            Unit::Days => SECONDS_IN_DAY,
            Unit::Hours => SECONDS_IN_HOUR,
            Unit::Minutes => SECONDS_IN_MINUTE,
            Unit::Seconds => 1,
        }
    }

    /// Lowercase plural name, as used in slot names (`countdown-days`).
    pub const fn name(self) -> &'static str {
        match self {
            Unit::Years => "years",
            Unit::Months => "months",
            Unit::Weeks => "weeks",
            Unit::Days => "days",
            Unit::Hours => "hours",
            Unit::Minutes => "minutes",
            Unit::Seconds => "seconds",
        }
    }

    /// Position in [`Unit::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a [`Unit`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown countdown unit `{0}`")]
pub struct ParseUnitError(String);

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|unit| unit.name() == s)
            .ok_or_else(|| ParseUnitError(s.to_string()))
    }
}

/// An ordered subset of [`Unit`]s.
///
/// Iteration always goes from the largest unit to the smallest, whatever
/// order units were inserted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UnitSet(u8);

impl UnitSet {
    /// The empty set.
    pub const fn empty() -> Self {
        UnitSet(0)
    }

    /// All seven units.
    pub const fn all() -> Self {
        UnitSet(0b0111_1111)
    }

    /// Adds `unit` to the set.
    pub fn insert(&mut self, unit: Unit) {
        self.0 |= unit.bit();
    }

    /// Builder form of [`UnitSet::insert`].
    pub fn with(mut self, unit: Unit) -> Self {
        self.insert(unit);
        self
    }

    /// Whether `unit` is in the set.
    pub const fn contains(self, unit: Unit) -> bool {
        self.0 & unit.bit() != 0
    }

    /// Whether the set has no units.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of units in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The largest unit in the set, if any.
    pub fn largest(self) -> Option<Unit> {
        self.iter().next()
    }

    /// The smallest unit in the set, if any.
    pub fn smallest(self) -> Option<Unit> {
        self.iter().last()
    }

    /// Units in the set, largest first.
    pub fn iter(self) -> impl Iterator<Item = Unit> {
        Unit::ALL.into_iter().filter(move |unit| self.contains(*unit))
    }
}

impl FromIterator<Unit> for UnitSet {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        iter.into_iter().fold(UnitSet::empty(), UnitSet::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_factors() {
        assert_eq!(Unit::Years.seconds(), 86400 * 365);
        assert_eq!(Unit::Months.seconds(), 86400 * 30);
        assert_eq!(Unit::Weeks.seconds(), 86400 * 7);
        assert_eq!(Unit::Days.seconds(), 86400);
        assert_eq!(Unit::Hours.seconds(), 3600);
        assert_eq!(Unit::Minutes.seconds(), 60);
        assert_eq!(Unit::Seconds.seconds(), 1);
    }

    #[test]
    fn test_all_is_descending() {
        for pair in Unit::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].seconds() > pair[1].seconds());
        }
    }

    #[test]
    fn test_unit_names_roundtrip_through_from_str() {
        for unit in Unit::ALL {
            assert_eq!(unit.name().parse::<Unit>(), Ok(unit));
            assert_eq!(unit.to_string(), unit.name());
        }
        assert!("fortnights".parse::<Unit>().is_err());
        assert!("Days".parse::<Unit>().is_err());
    }

    #[test]
    fn test_unit_serde_uses_names() {
        let json = serde_json::to_string(&Unit::Minutes).unwrap();
        assert_eq!(json, "\"minutes\"");
        let unit: Unit = serde_json::from_str("\"weeks\"").unwrap();
        assert_eq!(unit, Unit::Weeks);
    }

    #[test]
    fn test_unit_set_iterates_largest_first() {
        let set = UnitSet::empty()
            .with(Unit::Seconds)
            .with(Unit::Years)
            .with(Unit::Hours);

        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Unit::Years, Unit::Hours, Unit::Seconds]
        );
        assert_eq!(set.len(), 3);
        assert_eq!(set.largest(), Some(Unit::Years));
        assert_eq!(set.smallest(), Some(Unit::Seconds));
    }

    #[test]
    fn test_unit_set_membership() {
        let set: UnitSet = [Unit::Days, Unit::Minutes].into_iter().collect();
        assert!(set.contains(Unit::Days));
        assert!(set.contains(Unit::Minutes));
        assert!(!set.contains(Unit::Hours));

        let empty = UnitSet::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.largest(), None);
        assert_eq!(UnitSet::all().len(), 7);
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut set = UnitSet::empty();
        set.insert(Unit::Weeks);
        set.insert(Unit::Weeks);
        assert_eq!(set.len(), 1);
    }
}
