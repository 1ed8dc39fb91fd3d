//! Interval decomposition.
//!
//! Breaks a duration into a caller-chosen subset of [`Unit`]s, largest unit
//! first, each remainder feeding the next requested unit. Units that were not
//! requested never show up in the result, so callers can tell "zero days"
//! apart from "days not displayed".
//!
//! Because only requested units consume time, asking for `minutes` and
//! `seconds` alone folds every larger unit into the minutes count:
//!
//! ```rust
//! use bubbletea_countdown::interval::decompose;
//! use bubbletea_countdown::unit::{Unit, UnitSet};
//!
//! // 2 days, 3 hours, 4 minutes and 5 seconds
//! let millis = 1000 * (2 * 86400 + 3 * 3600 + 4 * 60 + 5);
//! let units = UnitSet::empty().with(Unit::Minutes).with(Unit::Seconds);
//!
//! let remaining = decompose(millis, units);
//! assert_eq!(remaining.get(Unit::Minutes), Some(2 * 24 * 60 + 3 * 60 + 4));
//! assert_eq!(remaining.get(Unit::Seconds), Some(5));
//! assert_eq!(remaining.get(Unit::Days), None);
//! ```

use crate::unit::{Unit, UnitSet};
use chrono::{DateTime, TimeZone};

/// Unit values produced by [`decompose`].
///
/// Holds exactly the units of the [`UnitSet`] it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRemaining {
    values: [Option<u64>; 7],
}

impl TimeRemaining {
    /// A value for every unit in `units`, all zero.
    pub fn zero(units: UnitSet) -> Self {
        let mut remaining = TimeRemaining::default();
        for unit in units.iter() {
            remaining.values[unit.index()] = Some(0);
        }
        remaining
    }

    /// The value for `unit`, or `None` if it was not requested.
    pub fn get(&self, unit: Unit) -> Option<u64> {
        self.values[unit.index()]
    }

    /// The units present in this result.
    pub fn units(&self) -> UnitSet {
        self.iter().map(|(unit, _)| unit).collect()
    }

    /// `(unit, value)` pairs, largest unit first.
    pub fn iter(&self) -> impl Iterator<Item = (Unit, u64)> + '_ {
        Unit::ALL
            .into_iter()
            .filter_map(|unit| self.get(unit).map(|value| (unit, value)))
    }

    /// Re-expresses the result in seconds using each unit's fixed length.
    pub fn total_seconds(&self) -> u64 {
        self.iter().map(|(unit, value)| value * unit.seconds()).sum()
    }

    /// Whether every present value is zero.
    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, value)| value == 0)
    }
}

/// Splits `duration_millis` into the requested `units`.
///
/// Negative durations are treated as zero. Sub-second precision is dropped
/// before any unit is computed.
pub fn decompose(duration_millis: i64, units: UnitSet) -> TimeRemaining {
    let mut remaining_secs = duration_millis.max(0).unsigned_abs() / 1000;
    let mut result = TimeRemaining::default();

    for unit in units.iter() {
        let factor = unit.seconds();
        result.values[unit.index()] = Some(remaining_secs / factor);
        remaining_secs %= factor;
    }

    result
}

/// Decomposes the absolute time between two instants.
///
/// The order of `start` and `end` does not matter.
///
/// ```rust
/// use bubbletea_countdown::interval::decompose_between;
/// use bubbletea_countdown::unit::{Unit, UnitSet};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2023, 1, 1, 2, 5, 10).unwrap();
/// let units = UnitSet::empty().with(Unit::Hours).with(Unit::Minutes);
///
/// let remaining = decompose_between(&start, &end, units);
/// assert_eq!(remaining.get(Unit::Hours), Some(2));
/// assert_eq!(remaining.get(Unit::Minutes), Some(5));
/// ```
pub fn decompose_between<Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
    units: UnitSet,
) -> TimeRemaining {
    let millis = end
        .clone()
        .signed_duration_since(start.clone())
        .num_milliseconds()
        .saturating_abs();
    decompose(millis, units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn set(units: &[Unit]) -> UnitSet {
        units.iter().copied().collect()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_same_instant_is_all_zero() {
        let at = utc(2023, 1, 1, 12, 0, 0);
        let units = set(&[
            Unit::Weeks,
            Unit::Days,
            Unit::Hours,
            Unit::Minutes,
            Unit::Seconds,
        ]);

        let result = decompose_between(&at, &at, units);
        assert_eq!(result, TimeRemaining::zero(units));
        assert!(result.is_zero());
    }

    #[test]
    fn test_all_units_except_months() {
        let start = utc(2023, 1, 1, 0, 0, 0);
        let end = utc(2025, 3, 10, 15, 30, 45);
        let units = set(&[
            Unit::Years,
            Unit::Weeks,
            Unit::Days,
            Unit::Hours,
            Unit::Minutes,
            Unit::Seconds,
        ]);

        let result = decompose_between(&start, &end, units);
        let values: Vec<_> = result.iter().collect();
        assert_eq!(
            values,
            vec![
                (Unit::Years, 2),
                (Unit::Weeks, 9),
                (Unit::Days, 6),
                (Unit::Hours, 15),
                (Unit::Minutes, 30),
                (Unit::Seconds, 45),
            ]
        );
        assert_eq!(result.get(Unit::Months), None);
    }

    #[test]
    fn test_only_requested_units_are_present() {
        let start = utc(2023, 1, 1, 0, 0, 0);
        let end = utc(2023, 1, 1, 2, 5, 10);

        let result = decompose_between(&start, &end, set(&[Unit::Hours, Unit::Minutes]));
        assert_eq!(result.get(Unit::Hours), Some(2));
        assert_eq!(result.get(Unit::Minutes), Some(5));
        for unit in [Unit::Years, Unit::Months, Unit::Weeks, Unit::Days, Unit::Seconds] {
            assert_eq!(result.get(unit), None, "{unit} should not be present");
        }
        assert_eq!(result.units(), set(&[Unit::Hours, Unit::Minutes]));
    }

    #[test]
    fn test_years_only() {
        // 2023 and 2024 together are 731 days, still two 365-day years.
        let result = decompose_between(
            &utc(2023, 1, 1, 0, 0, 0),
            &utc(2025, 1, 1, 0, 0, 0),
            set(&[Unit::Years]),
        );
        assert_eq!(result.iter().collect::<Vec<_>>(), vec![(Unit::Years, 2)]);
    }

    #[test]
    fn test_months_are_thirty_days() {
        let start = utc(2023, 1, 1, 0, 0, 0);

        let months_only = decompose_between(&start, &utc(2023, 3, 2, 0, 0, 0), set(&[Unit::Months]));
        assert_eq!(months_only.iter().collect::<Vec<_>>(), vec![(Unit::Months, 2)]);

        let months_days = decompose_between(
            &start,
            &utc(2023, 3, 10, 0, 0, 0),
            set(&[Unit::Months, Unit::Days]),
        );
        assert_eq!(
            months_days.iter().collect::<Vec<_>>(),
            vec![(Unit::Months, 2), (Unit::Days, 8)]
        );
    }

    #[test]
    fn test_years_months_days() {
        let result = decompose_between(
            &utc(2023, 1, 1, 0, 0, 0),
            &utc(2025, 5, 15, 0, 0, 0),
            set(&[Unit::Years, Unit::Months, Unit::Days]),
        );
        // 865 days = 2 * 365 + 4 * 30 + 15
        assert_eq!(
            result.iter().collect::<Vec<_>>(),
            vec![(Unit::Years, 2), (Unit::Months, 4), (Unit::Days, 15)]
        );
    }

    #[test]
    fn test_argument_order_does_not_matter() {
        let a = utc(2023, 1, 1, 0, 0, 0);
        let b = utc(2023, 1, 3, 4, 5, 6);
        let units = UnitSet::all();
        assert_eq!(decompose_between(&a, &b, units), decompose_between(&b, &a, units));
    }

    #[test]
    fn test_negative_duration_clamps_to_zero() {
        let units = set(&[Unit::Minutes, Unit::Seconds]);
        assert_eq!(decompose(-10_000, units), TimeRemaining::zero(units));
        assert_eq!(decompose(i64::MIN, units), TimeRemaining::zero(units));
    }

    #[test]
    fn test_sub_second_precision_is_truncated() {
        let units = set(&[Unit::Seconds]);
        assert_eq!(decompose(999, units).get(Unit::Seconds), Some(0));
        assert_eq!(decompose(2_999, units).get(Unit::Seconds), Some(2));
    }

    #[test]
    fn test_carry_into_largest_requested_unit() {
        let millis = 1000 * (2 * 86400 + 3 * 3600 + 4 * 60 + 5);

        let partial = decompose(millis, set(&[Unit::Minutes, Unit::Seconds]));
        assert_eq!(partial.get(Unit::Minutes), Some(2 * 24 * 60 + 3 * 60 + 4));
        assert_eq!(partial.get(Unit::Seconds), Some(5));

        let full = decompose(
            millis,
            set(&[Unit::Days, Unit::Hours, Unit::Minutes, Unit::Seconds]),
        );
        assert_eq!(
            full.iter().collect::<Vec<_>>(),
            vec![
                (Unit::Days, 2),
                (Unit::Hours, 3),
                (Unit::Minutes, 4),
                (Unit::Seconds, 5)
            ]
        );
    }

    #[test]
    fn test_reconstruction_matches_duration() {
        let durations = [0_i64, 1_500, 59_999, 3_600_000, 98_765_432, 40_000_000_000];
        let unit_sets = [
            UnitSet::all(),
            set(&[Unit::Hours]),
            set(&[Unit::Years, Unit::Minutes]),
            set(&[Unit::Weeks, Unit::Seconds]),
            set(&[Unit::Months, Unit::Days, Unit::Hours]),
        ];

        for millis in durations {
            let secs = millis as u64 / 1000;
            for units in unit_sets {
                let result = decompose(millis, units);
                assert_eq!(result.units(), units);

                let smallest = units.smallest().unwrap().seconds();
                assert_eq!(
                    result.total_seconds(),
                    secs - secs % smallest,
                    "millis={millis} units={units:?}"
                );
            }
        }
    }

    #[test]
    fn test_decompose_is_deterministic() {
        let units = set(&[Unit::Days, Unit::Seconds]);
        assert_eq!(decompose(123_456_789, units), decompose(123_456_789, units));
    }

    #[test]
    fn test_empty_unit_set_yields_empty_result() {
        let result = decompose(86_400_000, UnitSet::empty());
        assert_eq!(result.iter().count(), 0);
        assert!(result.units().is_empty());
    }
}
