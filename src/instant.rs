//! Target instant parsing and clocks.
//!
//! [`parse_instant`] turns the raw `until` value handed to a countdown into a
//! UTC instant. Values without an offset are read as UTC.
//!
//! ```rust
//! use bubbletea_countdown::instant::parse_instant;
//!
//! assert!(parse_instant("2025-03-10T15:30:45Z").is_some());
//! assert!(parse_instant("2025-03-10").is_some());
//! assert!(parse_instant("next tuesday").is_none());
//! assert!(parse_instant("").is_none());
//! ```

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a raw target value into an instant.
///
/// Accepts RFC 3339, RFC 2822, naive date-times and bare dates. Returns
/// `None` for anything else, including blank input.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Source of the current time for a countdown.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time via [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a host can keep one handle and
/// give another to a controller.
///
/// ```rust
/// use bubbletea_countdown::instant::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::default();
/// let handle = clock.clone();
/// let before = clock.now();
///
/// handle.advance(Duration::from_secs(2));
/// assert_eq!((clock.now() - before).num_seconds(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// A clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let delta = ChronoDuration::from_std(by).unwrap_or(ChronoDuration::MAX);
        let mut now = self.lock();
        *now = now.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    /// Jumps the clock to `at`.
    pub fn set(&self, at: DateTime<Utc>) {
        *self.lock() = at;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned clock still holds a valid instant.
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 15, 30, 45).unwrap();
        assert_eq!(parse_instant("2025-03-10T15:30:45Z"), Some(expected));
        assert_eq!(parse_instant("2025-03-10T15:30:45.000Z"), Some(expected));
        assert_eq!(parse_instant("2025-03-10T17:30:45+02:00"), Some(expected));
    }

    #[test]
    fn test_parse_rfc2822() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 15, 30, 45).unwrap();
        assert_eq!(
            parse_instant("Mon, 10 Mar 2025 15:30:45 +0000"),
            Some(expected)
        );
    }

    #[test]
    fn test_parse_naive_values_as_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 15, 30, 0).unwrap();
        assert_eq!(parse_instant("2025-03-10T15:30:00"), Some(expected));
        assert_eq!(parse_instant("2025-03-10 15:30:00"), Some(expected));
        assert_eq!(parse_instant("2025-03-10T15:30"), Some(expected));
        assert_eq!(
            parse_instant("2025-03-10"),
            Some(Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_instant("  2025-03-10T15:30:45Z \n").is_some());
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        for raw in ["", "   ", "soon", "2025-13-01", "2025-02-30T00:00:00Z", "12345"] {
            assert_eq!(parse_instant(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn test_manual_clock_is_shared_between_clones() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let other = clock.clone();

        other.advance(Duration::from_millis(1500));
        assert_eq!(clock.now(), start + ChronoDuration::milliseconds(1500));

        clock.set(start);
        assert_eq!(other.now(), start);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
