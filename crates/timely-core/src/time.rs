// crates/timely-core/src/time.rs
//
// Second-granularity timestamps and clocks.
//
// `TimePointSec` is an unsigned 32-bit count of seconds since the Unix epoch,
// written as `YYYY-MM-DDTHH:MM:SS` (UTC, no zone suffix) in rows and on the
// command line. Parsing also accepts a fractional part and a trailing `Z`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::TimelyError;
use crate::traits::Clock;

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: u64 = 86_400;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A point in time with one-second granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimePointSec(u32);

impl TimePointSec {
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn secs(&self) -> u32 {
        self.0
    }

    /// Seconds from `earlier` to `self`, or zero if `earlier` is later.
    pub fn saturating_since(&self, earlier: TimePointSec) -> u64 {
        self.0.saturating_sub(earlier.0) as u64
    }

    /// Convert a chrono UTC datetime, rejecting instants outside the u32 range.
    pub fn from_datetime(dt: DateTime<Utc>) -> Result<Self, TimelyError> {
        let secs = dt.timestamp();
        u32::try_from(secs)
            .map(Self)
            .map_err(|_| TimelyError::MalformedTime(format!("{} is outside the supported range", dt)))
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        // Every u32 second count is a representable chrono instant.
        DateTime::from_timestamp(self.0 as i64, 0).unwrap_or_default()
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_datetime().format(FORMAT))
    }
}

impl FromStr for TimePointSec {
    type Err = TimelyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('Z');
        let naive = NaiveDateTime::parse_from_str(trimmed, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(|e| TimelyError::MalformedTime(format!("{:?}: {}", s, e)))?;
        Self::from_datetime(naive.and_utc())
    }
}

impl TryFrom<String> for TimePointSec {
    type Error = TimelyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimePointSec> for String {
    fn from(t: TimePointSec) -> Self {
        t.to_string()
    }
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimePointSec {
        let secs = Utc::now().timestamp().clamp(0, u32::MAX as i64);
        TimePointSec(secs as u32)
    }
}

/// Clock that only moves when told to. Used by tests and the CLI `--now` flag.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicU32,
}

impl ManualClock {
    pub fn new(start: TimePointSec) -> Self {
        Self {
            secs: AtomicU32::new(start.0),
        }
    }

    /// Move the clock to `t`. Callers are expected not to move it backwards.
    pub fn set(&self, t: TimePointSec) {
        self.secs.store(t.0, Ordering::SeqCst);
    }

    /// Move the clock forward, stopping at the last representable second.
    pub fn advance(&self, seconds: u32) {
        // the closure never returns None, so the update always succeeds
        let _ = self
            .secs
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |s| Some(s.saturating_add(seconds)));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimePointSec {
        TimePointSec(self.secs.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let t: TimePointSec = "2022-01-02T00:00:00".parse().unwrap();
        assert_eq!(t.secs(), 1_641_081_600);
        assert_eq!(t.to_string(), "2022-01-02T00:00:00");
    }

    #[test]
    fn test_parse_accepts_millis_and_zulu() {
        let a: TimePointSec = "2022-01-02T10:00:00.000Z".parse().unwrap();
        let b: TimePointSec = "2022-01-02T10:00:00".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_garbage_and_pre_epoch() {
        assert!("yesterday".parse::<TimePointSec>().is_err());
        assert!("1969-12-31T23:59:59".parse::<TimePointSec>().is_err());
    }

    #[test]
    fn test_saturating_since() {
        let a = TimePointSec::from_secs(100);
        let b = TimePointSec::from_secs(160);
        assert_eq!(b.saturating_since(a), 60);
        assert_eq!(a.saturating_since(b), 0);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(TimePointSec::from_secs(10));
        assert_eq!(clock.now().secs(), 10);
        clock.advance(5);
        assert_eq!(clock.now().secs(), 15);
        clock.set(TimePointSec::from_secs(100));
        assert_eq!(clock.now().secs(), 100);
    }

    #[test]
    fn test_manual_clock_advance_saturates() {
        let clock = ManualClock::new(TimePointSec::from_secs(u32::MAX - 10));
        clock.advance(60);
        assert_eq!(clock.now().secs(), u32::MAX);
        clock.advance(1);
        assert_eq!(clock.now().secs(), u32::MAX);
    }
}
