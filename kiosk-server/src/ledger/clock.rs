//! Row timestamps
//!
//! Every row carries the date and time it was written, in the kiosks' local
//! time zone. The stamp is taken per row, so the rows of one order can differ
//! by a minute when appends are slow.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Time zone of every kiosk in the chain
pub const LEDGER_TIMEZONE: Tz = chrono_tz::America::Toronto;

/// Source of "now"
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant (tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Date and time columns of a ledger row
///
/// `date` is the short en-CA date (`2024-12-24`), `time` is 24-hour `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTimestamp {
    pub date: String,
    pub time: String,
}

impl LedgerTimestamp {
    pub fn at(instant: DateTime<Utc>) -> Self {
        let local = instant.with_timezone(&LEDGER_TIMEZONE);
        Self {
            date: local.format("%Y-%m-%d").to_string(),
            time: local.format("%H:%M").to_string(),
        }
    }

    pub fn now(clock: &dyn Clock) -> Self {
        Self::at(clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_winter_offset() {
        let at = Utc.with_ymd_and_hms(2024, 12, 24, 17, 5, 0).unwrap();
        let stamp = LedgerTimestamp::at(at);
        assert_eq!(stamp.date, "2024-12-24");
        assert_eq!(stamp.time, "12:05");
    }

    #[test]
    fn test_summer_offset_crosses_midnight() {
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 2, 30, 0).unwrap();
        let stamp = LedgerTimestamp::at(at);
        assert_eq!(stamp.date, "2024-06-30");
        assert_eq!(stamp.time, "22:30");
    }

    #[test]
    fn test_fixed_clock() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(LedgerTimestamp::now(&FixedClock::new(at)), LedgerTimestamp::at(at));
    }
}
