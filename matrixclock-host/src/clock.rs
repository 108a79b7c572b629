//! System clock and IANA timezone database

use chrono::{Datelike, Timelike, Utc};
use chrono_tz::Tz;

use matrixclock_core::traits::{LocalTime, TimeError, TimeSource, ZoneDirectory};

/// Wall clock backed by the system time and the bundled tz database
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoClock;

impl ChronoClock {
    fn zone(timezone: &str) -> Result<Tz, TimeError> {
        timezone.parse().map_err(|_| TimeError::UnknownZone)
    }
}

impl TimeSource for ChronoClock {
    fn now(&self, timezone: &str) -> Result<LocalTime, TimeError> {
        let zone = Self::zone(timezone)?;
        Ok(local_time(&Utc::now().with_timezone(&zone)))
    }
}

impl ZoneDirectory for ChronoClock {
    fn contains(&self, timezone: &str) -> bool {
        Self::zone(timezone).is_ok()
    }
}

fn local_time<T: Datelike + Timelike>(t: &T) -> LocalTime {
    LocalTime::new(
        t.year(),
        t.month() as u8,
        t.day() as u8,
        t.hour() as u8,
        t.minute() as u8,
        // Leap seconds live in the nanosecond field, but clamp anyway
        t.second().min(59) as u8,
    )
}

/// Sample a fixed UTC instant in `timezone`
#[cfg(test)]
fn at(timezone: &str, utc: chrono::DateTime<Utc>) -> Result<LocalTime, TimeError> {
    let zone = ChronoClock::zone(timezone)?;
    Ok(local_time(&utc.with_timezone(&zone)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32, s: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, h, m, s).single().unwrap()
    }

    #[test]
    fn test_known_zones() {
        assert!(ChronoClock.contains("Europe/Paris"));
        assert!(ChronoClock.contains("Asia/Dhaka"));
        assert!(ChronoClock.contains("UTC"));
        assert!(!ChronoClock.contains("Mars/Olympus_Mons"));
        assert!(!ChronoClock.contains(""));
    }

    #[test]
    fn test_now_in_unknown_zone_fails() {
        assert_eq!(ChronoClock.now("Nowhere/Void"), Err(TimeError::UnknownZone));
    }

    #[test]
    fn test_now_is_in_range() {
        let now = ChronoClock.now("Asia/Dhaka").unwrap();
        assert!(now.hour < 24);
        assert!(now.minute < 60);
        assert!(now.second < 60);
        assert!((1..=12).contains(&now.month));
    }

    #[test]
    fn test_zone_conversion() {
        // Dhaka is UTC+6 year round
        assert_eq!(
            at("Asia/Dhaka", utc(20, 15, 30)),
            Ok(LocalTime::new(2026, 10, 20, 2, 15, 30))
        );
        // Paris is still on summer time (UTC+2) on 19 October
        assert_eq!(
            at("Europe/Paris", utc(12, 32, 10)),
            Ok(LocalTime::new(2026, 10, 19, 14, 32, 10))
        );
    }
}
