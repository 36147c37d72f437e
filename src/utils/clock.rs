use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Source of "now", injectable so date-boundary logic is testable.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to the service timezone. Streak comparisons always use the
/// calendar date in this offset, never the server's local time.
#[derive(Clone)]
pub struct ServiceClock {
    inner: std::sync::Arc<dyn Clock>,
    offset: FixedOffset,
}

impl ServiceClock {
    pub fn new(utc_offset_minutes: i32) -> Self {
        Self::with_clock(std::sync::Arc::new(SystemClock), utc_offset_minutes)
    }

    pub fn with_clock(inner: std::sync::Arc<dyn Clock>, utc_offset_minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_minutes * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        Self { inner, offset }
    }

    pub fn now_utc(&self) -> DateTime<Utc> {
        self.inner.now_utc()
    }

    /// Calendar date "today" in the service timezone.
    pub fn today(&self) -> NaiveDate {
        self.inner.now_utc().with_timezone(&self.offset).date_naive()
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use chrono::TimeZone;

    pub struct FixedClock(pub DateTime<Utc>);

    impl Clock for FixedClock {
        fn now_utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    pub fn clock_at(y: i32, m: u32, d: u32, h: u32, min: u32, offset_minutes: i32) -> ServiceClock {
        let at = Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap();
        ServiceClock::with_clock(std::sync::Arc::new(FixedClock(at)), offset_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::clock_at;
    use chrono::NaiveDate;

    #[test]
    fn test_today_uses_service_offset() {
        // 2026-03-01 20:00 UTC is already 2026-03-02 in UTC+9
        let clock = clock_at(2026, 3, 1, 20, 0, 540);
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_today_before_offset_midnight() {
        // 2026-03-01 10:00 UTC is still 2026-03-01 in UTC+9
        let clock = clock_at(2026, 3, 1, 10, 0, 540);
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_zero_offset() {
        let clock = clock_at(2026, 3, 1, 23, 59, 0);
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }
}
