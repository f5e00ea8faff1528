//! Business-day calendar arithmetic.
//!
//! Weekends are Saturday and Sunday. Holidays come from a pluggable
//! [`HolidayCalendar`]; the stock [`FixedHolidays`] is filled from
//! configuration so no country or year is built in.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::ConfigError;

/// Source of non-working dates.
pub trait HolidayCalendar: Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A fixed set of holiday dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedHolidays {
    dates: BTreeSet<NaiveDate>,
}

impl FixedHolidays {
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Build from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first entry that is
    /// not a valid calendar date.
    pub fn parse<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dates = BTreeSet::new();
        for entry in entries {
            let raw = entry.as_ref().trim();
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                ConfigError::InvalidValue {
                    key: "calendar.holidays".to_string(),
                    message: format!("'{raw}' is not a YYYY-MM-DD date: {e}"),
                }
            })?;
            dates.insert(date);
        }
        Ok(Self { dates })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for FixedHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Weekend and holiday aware date helpers.
#[derive(Clone)]
pub struct DateIntelligence {
    holidays: Arc<dyn HolidayCalendar>,
}

impl DateIntelligence {
    pub fn new(holidays: Arc<dyn HolidayCalendar>) -> Self {
        Self { holidays }
    }

    /// Calendar with weekends only.
    pub fn without_holidays() -> Self {
        Self::new(Arc::new(FixedHolidays::default()))
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        is_weekend(date)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.is_holiday(date)
    }

    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Count business days after `start` up to and including `end`.
    ///
    /// Directional: returns 0 whenever `end <= start`.
    pub fn business_days_between(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if end <= start {
            return 0;
        }
        start
            .iter_days()
            .skip(1)
            .take_while(|day| *day <= end)
            .filter(|day| self.is_business_day(*day))
            .count() as u32
    }
}

impl Default for DateIntelligence {
    fn default() -> Self {
        Self::without_holidays()
    }
}

impl std::fmt::Debug for DateIntelligence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateIntelligence").finish_non_exhaustive()
    }
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekend_detection() {
        // 2026-10-17 is a Saturday
        assert!(is_weekend(date(2026, 10, 17)));
        assert!(is_weekend(date(2026, 10, 18)));
        assert!(!is_weekend(date(2026, 10, 19)));
        assert!(!is_weekend(date(2026, 10, 16)));
    }

    #[test]
    fn holiday_lookup_uses_configured_set() {
        let cal = DateIntelligence::new(Arc::new(
            FixedHolidays::parse(["2026-12-25", " 2027-01-01 "]).unwrap(),
        ));
        assert!(cal.is_holiday(date(2026, 12, 25)));
        assert!(cal.is_holiday(date(2027, 1, 1)));
        assert!(!cal.is_holiday(date(2026, 12, 24)));
    }

    #[test]
    fn parse_rejects_bad_entries() {
        let err = FixedHolidays::parse(["2026-02-30"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "calendar.holidays"));
    }

    #[test]
    fn business_days_skip_weekends() {
        let cal = DateIntelligence::default();
        // Fri -> next Fri: Mon..Fri
        assert_eq!(cal.business_days_between(date(2026, 10, 16), date(2026, 10, 23)), 5);
        // Fri -> Sun: nothing but weekend
        assert_eq!(cal.business_days_between(date(2026, 10, 16), date(2026, 10, 18)), 0);
        // Fri -> Mon
        assert_eq!(cal.business_days_between(date(2026, 10, 16), date(2026, 10, 19)), 1);
    }

    #[test]
    fn business_days_exclude_start_include_end() {
        let cal = DateIntelligence::default();
        // Mon -> Tue counts only Tue
        assert_eq!(cal.business_days_between(date(2026, 10, 19), date(2026, 10, 20)), 1);
    }

    #[test]
    fn business_days_skip_holidays() {
        let cal = DateIntelligence::new(Arc::new(FixedHolidays::new([date(2026, 10, 21)])));
        assert_eq!(cal.business_days_between(date(2026, 10, 19), date(2026, 10, 23)), 3);
    }

    #[test]
    fn business_days_zero_when_end_not_after_start() {
        let cal = DateIntelligence::default();
        let d = date(2026, 10, 20);
        assert_eq!(cal.business_days_between(d, d), 0);
        assert_eq!(cal.business_days_between(d, d.pred_opt().unwrap()), 0);
    }

    proptest! {
        #[test]
        fn business_days_never_exceed_calendar_days(offset in 0i64..2000, span in -30i64..400) {
            let cal = DateIntelligence::default();
            let start = date(2024, 1, 1) + chrono::Duration::days(offset);
            let end = start + chrono::Duration::days(span);
            let n = cal.business_days_between(start, end) as i64;
            prop_assert!(n <= span.max(0));
            if span <= 0 {
                prop_assert_eq!(n, 0);
            }
        }
    }
}
