//! Calendar-aligned anchor sequences bounding the generation loops.
//!
//! All three iterators are lazy, finite and `Clone` (restartable).
//! Anchors may precede `start`: the month iterator begins at the first
//! of the month containing `start`, and the week iterator at the
//! Monday of the ISO week containing `start`. Emitters that place
//! concrete dates inside an anchored period clamp them back into the
//! requested range themselves.

use chrono::{Datelike, Duration, NaiveDate};

/// Error for an inverted date range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date range: start {start} is after end {end}")]
pub struct InvalidRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Check that `start <= end` before driving any generation loop.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), InvalidRange> {
    if start > end {
        return Err(InvalidRange { start, end });
    }
    Ok(())
}

/// See [`month_iterator`].
#[derive(Debug, Clone)]
pub struct MonthIterator {
    current: Option<NaiveDate>,
    end: NaiveDate,
}

/// First-of-month anchors for every month overlapping `[start, end]`,
/// strictly ascending, inclusive of the month containing `start`.
pub fn month_iterator(start: NaiveDate, end: NaiveDate) -> MonthIterator {
    MonthIterator {
        current: start.with_day(1),
        end,
    }
}

impl Iterator for MonthIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.current?;
        if current > self.end {
            self.current = None;
            return None;
        }
        self.current = next_month(current);
        Some(current)
    }
}

/// First day of the month after `anchor`, rolling over the year end.
fn next_month(anchor: NaiveDate) -> Option<NaiveDate> {
    if anchor.month() == 12 {
        NaiveDate::from_ymd_opt(anchor.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(anchor.year(), anchor.month() + 1, 1)
    }
}

/// See [`week_iterator`].
#[derive(Debug, Clone)]
pub struct WeekIterator {
    current: Option<NaiveDate>,
    end: NaiveDate,
}

/// Monday anchors for every ISO week overlapping `[start, end]`,
/// strictly ascending.
pub fn week_iterator(start: NaiveDate, end: NaiveDate) -> WeekIterator {
    let monday = start - Duration::days(i64::from(start.weekday().num_days_from_monday()));
    WeekIterator {
        current: Some(monday),
        end,
    }
}

impl Iterator for WeekIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.current?;
        if current > self.end {
            self.current = None;
            return None;
        }
        self.current = current.checked_add_signed(Duration::days(7));
        Some(current)
    }
}

/// See [`day_iterator`].
#[derive(Debug, Clone)]
pub struct DayIterator {
    current: Option<NaiveDate>,
    end: NaiveDate,
}

/// Every calendar day in `[start, end]`, ascending.
pub fn day_iterator(start: NaiveDate, end: NaiveDate) -> DayIterator {
    DayIterator {
        current: Some(start),
        end,
    }
}

impl Iterator for DayIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.current?;
        if current > self.end {
            self.current = None;
            return None;
        }
        self.current = current.succ_opt();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_iterator_single_month() {
        let months: Vec<_> = month_iterator(date(2024, 1, 1), date(2024, 1, 31)).collect();
        assert_eq!(months, vec![date(2024, 1, 1)]);
    }

    #[test]
    fn test_month_iterator_overlapping_second_month() {
        let months: Vec<_> = month_iterator(date(2024, 1, 1), date(2024, 2, 5)).collect();
        assert_eq!(months, vec![date(2024, 1, 1), date(2024, 2, 1)]);
    }

    #[test]
    fn test_month_iterator_mid_month_start() {
        let months: Vec<_> = month_iterator(date(2024, 3, 17), date(2024, 4, 2)).collect();
        assert_eq!(months, vec![date(2024, 3, 1), date(2024, 4, 1)]);
    }

    #[test]
    fn test_month_iterator_february_boundaries() {
        // Leap and non-leap February must not skip or duplicate March.
        let leap: Vec<_> = month_iterator(date(2024, 2, 1), date(2024, 3, 31)).collect();
        assert_eq!(leap, vec![date(2024, 2, 1), date(2024, 3, 1)]);
        let plain: Vec<_> = month_iterator(date(2023, 2, 1), date(2023, 3, 31)).collect();
        assert_eq!(plain, vec![date(2023, 2, 1), date(2023, 3, 1)]);
    }

    #[test]
    fn test_month_iterator_multi_year() {
        let months: Vec<_> = month_iterator(date(2022, 11, 20), date(2025, 2, 10)).collect();
        assert_eq!(months.len(), 28); // Nov 2022 ..= Feb 2025
        assert_eq!(months.first(), Some(&date(2022, 11, 1)));
        assert_eq!(months.last(), Some(&date(2025, 2, 1)));
        assert!(months.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_month_iterator_restartable() {
        let iter = month_iterator(date(2024, 1, 1), date(2024, 6, 30));
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_week_iterator_monday_anchors() {
        // 2024-01-03 is a Wednesday; its ISO week starts 2024-01-01.
        let weeks: Vec<_> = week_iterator(date(2024, 1, 3), date(2024, 1, 20)).collect();
        assert_eq!(
            weeks,
            vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]
        );
        assert!(weeks.iter().all(|d| d.weekday() == Weekday::Mon));
    }

    #[test]
    fn test_week_iterator_anchor_may_precede_start() {
        // 2024-02-04 is a Sunday; the overlapping week starts Jan 29.
        let weeks: Vec<_> = week_iterator(date(2024, 2, 4), date(2024, 2, 4)).collect();
        assert_eq!(weeks, vec![date(2024, 1, 29)]);
    }

    #[test]
    fn test_week_iterator_year_rollover() {
        let weeks: Vec<_> = week_iterator(date(2024, 12, 23), date(2025, 1, 8)).collect();
        assert_eq!(
            weeks,
            vec![date(2024, 12, 23), date(2024, 12, 30), date(2025, 1, 6)]
        );
    }

    #[test]
    fn test_day_iterator_inclusive() {
        let days: Vec<_> = day_iterator(date(2024, 2, 27), date(2024, 3, 1)).collect();
        assert_eq!(
            days,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1),
            ]
        );
    }

    #[test]
    fn test_day_iterator_single_day() {
        let days: Vec<_> = day_iterator(date(2024, 1, 1), date(2024, 1, 1)).collect();
        assert_eq!(days, vec![date(2024, 1, 1)]);
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
        let err = validate_range(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert_eq!(err.start, date(2024, 2, 1));
    }
}
