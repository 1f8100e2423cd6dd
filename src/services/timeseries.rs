//! Date alignment over `timeDefines` arrays.
//!
//! Series in one forecast edition have different cardinalities: weather
//! codes carry one sample per day, precipitation probability one per
//! six-hour bucket, temperatures one per min/max slot. All of them are
//! aligned to a calendar date the same way: parse each timestamp, take its
//! date in the offset the timestamp was published with, and scan the whole
//! array. Upstream ordering is a convention, not a contract, so no early
//! exit on "past the date".

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::errors::AppError;

/// A series timestamp compared at calendar-date granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePoint(DateTime<FixedOffset>);

impl TimePoint {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        DateTime::parse_from_rfc3339(raw)
            .map(TimePoint)
            .map_err(|e| AppError::DataFormat(format!("invalid timestamp '{}': {}", raw, e)))
    }

    /// Calendar date in the series' own reporting offset.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

/// Parse a whole `timeDefines` array.
pub fn parse_time_defines(raw: &[String]) -> Result<Vec<TimePoint>, AppError> {
    raw.iter().map(|s| TimePoint::parse(s)).collect()
}

/// Single-match mode: first index whose date equals `target`.
pub fn locate_first(timestamps: &[TimePoint], target: NaiveDate) -> Result<usize, AppError> {
    timestamps
        .iter()
        .position(|tp| tp.date() == target)
        .ok_or(AppError::DateNotFound(target))
}

/// Multi-match mode: every index whose date equals `target`, in series order.
pub fn locate_all(timestamps: &[TimePoint], target: NaiveDate) -> Result<Vec<usize>, AppError> {
    let indices: Vec<usize> = timestamps
        .iter()
        .enumerate()
        .filter(|(_, tp)| tp.date() == target)
        .map(|(i, _)| i)
        .collect();

    if indices.is_empty() {
        return Err(AppError::DateNotFound(target));
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[&str]) -> Vec<TimePoint> {
        raw.iter().map(|s| TimePoint::parse(s).unwrap()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_uses_published_offset() {
        let tp = TimePoint::parse("2026-10-19T08:00:00+09:00").unwrap();
        assert_eq!(tp.date(), date(2026, 10, 19));
        let late = TimePoint::parse("2026-10-18T23:30:00+09:00").unwrap();
        assert_eq!(late.date(), date(2026, 10, 18));
        // Same instant, UTC view: still 10-18 14:30
        let utc = TimePoint::parse("2026-10-18T14:30:00Z").unwrap();
        assert_eq!(utc.date(), date(2026, 10, 18));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = TimePoint::parse("tomorrow").unwrap_err();
        assert!(matches!(err, AppError::DataFormat(_)));
    }

    #[test]
    fn test_locate_first_daily_series() {
        let ts = points(&[
            "2026-10-18T17:00:00+09:00",
            "2026-10-19T00:00:00+09:00",
            "2026-10-20T00:00:00+09:00",
        ]);
        assert_eq!(locate_first(&ts, date(2026, 10, 19)).unwrap(), 1);
        assert_eq!(locate_first(&ts, date(2026, 10, 20)).unwrap(), 2);
    }

    #[test]
    fn test_locate_first_returns_first_of_duplicates() {
        let ts = points(&[
            "2026-10-19T00:00:00+09:00",
            "2026-10-19T09:00:00+09:00",
        ]);
        assert_eq!(locate_first(&ts, date(2026, 10, 19)).unwrap(), 0);
    }

    #[test]
    fn test_locate_first_every_date_of_a_permutation() {
        let ts = points(&[
            "2026-10-21T00:00:00+09:00",
            "2026-10-19T00:00:00+09:00",
            "2026-10-22T00:00:00+09:00",
            "2026-10-20T00:00:00+09:00",
        ]);
        for (expected, tp) in ts.iter().enumerate() {
            assert_eq!(locate_first(&ts, tp.date()).unwrap(), expected);
        }
    }

    #[test]
    fn test_locate_first_missing_date() {
        let ts = points(&["2026-10-18T17:00:00+09:00"]);
        let err = locate_first(&ts, date(2026, 10, 19)).unwrap_err();
        assert!(matches!(err, AppError::DateNotFound(d) if d == date(2026, 10, 19)));
    }

    #[test]
    fn test_locate_all_buckets_in_order() {
        let ts = points(&[
            "2026-10-18T18:00:00+09:00",
            "2026-10-19T00:00:00+09:00",
            "2026-10-19T06:00:00+09:00",
            "2026-10-19T12:00:00+09:00",
            "2026-10-19T18:00:00+09:00",
            "2026-10-20T00:00:00+09:00",
        ]);
        assert_eq!(locate_all(&ts, date(2026, 10, 19)).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_locate_all_unsorted_input() {
        let ts = points(&[
            "2026-10-19T12:00:00+09:00",
            "2026-10-20T00:00:00+09:00",
            "2026-10-19T00:00:00+09:00",
        ]);
        assert_eq!(locate_all(&ts, date(2026, 10, 19)).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_locate_all_count_matches_date_occurrences() {
        let ts = points(&[
            "2026-10-19T00:00:00+09:00",
            "2026-10-20T00:00:00+09:00",
            "2026-10-19T09:00:00+09:00",
            "2026-10-20T09:00:00+09:00",
            "2026-10-19T12:00:00+09:00",
        ]);
        for tp in &ts {
            let expected = ts.iter().filter(|o| o.date() == tp.date()).count();
            let found = locate_all(&ts, tp.date()).unwrap();
            assert_eq!(found.len(), expected);
            assert!(found.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_locate_all_missing_date() {
        let ts = points(&["2026-10-18T00:00:00+09:00"]);
        assert!(matches!(
            locate_all(&ts, date(2026, 10, 19)),
            Err(AppError::DateNotFound(_))
        ));
    }

    #[test]
    fn test_locate_all_empty_series() {
        assert!(matches!(
            locate_all(&[], date(2026, 10, 19)),
            Err(AppError::DateNotFound(_))
        ));
    }
}
