//! Per-day activity buckets for the calendar heatmap.
//!
//! Every calendar day in the range gets a bucket, including days with no
//! sessions, so the grid never has holes.

use crate::types::StudySession;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Days covered by the trailing window.
pub const TRAILING_DAYS: i64 = 365;

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// January 1 to December 31 of `year`.
    ///
    /// Returns `None` for years chrono cannot represent.
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    /// The `TRAILING_DAYS` days ending on `today`.
    pub fn trailing(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(TRAILING_DAYS - 1),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range (0 if inverted).
    pub fn num_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1).max(0) as usize
    }

    /// Whether start and end fall in the same calendar year.
    pub fn is_single_year(&self) -> bool {
        self.start.year() == self.end.year()
    }

    /// Every date in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Pick the heatmap range for a set of sessions.
///
/// Exactly one distinct year in the data shows that whole calendar year (even
/// days after `today`); anything else shows the trailing window.
pub fn heatmap_range(sessions: &[StudySession], today: NaiveDate) -> DateRange {
    let years: BTreeSet<i32> = sessions.iter().map(|s| s.date.year()).collect();
    if years.len() == 1 {
        if let Some(range) = years.first().and_then(|y| DateRange::year(*y)) {
            return range;
        }
    }
    DateRange::trailing(today)
}

/// Minutes recorded on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub minutes: u64,
    /// Minutes per topic within the day
    pub topics: BTreeMap<String, u64>,
}

impl DayBucket {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            minutes: 0,
            topics: BTreeMap::new(),
        }
    }

    /// Colour intensity 0–4 (0 = none, then <30, <60, <120, ≥120 minutes).
    pub fn intensity(&self) -> u8 {
        match self.minutes {
            0 => 0,
            1..=29 => 1,
            30..=59 => 2,
            60..=119 => 3,
            _ => 4,
        }
    }

    /// Topic breakdown, most minutes first.
    pub fn topics_by_minutes(&self) -> Vec<(&str, u64)> {
        let mut topics: Vec<(&str, u64)> =
            self.topics.iter().map(|(t, m)| (t.as_str(), *m)).collect();
        topics.sort_by(|a, b| b.1.cmp(&a.1));
        topics
    }
}

/// One zero-filled bucket per day of `range`; sessions outside are ignored.
pub fn daily_buckets(sessions: &[StudySession], range: DateRange) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = range.days().map(DayBucket::empty).collect();
    let index: HashMap<NaiveDate, usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.date, i))
        .collect();

    for session in sessions {
        if let Some(&i) = index.get(&session.date) {
            let bucket = &mut buckets[i];
            bucket.minutes += session.minutes as u64;
            *bucket.topics.entry(session.topic.clone()).or_default() += session.minutes as u64;
        }
    }
    buckets
}

/// Heatmap grid plus its headline numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    pub range: DateRange,
    pub days: Vec<DayBucket>,
}

impl Heatmap {
    /// Build a heatmap whose range is chosen from `range_source` and whose
    /// cells are filled from `sessions`.
    ///
    /// The range is usually chosen before the topic filter so switching topics
    /// keeps the same grid.
    pub fn build(range_source: &[StudySession], sessions: &[StudySession], today: NaiveDate) -> Self {
        let range = heatmap_range(range_source, today);
        Self {
            range,
            days: daily_buckets(sessions, range),
        }
    }

    pub fn total_minutes(&self) -> u64 {
        self.days.iter().map(|d| d.minutes).sum()
    }

    pub fn active_days(&self) -> usize {
        self.days.iter().filter(|d| d.minutes > 0).count()
    }

    pub fn busiest_day(&self) -> Option<&DayBucket> {
        self.days
            .iter()
            .filter(|d| d.minutes > 0)
            .fold(None, |best: Option<&DayBucket>, d| match best {
                Some(b) if d.minutes <= b.minutes => Some(b),
                _ => Some(d),
            })
    }

    /// Caption such as "420 minutes in 2024" or "420 minutes from 2023 to 2024".
    pub fn caption(&self) -> String {
        if self.range.is_single_year() {
            format!("{} minutes in {}", self.total_minutes(), self.range.start.year())
        } else {
            format!(
                "{} minutes from {} to {}",
                self.total_minutes(),
                self.range.start.year(),
                self.range.end.year()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn session(d: &str, topic: &str, minutes: u32) -> StudySession {
        StudySession::new(date(d), topic, minutes)
    }

    #[test]
    fn test_single_year_range_covers_whole_year() {
        let today = date("2024-03-01");
        let data = vec![session("2024-02-10", "DSA", 30)];
        let range = heatmap_range(&data, today);
        assert_eq!(range.start, date("2024-01-01"));
        assert_eq!(range.end, date("2024-12-31"));
        assert_eq!(range.num_days(), 366);
    }

    #[test]
    fn test_bucket_count_is_leap_aware() {
        let leap = daily_buckets(&[], DateRange::year(2024).unwrap());
        let common = daily_buckets(&[], DateRange::year(2023).unwrap());
        assert_eq!(leap.len(), 366);
        assert_eq!(common.len(), 365);
        assert_eq!(leap.first().unwrap().date, date("2024-01-01"));
        assert_eq!(leap.last().unwrap().date, date("2024-12-31"));
        assert!(leap.iter().all(|b| b.minutes == 0 && b.topics.is_empty()));
    }

    #[test]
    fn test_multi_year_or_empty_uses_trailing_window() {
        let today = date("2024-03-01");
        let data = vec![
            session("2023-12-31", "DSA", 30),
            session("2024-01-01", "DSA", 30),
        ];
        let range = heatmap_range(&data, today);
        assert_eq!(range.end, today);
        assert_eq!(range.num_days(), 365);
        assert_eq!(range.start, date("2023-03-03"));

        assert_eq!(heatmap_range(&[], today), range);
    }

    #[test]
    fn test_buckets_sum_per_day_with_topic_breakdown() {
        let data = vec![
            session("2024-05-01", "DSA", 30),
            session("2024-05-01", "Scala", 20),
            session("2024-05-01", "DSA", 15),
            session("2024-05-03", "Akka", 90),
            session("2025-01-01", "Akka", 90),
        ];
        let range = DateRange::new(date("2024-05-01"), date("2024-05-03"));
        let buckets = daily_buckets(&data, range);

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].minutes, 65);
        assert_eq!(buckets[0].topics["DSA"], 45);
        assert_eq!(buckets[0].topics["Scala"], 20);
        assert_eq!(buckets[0].topics_by_minutes()[0], ("DSA", 45));
        assert_eq!(buckets[1].minutes, 0);
        assert_eq!(buckets[2].minutes, 90);
    }

    #[test]
    fn test_intensity_levels() {
        let mut bucket = DayBucket::empty(date("2024-01-01"));
        let cases = [(0, 0), (29, 1), (30, 2), (59, 2), (60, 3), (119, 3), (120, 4)];
        for (minutes, level) in cases {
            bucket.minutes = minutes;
            assert_eq!(bucket.intensity(), level, "minutes = {}", minutes);
        }
    }

    #[test]
    fn test_heatmap_build_and_caption() {
        let today = date("2024-08-01");
        let all = vec![
            session("2024-02-01", "DSA", 100),
            session("2024-02-02", "Scala", 20),
        ];
        let only_dsa: Vec<_> = all.iter().filter(|s| s.topic == "DSA").cloned().collect();

        let heatmap = Heatmap::build(&all, &only_dsa, today);
        assert_eq!(heatmap.days.len(), 366);
        assert_eq!(heatmap.total_minutes(), 100);
        assert_eq!(heatmap.active_days(), 1);
        assert_eq!(heatmap.busiest_day().unwrap().date, date("2024-02-01"));
        assert_eq!(heatmap.caption(), "100 minutes in 2024");

        let multi = Heatmap::build(&[], &[], today);
        assert_eq!(multi.caption(), "0 minutes from 2023 to 2024");
        assert!(multi.busiest_day().is_none());
    }
}
