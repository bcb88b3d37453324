//! Seven-day activity trend.

use crate::types::StudySession;
use chrono::{Duration, NaiveDate};

pub const TREND_DAYS: i64 = 7;

/// Direction of the latest day-over-day change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Neutral => "neutral",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Neutral => "→",
        }
    }
}

/// Minutes per day over the trend window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trend {
    /// Oldest first, always `TREND_DAYS` entries
    pub days: Vec<(NaiveDate, u64)>,
    pub direction: TrendDirection,
}

impl Trend {
    /// Build the trend for the window ending at the latest date in `anchor`.
    ///
    /// `anchor` decides the window (falls back to `today` when empty);
    /// `sessions` fills it. Pass the unfiltered-by-topic set as the anchor so
    /// a topic switch does not move the window.
    pub fn build(anchor: &[StudySession], sessions: &[StudySession], today: NaiveDate) -> Self {
        let end = anchor.iter().map(|s| s.date).max().unwrap_or(today);
        let start = end - Duration::days(TREND_DAYS - 1);

        let days: Vec<(NaiveDate, u64)> = (0..TREND_DAYS)
            .map(|offset| {
                let date = start + Duration::days(offset);
                let minutes = sessions
                    .iter()
                    .filter(|s| s.date == date)
                    .map(|s| s.minutes as u64)
                    .sum();
                (date, minutes)
            })
            .collect();

        let direction = direction_of(&days);
        Self { days, direction }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.days.last().map(|(d, _)| *d)
    }

    pub fn total_minutes(&self) -> u64 {
        self.days.iter().map(|(_, m)| m).sum()
    }

    pub fn active_days(&self) -> usize {
        self.days.iter().filter(|(_, m)| *m > 0).count()
    }

    /// Rounded mean over days with activity (0 when none).
    pub fn avg_per_active_day(&self) -> u64 {
        match self.active_days() {
            0 => 0,
            n => (self.total_minutes() as f64 / n as f64).round() as u64,
        }
    }
}

fn direction_of(days: &[(NaiveDate, u64)]) -> TrendDirection {
    let active = days.iter().filter(|(_, m)| *m > 0).count();
    if active < 2 || days.len() < 2 {
        return TrendDirection::Neutral;
    }
    let last = days[days.len() - 1].1;
    let previous = days[days.len() - 2].1;
    match last.cmp(&previous) {
        std::cmp::Ordering::Greater => TrendDirection::Up,
        std::cmp::Ordering::Less => TrendDirection::Down,
        std::cmp::Ordering::Equal => TrendDirection::Neutral,
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
    fn test_empty_trend_ends_today() {
        let trend = Trend::build(&[], &[], date("2024-05-10"));
        assert_eq!(trend.days.len(), 7);
        assert_eq!(trend.end(), Some(date("2024-05-10")));
        assert_eq!(trend.days[0].0, date("2024-05-04"));
        assert_eq!(trend.direction, TrendDirection::Neutral);
        assert_eq!(trend.avg_per_active_day(), 0);
    }

    #[test]
    fn test_window_ends_at_latest_session() {
        let data = vec![
            session("2024-05-01", "DSA", 30),
            session("2024-05-03", "DSA", 60),
            session("2024-04-20", "DSA", 999),
        ];
        let trend = Trend::build(&data, &data, date("2024-06-01"));
        assert_eq!(trend.end(), Some(date("2024-05-03")));
        assert_eq!(trend.total_minutes(), 90);
        assert_eq!(trend.active_days(), 2);
        assert_eq!(trend.avg_per_active_day(), 45);
        // Last day 60 vs previous day 0.
        assert_eq!(trend.direction, TrendDirection::Up);
    }

    #[test]
    fn test_direction_compares_last_two_days() {
        let data = vec![
            session("2024-05-02", "DSA", 90),
            session("2024-05-03", "DSA", 30),
        ];
        let trend = Trend::build(&data, &data, date("2024-05-03"));
        assert_eq!(trend.direction, TrendDirection::Down);

        let data = vec![
            session("2024-05-02", "DSA", 30),
            session("2024-05-03", "Scala", 30),
        ];
        let trend = Trend::build(&data, &data, date("2024-05-03"));
        assert_eq!(trend.direction, TrendDirection::Neutral);
    }

    #[test]
    fn test_single_active_day_is_neutral() {
        let data = vec![session("2024-05-03", "DSA", 30)];
        let trend = Trend::build(&data, &data, date("2024-05-03"));
        assert_eq!(trend.direction, TrendDirection::Neutral);
    }

    #[test]
    fn test_topic_subset_keeps_window() {
        let all = vec![
            session("2024-05-01", "DSA", 30),
            session("2024-05-05", "Scala", 60),
        ];
        let dsa: Vec<_> = all.iter().filter(|s| s.topic == "DSA").cloned().collect();
        let trend = Trend::build(&all, &dsa, date("2024-05-05"));
        assert_eq!(trend.end(), Some(date("2024-05-05")));
        assert_eq!(trend.total_minutes(), 30);
    }
}
