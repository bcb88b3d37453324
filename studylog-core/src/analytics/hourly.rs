//! Productive time-of-day analysis.
//!
//! Sessions that carry both a start and an end time are spread across the 24
//! clock hours in proportion to the wall-clock share of the session in each
//! hour. A session only counts once, in the hour it started. Sessions without
//! times are left out of this analysis but still count everywhere else.

use crate::types::StudySession;

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Activity attributed to one clock hour.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HourBucket {
    /// Hour of day (0-23)
    pub hour: u8,
    /// Minutes attributed to this hour (fractional before rounding)
    pub minutes: f64,
    /// Sessions that started in this hour
    pub session_count: u32,
}

impl HourBucket {
    /// Minutes rounded to the nearest whole minute.
    pub fn rounded_minutes(&self) -> u64 {
        self.minutes.round() as u64
    }

    /// Mean minutes per session started in this hour (0 when none started).
    pub fn avg_session_minutes(&self) -> u64 {
        if self.session_count == 0 {
            0
        } else {
            (self.minutes / self.session_count as f64).round() as u64
        }
    }
}

/// A named stretch of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    /// 06:00-12:00
    Morning,
    /// 12:00-18:00
    Afternoon,
    /// 18:00-24:00
    Evening,
    /// 00:00-06:00
    Night,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
        DayPeriod::Night,
    ];

    /// Hours covered, as a half-open range.
    pub fn hours(&self) -> std::ops::Range<usize> {
        match self {
            DayPeriod::Morning => 6..12,
            DayPeriod::Afternoon => 12..18,
            DayPeriod::Evening => 18..24,
            DayPeriod::Night => 0..6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
            DayPeriod::Night => "Night",
        }
    }

    pub fn time_span(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "6AM-12PM",
            DayPeriod::Afternoon => "12PM-6PM",
            DayPeriod::Evening => "6PM-12AM",
            DayPeriod::Night => "12AM-6AM",
        }
    }
}

/// Hour-of-day distribution of study time.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyDistribution {
    pub hours: [HourBucket; 24],
    /// Number of sessions that carried both clock times
    pub timed_sessions: usize,
}

impl Default for HourlyDistribution {
    fn default() -> Self {
        let mut hours = [HourBucket::default(); 24];
        for (i, bucket) in hours.iter_mut().enumerate() {
            bucket.hour = i as u8;
        }
        Self {
            hours,
            timed_sessions: 0,
        }
    }
}

impl HourlyDistribution {
    /// Distribute every timed session across the clock hours.
    pub fn from_sessions(sessions: &[StudySession]) -> Self {
        let mut dist = Self::default();
        for session in sessions {
            dist.add(session);
        }
        dist
    }

    /// Add one session; sessions without both times are ignored.
    pub fn add(&mut self, session: &StudySession) {
        let Some((start, end)) = session.time_range() else {
            return;
        };
        self.timed_sessions += 1;

        let start_min = start.minutes_since_midnight();
        let mut end_min = end.minutes_since_midnight();
        if end_min < start_min {
            // Crossed midnight.
            end_min += MINUTES_PER_DAY;
        }

        let start_hour = start_min / MINUTES_PER_HOUR;
        let end_hour = end_min / MINUTES_PER_HOUR;
        let minutes = session.minutes as f64;

        self.hours[start_hour as usize].session_count += 1;

        if start_hour == end_hour {
            self.hours[start_hour as usize].minutes += minutes;
            return;
        }

        let span = (end_min - start_min) as f64;
        for hour in start_hour..=end_hour {
            let from = start_min.max(hour * MINUTES_PER_HOUR);
            let to = end_min.min((hour + 1) * MINUTES_PER_HOUR);
            if to <= from {
                continue;
            }
            let share = (to - from) as f64 / span;
            self.hours[(hour % 24) as usize].minutes += minutes * share;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.timed_sessions == 0
    }

    /// Total attributed minutes (rounded).
    pub fn total_minutes(&self) -> u64 {
        self.hours.iter().map(|h| h.minutes).sum::<f64>().round() as u64
    }

    /// Up to three hours with the most minutes, busiest first.
    pub fn most_active_hours(&self) -> Vec<HourBucket> {
        let mut active: Vec<HourBucket> = self
            .hours
            .iter()
            .copied()
            .filter(|h| h.rounded_minutes() > 0)
            .collect();
        active.sort_by(|a, b| b.minutes.total_cmp(&a.minutes));
        active.truncate(3);
        active
    }

    /// Up to three hours with the longest average session.
    pub fn most_productive_hours(&self) -> Vec<HourBucket> {
        let mut productive: Vec<HourBucket> = self
            .hours
            .iter()
            .copied()
            .filter(|h| h.avg_session_minutes() > 0)
            .collect();
        productive.sort_by(|a, b| b.avg_session_minutes().cmp(&a.avg_session_minutes()));
        productive.truncate(3);
        productive
    }

    /// The busiest hour, if any time was recorded.
    pub fn peak_hour(&self) -> Option<u8> {
        self.most_active_hours().first().map(|h| h.hour)
    }

    /// Minutes per day period, busiest first.
    pub fn periods(&self) -> Vec<(DayPeriod, u64)> {
        let mut periods: Vec<(DayPeriod, u64)> = DayPeriod::ALL
            .iter()
            .map(|p| {
                let minutes = self.hours[p.hours()]
                    .iter()
                    .map(HourBucket::rounded_minutes)
                    .sum();
                (*p, minutes)
            })
            .collect();
        periods.sort_by(|a, b| b.1.cmp(&a.1));
        periods
    }

    /// The busiest day period, if any time was recorded.
    pub fn best_period(&self) -> Option<DayPeriod> {
        self.periods()
            .into_iter()
            .find(|(_, minutes)| *minutes > 0)
            .map(|(p, _)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timed(start: &str, end: &str, minutes: u32) -> StudySession {
        StudySession::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "DSA", minutes)
            .with_times(start.parse().unwrap(), end.parse().unwrap())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_split_across_two_hours() {
        let dist = HourlyDistribution::from_sessions(&[timed("10:30", "11:30", 60)]);
        assert!(approx(dist.hours[10].minutes, 30.0));
        assert!(approx(dist.hours[11].minutes, 30.0));
        assert_eq!(dist.hours[10].session_count, 1);
        assert_eq!(dist.hours[11].session_count, 0);
    }

    #[test]
    fn test_single_hour_gets_full_duration() {
        let dist = HourlyDistribution::from_sessions(&[timed("14:05", "14:50", 45)]);
        assert!(approx(dist.hours[14].minutes, 45.0));
        assert_eq!(dist.hours[14].session_count, 1);
        assert_eq!(dist.total_minutes(), 45);
    }

    #[test]
    fn test_shares_scale_stored_minutes() {
        // Wall clock says 120 minutes, record says 60: shares stay proportional.
        let dist = HourlyDistribution::from_sessions(&[timed("09:00", "11:00", 60)]);
        assert!(approx(dist.hours[9].minutes, 30.0));
        assert!(approx(dist.hours[10].minutes, 30.0));
        assert!(approx(dist.hours[11].minutes, 0.0));
    }

    #[test]
    fn test_middle_hours_get_full_share() {
        let dist = HourlyDistribution::from_sessions(&[timed("09:45", "12:15", 150)]);
        assert!(approx(dist.hours[9].minutes, 15.0));
        assert!(approx(dist.hours[10].minutes, 60.0));
        assert!(approx(dist.hours[11].minutes, 60.0));
        assert!(approx(dist.hours[12].minutes, 15.0));
        assert_eq!(dist.total_minutes(), 150);
    }

    #[test]
    fn test_midnight_crossing_wraps() {
        let dist = HourlyDistribution::from_sessions(&[timed("23:30", "00:30", 60)]);
        assert!(approx(dist.hours[23].minutes, 30.0));
        assert!(approx(dist.hours[0].minutes, 30.0));
        assert_eq!(dist.hours[23].session_count, 1);
    }

    #[test]
    fn test_untimed_sessions_excluded() {
        let untimed =
            StudySession::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "DSA", 90);
        let dist = HourlyDistribution::from_sessions(&[untimed]);
        assert!(dist.is_empty());
        assert_eq!(dist.total_minutes(), 0);
        assert!(dist.peak_hour().is_none());
        assert!(dist.best_period().is_none());
    }

    #[test]
    fn test_peaks_and_periods() {
        let dist = HourlyDistribution::from_sessions(&[
            timed("07:00", "07:40", 40),
            timed("07:10", "07:30", 20),
            timed("20:00", "20:30", 30),
            timed("02:00", "02:10", 10),
        ]);

        let active = dist.most_active_hours();
        assert_eq!(active[0].hour, 7);
        assert_eq!(active[1].hour, 20);
        assert_eq!(active[2].hour, 2);
        assert_eq!(dist.peak_hour(), Some(7));
        assert_eq!(dist.hours[7].avg_session_minutes(), 30);

        let productive = dist.most_productive_hours();
        assert_eq!(productive[0].hour, 7);
        assert_eq!(productive[1].hour, 20);

        let periods = dist.periods();
        assert_eq!(periods[0], (DayPeriod::Morning, 60));
        assert_eq!(periods[1], (DayPeriod::Evening, 30));
        assert_eq!(periods[2], (DayPeriod::Night, 10));
        assert_eq!(periods[3], (DayPeriod::Afternoon, 0));
        assert_eq!(dist.best_period(), Some(DayPeriod::Morning));
    }
}
