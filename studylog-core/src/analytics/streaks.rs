//! Consecutive-day streaks.
//!
//! Streaks are computed from per-day totals. A day either qualifies (had any
//! activity, or met a minute goal) or it does not; a streak is a run of
//! qualifying days whose dates are exactly one calendar day apart.

use crate::types::StudySession;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Minutes studied on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub minutes: u64,
}

/// What makes a day count toward a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreakRule {
    /// Any recorded minutes
    #[default]
    AnyActivity,
    /// At least this many minutes that day
    MeetsGoal(u64),
}

impl StreakRule {
    pub fn qualifies(&self, minutes: u64) -> bool {
        match self {
            StreakRule::AnyActivity => minutes > 0,
            StreakRule::MeetsGoal(goal) => minutes >= *goal,
        }
    }
}

/// Streak statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakStats {
    /// Run ending on the reference date (0 if that day does not qualify)
    pub current_streak_days: u32,
    /// Longest run anywhere in the data
    pub longest_streak_days: u32,
    /// First day of the longest run (earliest run wins ties)
    pub longest_streak_start: Option<NaiveDate>,
    /// Last day of the longest run
    pub longest_streak_end: Option<NaiveDate>,
    /// Days with any recorded minutes
    pub active_days: usize,
    /// Days that satisfied the streak rule
    pub qualifying_days: usize,
}

/// Sum minutes per distinct date, sorted by date.
pub fn daily_totals(sessions: &[StudySession]) -> Vec<DailyTotal> {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for session in sessions {
        *by_date.entry(session.date).or_default() += session.minutes as u64;
    }
    by_date
        .into_iter()
        .map(|(date, minutes)| DailyTotal { date, minutes })
        .collect()
}

/// Number of days whose total reached `goal` minutes.
pub fn goal_met_days(daily: &[DailyTotal], goal: u64) -> usize {
    daily.iter().filter(|d| d.minutes >= goal).count()
}

/// Compute streaks over per-day totals.
///
/// `daily` need not be sorted or deduplicated; totals for repeated dates are
/// summed first.
pub fn compute_streaks(daily: &[DailyTotal], rule: StreakRule, today: NaiveDate) -> StreakStats {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for day in daily {
        *by_date.entry(day.date).or_default() += day.minutes;
    }

    let active_days = by_date.values().filter(|m| **m > 0).count();
    let dates: Vec<NaiveDate> = by_date
        .iter()
        .filter(|(_, minutes)| rule.qualifies(**minutes))
        .map(|(date, _)| *date)
        .collect();

    let mut longest = 0u32;
    let mut longest_start = None;
    let mut longest_end = None;
    let mut run = 0u32;
    let mut run_start: Option<NaiveDate> = None;
    let mut prev: Option<NaiveDate> = None;

    for &date in &dates {
        match prev {
            Some(p) if (date - p).num_days() == 1 => run += 1,
            _ => {
                run = 1;
                run_start = Some(date);
            }
        }
        if run > longest {
            longest = run;
            longest_start = run_start;
            longest_end = Some(date);
        }
        prev = Some(date);
    }

    // Walk back from the most recent qualifying day, which must be today.
    let mut current = 0u32;
    if dates.last() == Some(&today) {
        let mut expected = today;
        for &date in dates.iter().rev() {
            if date != expected {
                break;
            }
            current += 1;
            match expected.pred_opt() {
                Some(d) => expected = d,
                None => break,
            }
        }
    }

    StreakStats {
        current_streak_days: current,
        longest_streak_days: longest,
        longest_streak_start: longest_start,
        longest_streak_end: longest_end,
        active_days,
        qualifying_days: dates.len(),
    }
}

/// Convenience wrapper: streaks straight from sessions.
pub fn streaks_for_sessions(
    sessions: &[StudySession],
    rule: StreakRule,
    today: NaiveDate,
) -> StreakStats {
    compute_streaks(&daily_totals(sessions), rule, today)
}
