//! Goal tracking: weekly and monthly rollups, plus per-subject progress.
//!
//! Weeks run Sunday to Saturday. A period's goal is the daily goal times the
//! number of days in the period, so a 31-day month asks for more than a
//! 28-day one.

use crate::analytics::streaks::{compute_streaks, daily_totals, StreakRule};
use crate::config::{GoalConfig, SubjectGoal};
use crate::format::goal_progress;
use crate::types::StudySession;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Days of recent history shown in subject progress.
pub const RECENT_DAYS: i64 = 7;

/// Hours of study treated as fully prepared in the readiness score.
pub const READINESS_TARGET_HOURS: f64 = 200.0;

/// Average active days per subject treated as fully consistent.
pub const READINESS_TARGET_DAYS: f64 = 30.0;

/// Minutes studied in one period against that period's goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRollup {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub minutes: u64,
    pub goal_minutes: u64,
    pub meets_goal: bool,
}

impl PeriodRollup {
    fn new(start: NaiveDate, end: NaiveDate, minutes: u64, daily_goal: u64) -> Self {
        let days = ((end - start).num_days() + 1).max(0) as u64;
        let goal_minutes = daily_goal * days;
        Self {
            start,
            end,
            minutes,
            goal_minutes,
            meets_goal: minutes >= goal_minutes,
        }
    }

    /// Percent of the goal reached, capped at 100.
    pub fn percent(&self) -> u32 {
        goal_progress(self.minutes, self.goal_minutes)
    }
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let next = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next.and_then(|n| n.pred_opt()).unwrap_or(start);
    (start, end)
}

fn minutes_between(sessions: &[StudySession], start: NaiveDate, end: NaiveDate) -> u64 {
    sessions
        .iter()
        .filter(|s| start <= s.date && s.date <= end)
        .map(|s| s.minutes as u64)
        .sum()
}

/// Rollup for the Sunday-Saturday week containing `date`.
pub fn week_rollup(sessions: &[StudySession], date: NaiveDate, daily_goal: u64) -> PeriodRollup {
    let start = week_start(date);
    let end = start + Duration::days(6);
    PeriodRollup::new(start, end, minutes_between(sessions, start, end), daily_goal)
}

/// Rollup for the calendar month containing `date`.
pub fn month_rollup(sessions: &[StudySession], date: NaiveDate, daily_goal: u64) -> PeriodRollup {
    let (start, end) = month_bounds(date);
    PeriodRollup::new(start, end, minutes_between(sessions, start, end), daily_goal)
}

/// One rollup per week that has sessions, oldest first.
pub fn weekly_rollups(sessions: &[StudySession], daily_goal: u64) -> Vec<PeriodRollup> {
    let mut weeks: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for session in sessions {
        *weeks.entry(week_start(session.date)).or_default() += session.minutes as u64;
    }
    weeks
        .into_iter()
        .map(|(start, minutes)| {
            PeriodRollup::new(start, start + Duration::days(6), minutes, daily_goal)
        })
        .collect()
}

/// One rollup per calendar month that has sessions, oldest first.
pub fn monthly_rollups(sessions: &[StudySession], daily_goal: u64) -> Vec<PeriodRollup> {
    let mut months: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for session in sessions {
        *months.entry(month_bounds(session.date).0).or_default() += session.minutes as u64;
    }
    months
        .into_iter()
        .map(|(start, minutes)| {
            let (_, end) = month_bounds(start);
            PeriodRollup::new(start, end, minutes, daily_goal)
        })
        .collect()
}

// ============================================
// Subject progress
// ============================================

/// Minutes per subject on one day of the recent window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayProgress {
    pub date: NaiveDate,
    /// Minutes per configured subject, in configuration order
    pub subject_minutes: Vec<(String, u64)>,
    /// Minutes across configured subjects only
    pub total_minutes: u64,
    /// Percent of the total daily goal, capped at 100
    pub goal_percent: u32,
    pub is_today: bool,
}

/// Progress toward one configured subject goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectProgress {
    pub topic: String,
    pub description: String,
    pub daily_goal_minutes: u64,
    /// All-time minutes on this subject
    pub total_minutes: u64,
    /// Distinct dates with any minutes on this subject
    pub days_active: usize,
    /// Consecutive days ending today that met the daily goal
    pub goal_streak_days: u32,
    /// Percent of the mastery hours reached, capped at 100
    pub mastery_percent: u32,
    /// Minutes in the recent window
    pub weekly_minutes: u64,
    /// Seven times the daily goal
    pub weekly_goal_minutes: u64,
    /// Percent of the weekly goal, capped at 100
    pub weekly_percent: u32,
}

/// Preparation overview across every configured subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectReport {
    /// The seven days ending on the reference date, oldest first
    pub recent_days: Vec<DayProgress>,
    pub subjects: Vec<SubjectProgress>,
    /// Whole hours across configured subjects
    pub total_hours: u64,
    /// Whole hours per configured subject
    pub avg_hours_per_subject: u64,
    /// Combined volume and consistency score, 0-100
    pub readiness_score: u32,
}

impl SubjectReport {
    /// The reference day's entry in the recent window.
    pub fn today(&self) -> Option<&DayProgress> {
        self.recent_days.iter().find(|d| d.is_today)
    }
}

fn subject_progress(
    sessions: &[StudySession],
    goal: &SubjectGoal,
    window_start: NaiveDate,
    today: NaiveDate,
) -> SubjectProgress {
    let own: Vec<StudySession> = sessions
        .iter()
        .filter(|s| s.topic == goal.topic)
        .cloned()
        .collect();
    let daily = daily_totals(&own);
    let daily_goal = goal.daily_minutes as u64;
    let streak = compute_streaks(&daily, StreakRule::MeetsGoal(daily_goal), today);

    let total_minutes: u64 = daily.iter().map(|d| d.minutes).sum();
    let weekly_minutes = minutes_between(&own, window_start, today);
    let weekly_goal_minutes = goal.weekly_minutes();

    SubjectProgress {
        topic: goal.topic.clone(),
        description: goal.description.clone(),
        daily_goal_minutes: daily_goal,
        total_minutes,
        days_active: streak.active_days,
        goal_streak_days: streak.current_streak_days,
        mastery_percent: goal_progress(total_minutes, goal.mastery_hours as u64 * 60),
        weekly_minutes,
        weekly_goal_minutes,
        weekly_percent: goal_progress(weekly_minutes, weekly_goal_minutes),
    }
}

/// Per-subject progress and readiness as of `today`.
pub fn subject_report(
    sessions: &[StudySession],
    goals: &GoalConfig,
    today: NaiveDate,
) -> SubjectReport {
    let window_start = today - Duration::days(RECENT_DAYS - 1);
    let total_daily_goal = goals.total_daily_minutes();

    let recent_days = (0..RECENT_DAYS)
        .map(|offset| {
            let date = window_start + Duration::days(offset);
            let subject_minutes: Vec<(String, u64)> = goals
                .subjects
                .iter()
                .map(|goal| {
                    let minutes = sessions
                        .iter()
                        .filter(|s| s.date == date && s.topic == goal.topic)
                        .map(|s| s.minutes as u64)
                        .sum();
                    (goal.topic.clone(), minutes)
                })
                .collect();
            let total_minutes = subject_minutes.iter().map(|(_, m)| m).sum();
            DayProgress {
                date,
                subject_minutes,
                total_minutes,
                goal_percent: goal_progress(total_minutes, total_daily_goal),
                is_today: date == today,
            }
        })
        .collect();

    let subjects: Vec<SubjectProgress> = goals
        .subjects
        .iter()
        .map(|goal| subject_progress(sessions, goal, window_start, today))
        .collect();

    let subject_count = subjects.len().max(1) as f64;
    let total_hours = subjects.iter().map(|s| s.total_minutes).sum::<u64>() as f64 / 60.0;
    let avg_days_active =
        subjects.iter().map(|s| s.days_active).sum::<usize>() as f64 / subject_count;
    let readiness = (total_hours / READINESS_TARGET_HOURS * 50.0
        + avg_days_active / READINESS_TARGET_DAYS * 50.0)
        .min(100.0);

    SubjectReport {
        recent_days,
        total_hours: total_hours.round() as u64,
        avg_hours_per_subject: (total_hours / subject_count).round() as u64,
        readiness_score: if subjects.is_empty() {
            0
        } else {
            readiness.round() as u32
        },
        subjects,
    }
}
