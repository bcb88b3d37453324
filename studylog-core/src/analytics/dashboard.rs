//! Dashboard composition.
//!
//! Builds every view of the learning dashboard in one pass over the session
//! log, all evaluated against the same reference date. Each view reads the
//! slice of data it was designed for:
//!
//! | View | Input |
//! |------|-------|
//! | summary, heatmap cells, trend, weekly/monthly rollups | year + topic filter |
//! | heatmap range, trend window | year filter only |
//! | time-of-day | topic filter only |
//! | streaks, current week/month, subjects, achievements | whole log |

use crate::analytics::achievements::{evaluate, Gamification};
use crate::analytics::filter::{
    self, available_topics, available_years, topic_categories, Selection, TopicCategory,
};
use crate::analytics::goals::{
    month_rollup, monthly_rollups, subject_report, week_rollup, weekly_rollups, PeriodRollup,
    SubjectReport,
};
use crate::analytics::heatmap::Heatmap;
use crate::analytics::hourly::HourlyDistribution;
use crate::analytics::streaks::{compute_streaks, daily_totals, goal_met_days, StreakRule, StreakStats};
use crate::analytics::summary::{summarize, SummaryStats};
use crate::analytics::trend::Trend;
use crate::config::GoalConfig;
use crate::types::StudySession;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Every dashboard view for one selection and reference date.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub selection: Selection,
    pub goals: GoalConfig,

    /// Year selector options ("All" first)
    pub years: Vec<String>,
    /// Topic selector options for the selected year
    pub topics: Vec<String>,

    pub summary: SummaryStats,
    pub categories: BTreeMap<String, TopicCategory>,
    pub heatmap: Heatmap,
    pub trend: Trend,
    pub hourly: HourlyDistribution,

    /// Any-activity streaks over the whole log
    pub streaks: StreakStats,
    /// Streaks of days meeting the total daily goal
    pub goal_streaks: StreakStats,
    /// Days meeting half the daily goal
    pub minimum_met_days: usize,

    pub current_week: PeriodRollup,
    pub current_month: PeriodRollup,
    pub weekly: Vec<PeriodRollup>,
    pub monthly: Vec<PeriodRollup>,

    pub subjects: SubjectReport,
    pub gamification: Gamification,
}

impl Dashboard {
    /// Compute the dashboard for `selection` as of `today`.
    pub fn build(
        sessions: &[StudySession],
        selection: &Selection,
        goals: &GoalConfig,
        today: NaiveDate,
    ) -> Self {
        let year_filtered = filter::filter_by_year(sessions, &selection.year);
        let selected = filter::filter_by_topic(&year_filtered, &selection.topic);
        let topic_only = filter::filter_by_topic(sessions, &selection.topic);

        let daily_goal = goals.total_daily_minutes();
        let daily = daily_totals(sessions);

        tracing::debug!(
            total = sessions.len(),
            selected = selected.len(),
            year = %selection.year,
            topic = %selection.topic,
            "Building dashboard"
        );

        Self {
            today,
            selection: selection.clone(),
            goals: goals.clone(),
            years: available_years(sessions, today),
            topics: available_topics(&year_filtered),
            summary: summarize(&selected),
            categories: topic_categories(&selected),
            heatmap: Heatmap::build(&year_filtered, &selected, today),
            trend: Trend::build(&year_filtered, &selected, today),
            hourly: HourlyDistribution::from_sessions(&topic_only),
            streaks: compute_streaks(&daily, StreakRule::AnyActivity, today),
            goal_streaks: compute_streaks(&daily, StreakRule::MeetsGoal(daily_goal), today),
            minimum_met_days: goal_met_days(&daily, goals.daily_minimum()),
            current_week: week_rollup(sessions, today, daily_goal),
            current_month: month_rollup(sessions, today, daily_goal),
            weekly: weekly_rollups(&selected, daily_goal),
            monthly: monthly_rollups(&selected, daily_goal),
            subjects: subject_report(sessions, goals, today),
            gamification: evaluate(sessions),
        }
    }

    /// Heading suffix such as " (2024)" or " (2024, DSA)".
    pub fn selection_label(&self) -> String {
        let parts: Vec<&str> = [&self.selection.year, &self.selection.topic]
            .into_iter()
            .filter(|s| !s.is_all())
            .map(|s| s.as_str())
            .collect();
        if parts.is_empty() {
            String::new()
        } else {
            format!(" ({})", parts.join(", "))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.session_count == 0
    }
}
