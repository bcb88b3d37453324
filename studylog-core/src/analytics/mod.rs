//! Analytics over the session log
//!
//! Everything here is a pure function of the session slice, the goal
//! configuration and an explicit reference date:
//! - Year/topic filters and selector options
//! - Headline totals and per-topic breakdowns
//! - Calendar heatmap buckets
//! - Time-of-day distribution
//! - Weekly/monthly goal rollups and subject progress
//! - Seven-day trend
//! - Streaks
//! - Achievements and levels
//!
//! [`Dashboard::build`] composes all of them for one selection.

pub mod achievements;
pub mod dashboard;
pub mod filter;
pub mod goals;
pub mod heatmap;
pub mod hourly;
pub mod streaks;
pub mod summary;
pub mod trend;

pub use achievements::{evaluate, Achievement, AchievementRule, Category, Gamification, Level};
pub use dashboard::Dashboard;
pub use filter::{Selection, Selector};
pub use goals::{PeriodRollup, SubjectProgress, SubjectReport};
pub use heatmap::{DateRange, DayBucket, Heatmap};
pub use hourly::{DayPeriod, HourBucket, HourlyDistribution};
pub use streaks::{DailyTotal, StreakRule, StreakStats};
pub use summary::{SummaryStats, TopicTotal};
pub use trend::{Trend, TrendDirection};
