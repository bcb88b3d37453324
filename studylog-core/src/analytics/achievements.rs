//! Achievements, points and levels.
//!
//! Achievements are plain data: each entry in [`ACHIEVEMENTS`] carries an
//! [`AchievementRule`] that is evaluated against the full session log. Nothing
//! here is persisted; unlocking is recomputed from scratch every time.

use crate::analytics::streaks::{streaks_for_sessions, StreakRule};
use crate::types::StudySession;
use chrono::NaiveDate;

/// Grouping shown next to an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Milestone,
    Consistency,
    Mastery,
    Special,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Milestone => "milestone",
            Category::Consistency => "consistency",
            Category::Mastery => "mastery",
            Category::Special => "special",
        }
    }
}

/// Condition under which an achievement unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementRule {
    /// At least this many sessions
    SessionCount(usize),
    /// Longest run of consecutive active days reaches this length
    LongestStreak(u32),
    /// Minutes across every session reach this total
    TotalMinutes(u64),
    /// Minutes on one exact topic reach this total
    TopicMinutes(&'static str, u64),
    /// Any single session lasts at least this long
    SingleSession(u32),
    /// Any session starts before this hour
    StartsBefore(u8),
    /// Any session starts at or after this hour
    StartsFrom(u8),
}

impl AchievementRule {
    pub fn is_met(&self, sessions: &[StudySession]) -> bool {
        match *self {
            AchievementRule::SessionCount(n) => sessions.len() >= n,
            AchievementRule::LongestStreak(days) => {
                // The reference date only affects the current streak.
                let anchor = sessions.iter().map(|s| s.date).max().unwrap_or(NaiveDate::MIN);
                streaks_for_sessions(sessions, StreakRule::AnyActivity, anchor)
                    .longest_streak_days
                    >= days
            }
            AchievementRule::TotalMinutes(min) => {
                sessions.iter().map(|s| s.minutes as u64).sum::<u64>() >= min
            }
            AchievementRule::TopicMinutes(topic, min) => {
                sessions
                    .iter()
                    .filter(|s| s.topic == topic)
                    .map(|s| s.minutes as u64)
                    .sum::<u64>()
                    >= min
            }
            AchievementRule::SingleSession(min) => sessions.iter().any(|s| s.minutes >= min),
            AchievementRule::StartsBefore(hour) => sessions
                .iter()
                .filter_map(|s| s.start_time)
                .any(|t| t.hour() < hour),
            AchievementRule::StartsFrom(hour) => sessions
                .iter()
                .filter_map(|s| s.start_time)
                .any(|t| t.hour() >= hour),
        }
    }
}

/// One achievement definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub points: u32,
    pub category: Category,
    pub rule: AchievementRule,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first_session",
        title: "First Steps",
        description: "Complete your first study session",
        points: 10,
        category: Category::Milestone,
        rule: AchievementRule::SessionCount(1),
    },
    Achievement {
        id: "week_streak",
        title: "Week Warrior",
        description: "Study for 7 consecutive days",
        points: 100,
        category: Category::Consistency,
        rule: AchievementRule::LongestStreak(7),
    },
    Achievement {
        id: "month_streak",
        title: "Monthly Master",
        description: "Study for 30 consecutive days",
        points: 500,
        category: Category::Consistency,
        rule: AchievementRule::LongestStreak(30),
    },
    Achievement {
        id: "hundred_hours",
        title: "Century Club",
        description: "Study for 100 total hours",
        points: 200,
        category: Category::Milestone,
        rule: AchievementRule::TotalMinutes(100 * 60),
    },
    Achievement {
        id: "five_hundred_hours",
        title: "Elite Learner",
        description: "Study for 500 total hours",
        points: 1000,
        category: Category::Milestone,
        rule: AchievementRule::TotalMinutes(500 * 60),
    },
    Achievement {
        id: "dsa_master",
        title: "DSA Master",
        description: "Study DSA for 100 hours",
        points: 300,
        category: Category::Mastery,
        rule: AchievementRule::TopicMinutes("DSA", 100 * 60),
    },
    Achievement {
        id: "system_design_master",
        title: "System Design Expert",
        description: "Study System Design for 50 hours",
        points: 250,
        category: Category::Mastery,
        rule: AchievementRule::TopicMinutes("System Design", 50 * 60),
    },
    Achievement {
        id: "scala_master",
        title: "Scala Specialist",
        description: "Study Scala for 50 hours",
        points: 250,
        category: Category::Mastery,
        rule: AchievementRule::TopicMinutes("Scala", 50 * 60),
    },
    Achievement {
        id: "akka_master",
        title: "Akka Architect",
        description: "Study Akka for 50 hours",
        points: 250,
        category: Category::Mastery,
        rule: AchievementRule::TopicMinutes("Akka", 50 * 60),
    },
    Achievement {
        id: "marathon_session",
        title: "Marathon Runner",
        description: "Complete a 6+ hour study session",
        points: 150,
        category: Category::Special,
        rule: AchievementRule::SingleSession(6 * 60),
    },
    Achievement {
        id: "early_bird",
        title: "Early Bird",
        description: "Study before 6 AM",
        points: 75,
        category: Category::Special,
        rule: AchievementRule::StartsBefore(6),
    },
    Achievement {
        id: "night_owl",
        title: "Night Owl",
        description: "Study after 10 PM",
        points: 75,
        category: Category::Special,
        rule: AchievementRule::StartsFrom(22),
    },
];

/// Look up an achievement by id.
pub fn achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// A points tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub level: u8,
    pub title: &'static str,
    pub min_points: u32,
}

/// Contiguous tiers, ascending; the first starts at 0.
pub const LEVELS: &[Level] = &[
    Level { level: 1, title: "Beginner", min_points: 0 },
    Level { level: 2, title: "Student", min_points: 100 },
    Level { level: 3, title: "Learner", min_points: 300 },
    Level { level: 4, title: "Scholar", min_points: 600 },
    Level { level: 5, title: "Expert", min_points: 1000 },
    Level { level: 6, title: "Master", min_points: 2000 },
    Level { level: 7, title: "Grandmaster", min_points: 4000 },
    Level { level: 8, title: "Legend", min_points: 10000 },
];

impl Level {
    /// Highest tier whose minimum does not exceed `points`.
    pub fn for_points(points: u32) -> Level {
        LEVELS
            .iter()
            .rev()
            .find(|l| l.min_points <= points)
            .copied()
            .unwrap_or(LEVELS[0])
    }

    /// The tier above this one, if any.
    pub fn next(&self) -> Option<Level> {
        LEVELS.iter().find(|l| l.level == self.level + 1).copied()
    }

    /// Percent of the way from this tier to the next (100 at the top tier).
    pub fn progress(&self, points: u32) -> u32 {
        match self.next() {
            None => 100,
            Some(next) => {
                let span = (next.min_points - self.min_points) as f64;
                let earned = points.saturating_sub(self.min_points) as f64;
                ((earned / span * 100.0).round() as u32).min(100)
            }
        }
    }
}

/// Result of evaluating every achievement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gamification {
    /// Unlocked achievements, in table order
    pub unlocked: Vec<&'static Achievement>,
    /// Achievements still locked, in table order
    pub locked: Vec<&'static Achievement>,
    pub total_points: u32,
    pub level: Level,
    pub next_level: Option<Level>,
    /// Percent toward `next_level`
    pub progress: u32,
}

impl Gamification {
    /// Points still needed for the next tier.
    pub fn points_to_next(&self) -> Option<u32> {
        self.next_level
            .map(|next| next.min_points.saturating_sub(self.total_points))
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|a| a.id == id)
    }
}

/// Evaluate the achievement table against the session log.
pub fn evaluate(sessions: &[StudySession]) -> Gamification {
    let (unlocked, locked): (Vec<&'static Achievement>, Vec<&'static Achievement>) =
        ACHIEVEMENTS.iter().partition(|a| a.rule.is_met(sessions));

    let total_points = unlocked.iter().map(|a| a.points).sum();
    let level = Level::for_points(total_points);

    Gamification {
        unlocked,
        locked,
        total_points,
        level,
        next_level: level.next(),
        progress: level.progress(total_points),
    }
}
