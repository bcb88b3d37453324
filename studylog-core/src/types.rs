//! Core domain types for studylog
//!
//! The session log holds exactly one kind of record, [`StudySession`]. There
//! is no topic registry: topics exist only as the distinct `topic` strings
//! found in the log, compared by exact equality.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Session** | One block of study on one topic, recorded against a calendar date |
//! | **Topic** | Free-text label ("DSA", "System Design"); any string is valid |
//! | **Subject** | A topic that has a configured daily goal (see [`crate::config::GoalConfig`]) |
//! | **Reference date** | The "today" every computation is evaluated against |

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// Clock time
// ============================================

/// A local wall-clock time in `HH:MM` form.
///
/// Serialized exactly as two-digit hour and minute so the session log stays
/// hand-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Build a clock time, returning `None` outside `00:00`–`23:59`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since 00:00.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl std::str::FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes[..2].iter().all(u8::is_ascii_digit)
            && bytes[3..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(format!("invalid time '{}': expected HH:MM", s));
        }

        let hour: u8 = s[..2].parse().map_err(|_| format!("invalid hour in '{}'", s))?;
        let minute: u8 = s[3..].parse().map_err(|_| format!("invalid minute in '{}'", s))?;
        ClockTime::new(hour, minute).ok_or_else(|| format!("time out of range: '{}'", s))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ============================================
// Study session
// ============================================

/// One recorded block of study.
///
/// `minutes` is authoritative. `start_time`/`end_time` are only used to place
/// the session on the clock for time-of-day analysis; they are never used to
/// recompute the duration once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    /// Calendar date (local-date key, no time zone)
    pub date: NaiveDate,
    /// Free-text topic label
    pub topic: String,
    /// Duration in minutes (> 0 for records written by the appender)
    pub minutes: u32,
    /// Wall-clock start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<ClockTime>,
    /// Wall-clock end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<ClockTime>,
    /// Display-only annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StudySession {
    /// Create a session without clock times or notes.
    pub fn new(date: NaiveDate, topic: impl Into<String>, minutes: u32) -> Self {
        Self {
            date,
            topic: topic.into(),
            minutes,
            start_time: None,
            end_time: None,
            notes: None,
        }
    }

    /// Attach a start/end clock range.
    pub fn with_times(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The date in its stored `YYYY-MM-DD` form.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// The four-character year prefix of the date key (e.g. "2024").
    pub fn year_key(&self) -> String {
        format!("{:04}", self.date.year())
    }

    /// Both clock times, when the session carries them.
    pub fn time_range(&self) -> Option<(ClockTime, ClockTime)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}
