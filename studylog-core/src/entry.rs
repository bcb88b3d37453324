//! Input validation for recording a new session.
//!
//! Each prompt answer from the appender goes through one of these parsers.
//! A failure is reported and aborts the entry; nothing here touches disk.

use crate::error::EntryError;
use crate::types::{ClockTime, StudySession};
use chrono::NaiveDate;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse the date answer. Blank means `today`; future dates are rejected.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, EntryError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today);
    }

    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(EntryError::InvalidDate(input.to_string()));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| EntryError::InvalidDate(input.to_string()))?;
    if date > today {
        return Err(EntryError::FutureDate(input.to_string()));
    }
    Ok(date)
}

/// Parse the topic answer (trimmed, must be non-empty).
pub fn parse_topic(input: &str) -> Result<String, EntryError> {
    let topic = input.trim();
    if topic.is_empty() {
        Err(EntryError::EmptyTopic)
    } else {
        Ok(topic.to_string())
    }
}

/// Parse an `HH:MM` answer.
pub fn parse_clock(input: &str) -> Result<ClockTime, EntryError> {
    let input = input.trim();
    input
        .parse()
        .map_err(|_| EntryError::InvalidTime(input.to_string()))
}

/// Parse a direct minutes answer (whole number > 0).
pub fn parse_minutes(input: &str) -> Result<u32, EntryError> {
    let input = input.trim();
    match input.parse::<u32>() {
        Ok(0) => Err(EntryError::NonPositiveDuration),
        Ok(minutes) => Ok(minutes),
        Err(_) => Err(EntryError::InvalidMinutes(input.to_string())),
    }
}

/// Parse the optional notes answer.
pub fn parse_notes(input: &str) -> Option<String> {
    let notes = input.trim();
    (!notes.is_empty()).then(|| notes.to_string())
}

/// Minutes between two wall-clock times.
///
/// An end earlier than the start is taken to be on the next day (one 24 h
/// rollover, never more). Equal times give no duration and are rejected.
pub fn duration_minutes(start: ClockTime, end: ClockTime) -> Result<u32, EntryError> {
    let start = start.minutes_since_midnight();
    let end = end.minutes_since_midnight();
    let minutes = if end < start {
        end + MINUTES_PER_DAY - start
    } else {
        end - start
    };

    if minutes == 0 {
        Err(EntryError::NonPositiveDuration)
    } else {
        Ok(minutes)
    }
}

/// How the session length was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationInput {
    /// Minutes typed directly
    Minutes(u32),
    /// Start/end pair; minutes are derived
    Clock { start: ClockTime, end: ClockTime },
}

/// A validated entry, ready to become a [`StudySession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    pub date: NaiveDate,
    pub topic: String,
    pub duration: DurationInput,
    pub notes: Option<String>,
}

impl SessionDraft {
    /// Build the record, deriving minutes from the clock range when needed.
    pub fn into_session(self) -> Result<StudySession, EntryError> {
        let session = match self.duration {
            DurationInput::Minutes(0) => return Err(EntryError::NonPositiveDuration),
            DurationInput::Minutes(minutes) => StudySession::new(self.date, self.topic, minutes),
            DurationInput::Clock { start, end } => {
                let minutes = duration_minutes(start, end)?;
                StudySession::new(self.date, self.topic, minutes).with_times(start, end)
            }
        };

        Ok(match self.notes {
            Some(notes) => session.with_notes(notes),
            None => session,
        })
    }
}

/// Most recent distinct topics, newest first, as shown before the topic prompt.
pub fn recent_topics(sessions: &[StudySession], limit: usize) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for session in sessions.iter().rev() {
        if topics.len() >= limit {
            break;
        }
        if !topics.contains(&session.topic) {
            topics.push(session.topic.clone());
        }
    }
    topics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn clock(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_date_defaults_to_today() {
        let today = date("2024-06-15");
        assert_eq!(parse_date("", today), Ok(today));
        assert_eq!(parse_date("   ", today), Ok(today));
        assert_eq!(parse_date("2024-06-14", today), Ok(date("2024-06-14")));
        assert_eq!(parse_date("2024-06-15", today), Ok(today));
    }

    #[test]
    fn test_parse_date_rejects_bad_and_future() {
        let today = date("2024-06-15");
        assert!(matches!(
            parse_date("2024-6-1", today),
            Err(EntryError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_date("2024-02-30", today),
            Err(EntryError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_date("15/06/2024", today),
            Err(EntryError::InvalidDate(_))
        ));
        assert_eq!(
            parse_date("2024-06-16", today),
            Err(EntryError::FutureDate("2024-06-16".to_string()))
        );
    }

    #[test]
    fn test_parse_topic_and_notes() {
        assert_eq!(parse_topic("  DSA "), Ok("DSA".to_string()));
        assert_eq!(parse_topic("   "), Err(EntryError::EmptyTopic));
        assert_eq!(parse_notes(""), None);
        assert_eq!(parse_notes(" heaps "), Some("heaps".to_string()));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("45"), Ok(45));
        assert_eq!(parse_minutes("0"), Err(EntryError::NonPositiveDuration));
        assert!(matches!(
            parse_minutes("-5"),
            Err(EntryError::InvalidMinutes(_))
        ));
        assert!(matches!(
            parse_minutes("1.5"),
            Err(EntryError::InvalidMinutes(_))
        ));
    }

    #[test]
    fn test_duration_same_day() {
        assert_eq!(duration_minutes(clock("10:30"), clock("11:30")), Ok(60));
        assert_eq!(duration_minutes(clock("09:00"), clock("15:15")), Ok(375));
    }

    #[test]
    fn test_duration_midnight_rollover() {
        assert_eq!(duration_minutes(clock("23:30"), clock("00:45")), Ok(75));
        assert_eq!(duration_minutes(clock("22:00"), clock("21:59")), Ok(1439));
    }

    #[test]
    fn test_duration_zero_rejected() {
        assert_eq!(
            duration_minutes(clock("10:00"), clock("10:00")),
            Err(EntryError::NonPositiveDuration)
        );
    }

    #[test]
    fn test_draft_into_session_derives_minutes() {
        let draft = SessionDraft {
            date: date("2024-01-01"),
            topic: "Akka".to_string(),
            duration: DurationInput::Clock {
                start: clock("23:00"),
                end: clock("01:00"),
            },
            notes: Some("actors".to_string()),
        };
        let session = draft.into_session().unwrap();
        assert_eq!(session.minutes, 120);
        assert_eq!(session.start_time, Some(clock("23:00")));
        assert_eq!(session.end_time, Some(clock("01:00")));
        assert_eq!(session.notes.as_deref(), Some("actors"));
    }

    #[test]
    fn test_draft_with_direct_minutes() {
        let draft = SessionDraft {
            date: date("2024-01-01"),
            topic: "Scala".to_string(),
            duration: DurationInput::Minutes(30),
            notes: None,
        };
        let session = draft.into_session().unwrap();
        assert_eq!(session.minutes, 30);
        assert!(session.time_range().is_none());
    }

    #[test]
    fn test_recent_topics_newest_first_distinct() {
        let d = date("2024-01-01");
        let sessions = vec![
            StudySession::new(d, "A", 1),
            StudySession::new(d, "B", 1),
            StudySession::new(d, "A", 1),
            StudySession::new(d, "C", 1),
        ];
        assert_eq!(recent_topics(&sessions, 5), vec!["C", "A", "B"]);
        assert_eq!(recent_topics(&sessions, 2), vec!["C", "A"]);
    }
}
