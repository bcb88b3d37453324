//! Year and topic filters.
//!
//! Both filters are per-record predicates, so they preserve order and commute.
//! [`Selector::All`] is the identity on either axis.

use crate::types::StudySession;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Sentinel label meaning "no filtering on this axis".
pub const ALL: &str = "All";

/// A filter value: everything, or one exact string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    pub fn only(value: impl Into<String>) -> Self {
        Selector::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selector::All => ALL,
            Selector::Only(value) => value,
        }
    }
}

impl std::str::FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL {
            Selector::All
        } else {
            Selector::Only(s.to_string())
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current dashboard selector state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub year: Selector,
    pub topic: Selector,
}

impl Selection {
    /// Default dashboard state: the reference date's year, all topics.
    pub fn current_year(today: NaiveDate) -> Self {
        Self {
            year: Selector::Only(format!("{:04}", today.year())),
            topic: Selector::All,
        }
    }

    fn keeps(&self, session: &StudySession) -> bool {
        year_matches(session, &self.year) && topic_matches(session, &self.topic)
    }
}

fn year_matches(session: &StudySession, year: &Selector) -> bool {
    match year {
        Selector::All => true,
        Selector::Only(prefix) => session.date_key().starts_with(prefix.as_str()),
    }
}

fn topic_matches(session: &StudySession, topic: &Selector) -> bool {
    match topic {
        Selector::All => true,
        Selector::Only(topic) => session.topic == *topic,
    }
}

/// Sessions whose date starts with the selected year.
pub fn filter_by_year(sessions: &[StudySession], year: &Selector) -> Vec<StudySession> {
    sessions
        .iter()
        .filter(|s| year_matches(s, year))
        .cloned()
        .collect()
}

/// Sessions whose topic equals the selected topic.
pub fn filter_by_topic(sessions: &[StudySession], topic: &Selector) -> Vec<StudySession> {
    sessions
        .iter()
        .filter(|s| topic_matches(s, topic))
        .cloned()
        .collect()
}

/// Apply both axes of a selection in one pass.
pub fn apply(sessions: &[StudySession], selection: &Selection) -> Vec<StudySession> {
    sessions
        .iter()
        .filter(|s| selection.keeps(s))
        .cloned()
        .collect()
}

/// Year options: "All", then the reference year and every data year, newest first.
pub fn available_years(sessions: &[StudySession], today: NaiveDate) -> Vec<String> {
    let mut years: BTreeSet<String> = sessions.iter().map(StudySession::year_key).collect();
    years.insert(format!("{:04}", today.year()));

    std::iter::once(ALL.to_string())
        .chain(years.into_iter().rev())
        .collect()
}

/// Distinct topics, sorted.
pub fn available_topics(sessions: &[StudySession]) -> Vec<String> {
    sessions
        .iter()
        .map(|s| s.topic.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Topics grouped under their first word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicCategory {
    pub minutes: u64,
    pub topics: Vec<String>,
}

/// Group topics by their first word (split on whitespace, `-` or `_`).
pub fn topic_categories(sessions: &[StudySession]) -> BTreeMap<String, TopicCategory> {
    let mut minutes_by_topic: BTreeMap<&str, u64> = BTreeMap::new();
    for session in sessions {
        *minutes_by_topic.entry(session.topic.as_str()).or_default() += session.minutes as u64;
    }

    let mut grouped: BTreeMap<String, TopicCategory> = BTreeMap::new();
    for (topic, minutes) in minutes_by_topic {
        let head = topic
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .next()
            .unwrap_or_default();
        let category = if head.is_empty() { "Other" } else { head };

        let entry = grouped.entry(category.to_string()).or_default();
        entry.minutes += minutes;
        entry.topics.push(topic.to_string());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(date: &str, topic: &str, minutes: u32) -> StudySession {
        StudySession::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            topic,
            minutes,
        )
    }

    fn sample() -> Vec<StudySession> {
        vec![
            session("2023-12-30", "DSA", 60),
            session("2024-01-02", "Scala", 30),
            session("2024-01-02", "DSA", 45),
            session("2024-03-10", "System Design", 90),
            session("2025-01-01", "DSA", 15),
        ]
    }

    #[test]
    fn test_all_is_identity() {
        let data = sample();
        assert_eq!(filter_by_year(&data, &Selector::All), data);
        assert_eq!(filter_by_topic(&data, &Selector::All), data);
        assert_eq!(apply(&data, &Selection::default()), data);
    }

    #[test]
    fn test_year_filter_preserves_order() {
        let data = sample();
        let filtered = filter_by_year(&data, &Selector::only("2024"));
        let topics: Vec<_> = filtered.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(topics, vec!["Scala", "DSA", "System Design"]);
    }

    #[test]
    fn test_topic_filter_exact_match() {
        let data = sample();
        assert_eq!(filter_by_topic(&data, &Selector::only("DSA")).len(), 3);
        assert!(filter_by_topic(&data, &Selector::only("dsa")).is_empty());
        assert!(filter_by_topic(&data, &Selector::only("System")).is_empty());
    }

    #[test]
    fn test_filters_commute() {
        let data = sample();
        let year = Selector::only("2024");
        let topic = Selector::only("DSA");

        let year_then_topic = filter_by_topic(&filter_by_year(&data, &year), &topic);
        let topic_then_year = filter_by_year(&filter_by_topic(&data, &topic), &year);
        let combined = apply(
            &data,
            &Selection {
                year: year.clone(),
                topic: topic.clone(),
            },
        );

        assert_eq!(year_then_topic, topic_then_year);
        assert_eq!(year_then_topic, combined);
        assert_eq!(combined.len(), 1);
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!("All".parse::<Selector>().unwrap(), Selector::All);
        assert_eq!(
            "2024".parse::<Selector>().unwrap(),
            Selector::only("2024")
        );
        assert_eq!(Selector::only("DSA").to_string(), "DSA");
    }

    #[test]
    fn test_available_years() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert_eq!(
            available_years(&sample(), today),
            vec!["All", "2026", "2025", "2024", "2023"]
        );
        assert_eq!(available_years(&[], today), vec!["All", "2026"]);
    }

    #[test]
    fn test_available_topics_sorted() {
        assert_eq!(
            available_topics(&sample()),
            vec!["DSA", "Scala", "System Design"]
        );
    }

    #[test]
    fn test_topic_categories() {
        let mut data = sample();
        data.push(session("2024-04-01", "System-Internals", 10));
        data.push(session("2024-04-01", "", 5));

        let categories = topic_categories(&data);
        let system = &categories["System"];
        assert_eq!(system.minutes, 100);
        assert_eq!(system.topics, vec!["System Design", "System-Internals"]);
        assert_eq!(categories["DSA"].minutes, 120);
        assert_eq!(categories["Other"].minutes, 5);
    }
}
