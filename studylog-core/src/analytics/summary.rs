//! Headline aggregates over a (possibly filtered) set of sessions.

use crate::types::StudySession;
use std::collections::{HashMap, HashSet};

/// Label reported when there is no most-studied topic.
pub const NO_TOPIC: &str = "None";

/// Minutes accumulated by one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTotal {
    pub topic: String,
    pub minutes: u64,
}

/// Aggregate totals for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStats {
    /// Sum of session minutes
    pub total_minutes: u64,
    /// Number of sessions
    pub session_count: usize,
    /// Number of distinct topics
    pub unique_topics: usize,
    /// Rounded mean minutes per session (0 when empty)
    pub avg_minutes_per_session: u64,
    /// Topic with the strictly greatest total, or ("None", 0)
    pub most_studied: TopicTotal,
    /// Every topic, most minutes first
    pub topic_breakdown: Vec<TopicTotal>,
}

impl Default for SummaryStats {
    fn default() -> Self {
        summarize(&[])
    }
}

impl SummaryStats {
    /// Whole hours studied.
    pub fn total_hours(&self) -> u64 {
        self.total_minutes / 60
    }

    /// The first `n` topics of the breakdown.
    pub fn top_topics(&self, n: usize) -> &[TopicTotal] {
        &self.topic_breakdown[..n.min(self.topic_breakdown.len())]
    }
}

pub fn total_minutes(sessions: &[StudySession]) -> u64 {
    sessions.iter().map(|s| s.minutes as u64).sum()
}

pub fn unique_topic_count(sessions: &[StudySession]) -> usize {
    sessions
        .iter()
        .map(|s| s.topic.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Minutes per topic, in order of first appearance.
pub fn topic_totals(sessions: &[StudySession]) -> Vec<TopicTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<TopicTotal> = Vec::new();

    for session in sessions {
        let slot = *index.entry(session.topic.as_str()).or_insert_with(|| {
            totals.push(TopicTotal {
                topic: session.topic.clone(),
                minutes: 0,
            });
            totals.len() - 1
        });
        totals[slot].minutes += session.minutes as u64;
    }
    totals
}

/// Topic with the strictly greatest total; earlier topics win ties.
pub fn most_studied_topic(totals: &[TopicTotal]) -> TopicTotal {
    totals
        .iter()
        .fold(None::<&TopicTotal>, |best, candidate| match best {
            Some(best) if candidate.minutes <= best.minutes => Some(best),
            _ => Some(candidate),
        })
        .cloned()
        .unwrap_or_else(|| TopicTotal {
            topic: NO_TOPIC.to_string(),
            minutes: 0,
        })
}

/// Compute all headline aggregates in one call.
pub fn summarize(sessions: &[StudySession]) -> SummaryStats {
    let total = total_minutes(sessions);
    let session_count = sessions.len();
    let totals = topic_totals(sessions);
    let most_studied = most_studied_topic(&totals);

    let avg_minutes_per_session = if session_count == 0 {
        0
    } else {
        (total as f64 / session_count as f64).round() as u64
    };

    let mut topic_breakdown = totals;
    topic_breakdown.sort_by(|a, b| b.minutes.cmp(&a.minutes));

    SummaryStats {
        total_minutes: total,
        session_count,
        unique_topics: topic_breakdown.len(),
        avg_minutes_per_session,
        most_studied,
        topic_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session(topic: &str, minutes: u32) -> StudySession {
        StudySession::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), topic, minutes)
    }

    #[test]
    fn test_empty_degrades_to_zero() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_minutes, 0);
        assert_eq!(stats.session_count, 0);
        assert_eq!(stats.unique_topics, 0);
        assert_eq!(stats.avg_minutes_per_session, 0);
        assert_eq!(stats.most_studied.topic, "None");
        assert_eq!(stats.most_studied.minutes, 0);
        assert!(stats.topic_breakdown.is_empty());
        assert_eq!(stats, SummaryStats::default());
    }

    #[test]
    fn test_totals_and_counts() {
        let data = vec![
            session("DSA", 60),
            session("Scala", 30),
            session("DSA", 45),
        ];
        let stats = summarize(&data);
        assert_eq!(stats.total_minutes, 135);
        assert_eq!(stats.session_count, 3);
        assert_eq!(stats.unique_topics, 2);
        assert_eq!(unique_topic_count(&data), 2);
        assert_eq!(stats.avg_minutes_per_session, 45);
        assert_eq!(stats.total_hours(), 2);
    }

    #[test]
    fn test_topic_totals_sum_to_total() {
        let data = vec![
            session("A", 7),
            session("B", 11),
            session("A", 13),
            session("C", 1),
        ];
        let per_topic: u64 = topic_totals(&data).iter().map(|t| t.minutes).sum();
        assert_eq!(per_topic, total_minutes(&data));
    }

    #[test]
    fn test_most_studied_tie_keeps_first() {
        let data = vec![session("Scala", 30), session("Akka", 30)];
        assert_eq!(summarize(&data).most_studied.topic, "Scala");

        let data = vec![session("Scala", 30), session("Akka", 31)];
        assert_eq!(summarize(&data).most_studied.topic, "Akka");
    }

    #[test]
    fn test_breakdown_sorted_desc() {
        let data = vec![
            session("A", 10),
            session("B", 50),
            session("C", 30),
        ];
        let stats = summarize(&data);
        let order: Vec<_> = stats.topic_breakdown.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
        assert_eq!(stats.top_topics(2).len(), 2);
        assert_eq!(stats.top_topics(10).len(), 3);
    }
}
