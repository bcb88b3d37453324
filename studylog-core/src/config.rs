//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/studylog/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/studylog/` (~/.config/studylog/)
//! - Data: `$XDG_DATA_HOME/studylog/` (~/.local/share/studylog/)
//! - State/Logs: `$XDG_STATE_HOME/studylog/` (~/.local/state/studylog/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Session log location
    #[serde(default)]
    pub data: DataConfig,

    /// Study goals shared by every goal-aware aggregation
    #[serde(default)]
    pub goals: GoalConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Session log location override
#[derive(Debug, Deserialize, Default)]
pub struct DataConfig {
    /// Path to the JSON session log (defaults to the XDG data dir)
    pub path: Option<PathBuf>,
}

/// A topic with a daily study target.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SubjectGoal {
    /// Topic string this goal applies to (exact match)
    pub topic: String,
    /// Daily target in minutes
    pub daily_minutes: u32,
    /// Hours considered "mastery" for this subject
    #[serde(default = "default_mastery_hours")]
    pub mastery_hours: u32,
    /// Human-friendly description
    #[serde(default)]
    pub description: String,
}

impl SubjectGoal {
    fn new(topic: &str, daily_minutes: u32, mastery_hours: u32, description: &str) -> Self {
        Self {
            topic: topic.to_string(),
            daily_minutes,
            mastery_hours,
            description: description.to_string(),
        }
    }

    /// Weekly target in minutes (7 × daily).
    pub fn weekly_minutes(&self) -> u64 {
        self.daily_minutes as u64 * 7
    }
}

/// Largest accepted daily target: every minute of the day.
pub const MAX_DAILY_MINUTES: u32 = 24 * 60;

fn default_mastery_hours() -> u32 {
    100
}

/// Daily, weekly and monthly study targets.
///
/// Every goal-aware computation takes this struct explicitly so that all
/// features agree on the same numbers.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GoalConfig {
    /// Working days used for the headline monthly target
    #[serde(default = "default_monthly_working_days")]
    pub monthly_working_days: u32,

    /// Per-subject daily targets
    #[serde(default = "default_subjects")]
    pub subjects: Vec<SubjectGoal>,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            monthly_working_days: default_monthly_working_days(),
            subjects: default_subjects(),
        }
    }
}

fn default_monthly_working_days() -> u32 {
    22
}

fn default_subjects() -> Vec<SubjectGoal> {
    vec![
        SubjectGoal::new("DSA", 180, 200, "Data Structures & Algorithms"),
        SubjectGoal::new("System Design", 60, 100, "System Design & Architecture"),
        SubjectGoal::new("Scala", 60, 150, "Scala Programming Language"),
        SubjectGoal::new("Akka", 60, 80, "Akka Framework"),
    ]
}

impl GoalConfig {
    /// Sum of all subject daily targets.
    pub fn total_daily_minutes(&self) -> u64 {
        self.subjects.iter().map(|s| s.daily_minutes as u64).sum()
    }

    /// Weekly target (7 × daily total).
    pub fn weekly_minutes(&self) -> u64 {
        self.total_daily_minutes() * 7
    }

    /// Headline monthly target (daily total × working days).
    pub fn monthly_minutes(&self) -> u64 {
        self.total_daily_minutes() * self.monthly_working_days as u64
    }

    /// Half of the daily target, the "showed up" threshold.
    pub fn daily_minimum(&self) -> u64 {
        self.total_daily_minutes() / 2
    }

    /// Look up the goal for a topic.
    pub fn subject(&self, topic: &str) -> Option<&SubjectGoal> {
        self.subjects.iter().find(|s| s.topic == topic)
    }

    pub fn validate(&self) -> Result<()> {
        if self.monthly_working_days == 0 || self.monthly_working_days > 31 {
            return Err(Error::Config(
                "goals.monthly_working_days must be between 1 and 31".to_string(),
            ));
        }
        for subject in &self.subjects {
            if subject.topic.trim().is_empty() {
                return Err(Error::Config(
                    "goals.subjects entries need a non-empty topic".to_string(),
                ));
            }
            if subject.daily_minutes == 0 || subject.daily_minutes > MAX_DAILY_MINUTES {
                return Err(Error::Config(format!(
                    "goals.subjects '{}' needs daily_minutes between 1 and {}",
                    subject.topic, MAX_DAILY_MINUTES
                )));
            }
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.goals.validate()?;

        Ok(config)
    }

    /// Session log path: configured override or the XDG default.
    pub fn data_file(&self) -> PathBuf {
        self.data
            .path
            .clone()
            .unwrap_or_else(Self::default_data_file)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/studylog/config.toml` (~/.config/studylog/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("studylog").join("config.toml")
    }

    /// Returns the data directory path (for the session log)
    ///
    /// `$XDG_DATA_HOME/studylog/` (~/.local/share/studylog/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("studylog")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/studylog/` (~/.local/state/studylog/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("studylog")
    }

    /// Returns the default session log path
    ///
    /// `$XDG_DATA_HOME/studylog/learning-data.json`
    pub fn default_data_file() -> PathBuf {
        Self::data_dir().join("learning-data.json")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/studylog/studylog.log` (~/.local/state/studylog/studylog.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("studylog.log")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path behavior
    /// before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_DATA_HOME").is_err() {
            std::env::set_var("XDG_DATA_HOME", home.join(".local/share"));
        }

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.data.path.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.goals.subjects.len(), 4);
    }

    #[test]
    fn test_default_goal_totals() {
        let goals = GoalConfig::default();
        assert_eq!(goals.total_daily_minutes(), 360);
        assert_eq!(goals.weekly_minutes(), 2520);
        assert_eq!(goals.monthly_minutes(), 7920);
        assert_eq!(goals.daily_minimum(), 180);
        assert_eq!(goals.subject("DSA").unwrap().daily_minutes, 180);
        assert_eq!(goals.subject("DSA").unwrap().weekly_minutes(), 1260);
        assert!(goals.subject("Rust").is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[data]
path = "/tmp/sessions.json"

[goals]
monthly_working_days = 20

[[goals.subjects]]
topic = "Rust"
daily_minutes = 90
mastery_hours = 120

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.data_file(), PathBuf::from("/tmp/sessions.json"));
        assert_eq!(config.goals.monthly_working_days, 20);
        assert_eq!(config.goals.subjects.len(), 1);
        assert_eq!(config.goals.total_daily_minutes(), 90);
        assert_eq!(config.goals.subjects[0].description, "");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_goal_validation() {
        assert!(GoalConfig::default().validate().is_ok());

        let goals = GoalConfig {
            monthly_working_days: 0,
            ..Default::default()
        };
        assert!(goals.validate().is_err());

        let goals = GoalConfig {
            subjects: vec![SubjectGoal::new("DSA", 0, 10, "")],
            ..Default::default()
        };
        assert!(goals.validate().is_err());

        let goals = GoalConfig {
            subjects: vec![SubjectGoal::new("DSA", MAX_DAILY_MINUTES, 10, "")],
            ..Default::default()
        };
        assert!(goals.validate().is_ok());

        let goals = GoalConfig {
            subjects: vec![SubjectGoal::new("DSA", MAX_DAILY_MINUTES + 1, 10, "")],
            ..Default::default()
        };
        assert!(goals.validate().is_err());
    }

    #[test]
    fn test_load_from_rejects_oversized_daily_goal() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[[goals.subjects]]\ntopic = \"DSA\"\ndaily_minutes = 1000000000\n",
        )
        .unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_goal_totals_do_not_overflow() {
        // Bypasses validation: derived targets are computed in u64.
        let goals = GoalConfig {
            monthly_working_days: 31,
            subjects: vec![
                SubjectGoal::new("A", u32::MAX, 10, ""),
                SubjectGoal::new("B", u32::MAX, 10, ""),
            ],
        };
        assert_eq!(goals.total_daily_minutes(), 2 * u32::MAX as u64);
        assert_eq!(goals.weekly_minutes(), 14 * u32::MAX as u64);
        assert_eq!(goals.monthly_minutes(), 62 * u32::MAX as u64);
        assert_eq!(goals.subjects[0].weekly_minutes(), 7 * u32::MAX as u64);
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[goals\nbroken").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
