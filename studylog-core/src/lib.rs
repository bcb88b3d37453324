//! # studylog-core
//!
//! Core library for studylog - a personal study-session tracker.
//!
//! This library provides:
//! - Domain types for study sessions
//! - A JSON file session store
//! - Analytics: filters, totals, heatmap, time-of-day, goals, streaks, achievements
//! - Validation for new entries
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Data flow
//!
//! Raw sessions are loaded once, filtered by year and topic, then aggregated.
//! Nothing derived is ever written back; the session log is the only state.
//!
//! ## Example
//!
//! ```rust,no_run
//! use studylog_core::analytics::{Dashboard, Selection};
//! use studylog_core::{Config, SessionStore};
//!
//! let config = Config::load().expect("failed to load config");
//! let store = SessionStore::new(config.data_file());
//! let sessions = store.load().expect("failed to read session log");
//!
//! let today = chrono::Local::now().date_naive();
//! let dashboard = Dashboard::build(
//!     &sessions,
//!     &Selection::current_year(today),
//!     &config.goals,
//!     today,
//! );
//! println!("{} minutes", dashboard.summary.total_minutes);
//! ```

// Re-export commonly used items at the crate root
pub use config::{Config, GoalConfig, SubjectGoal};
pub use error::{EntryError, Error, Result};
pub use store::{SessionStore, Snapshot};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod logging;
pub mod store;
pub mod types;
