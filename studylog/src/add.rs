//! studylog-add - record one study session
//!
//! Prompts for date, topic, duration and notes, then appends the session to
//! the log. Any invalid answer aborts without writing.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use dialoguer::console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use studylog_core::entry::{self, DurationInput, SessionDraft};
use studylog_core::format::format_minutes_long;
use studylog_core::{Config, SessionStore, StudySession};

const RECENT_SESSIONS: usize = 5;
const RECENT_TOPICS: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "studylog-add")]
#[command(about = "Record a study session")]
#[command(version)]
struct Args {
    /// Enter the duration in minutes instead of start/end times
    #[arg(long)]
    minutes: bool,

    /// Session log to append to (default: from config, else the XDG data dir)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Reference date, YYYY-MM-DD (default: today)
    #[arg(long)]
    today: Option<String>,
}

/// Source of answers for the entry prompts.
trait Prompter {
    /// Ask one question. An empty answer yields `default` when one is given.
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;
}

/// Interactive terminal prompts.
struct TermPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TermPrompter {
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}

/// Line-per-answer prompts for piped input.
struct LinePrompter<R> {
    reader: R,
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(default) => print!("{} [{}]: ", prompt, default),
            None => print!("{}: ", prompt),
        }
        io::stdout().flush()?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .context("failed to read answer")?;
        let answer = line.trim_end_matches(&['\r', '\n'][..]).to_string();

        match default {
            Some(default) if answer.trim().is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", style("✗").red().bold(), style(e).red());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard =
        studylog_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let today = match &args.today {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid --today '{}': use YYYY-MM-DD", raw))?,
        None => Local::now().date_naive(),
    };

    let store = SessionStore::new(args.data_file.clone().unwrap_or_else(|| config.data_file()));
    let snapshot = store.snapshot();

    println!();
    println!("{}", style("=== Add New Study Session ===").cyan().bold());
    if let Some(error) = &snapshot.read_error {
        println!(
            "{}",
            style(format!(
                "Error reading data file: {}. Continuing with an empty log; the old file will be kept at {}",
                error,
                store.backup_path().display()
            ))
            .red()
        );
    }
    print_recent_sessions(&snapshot.sessions);

    let draft = if io::stdin().is_terminal() {
        let mut prompter = TermPrompter {
            theme: ColorfulTheme::default(),
        };
        collect_draft(&mut prompter, &snapshot.sessions, today, args.minutes)?
    } else {
        let mut prompter = LinePrompter {
            reader: io::stdin().lock(),
        };
        collect_draft(&mut prompter, &snapshot.sessions, today, args.minutes)?
    };

    let session = draft.into_session()?;
    tracing::info!(
        date = %session.date,
        topic = %session.topic,
        minutes = session.minutes,
        "Recording study session"
    );

    let added = session.clone();
    let sessions = store
        .append(snapshot, session)
        .with_context(|| format!("failed to write session log {}", store.path().display()))?;

    print_saved(&added, &sessions);
    Ok(())
}

/// Ask every question in order, printing context between them.
fn collect_draft(
    prompter: &mut dyn Prompter,
    sessions: &[StudySession],
    today: NaiveDate,
    minutes_mode: bool,
) -> Result<SessionDraft> {
    let today_key = today.format("%Y-%m-%d").to_string();
    let date = entry::parse_date(&prompter.ask("Date (YYYY-MM-DD)", Some(&today_key))?, today)?;

    print_sessions_on(sessions, date);

    let recent = entry::recent_topics(sessions, RECENT_TOPICS);
    if !recent.is_empty() {
        println!("{}", style(format!("Recent topics: {}", recent.join(", "))).yellow());
    }
    let topic = entry::parse_topic(&prompter.ask("Topic", None)?)?;

    let duration = if minutes_mode {
        DurationInput::Minutes(entry::parse_minutes(&prompter.ask("Minutes", None)?)?)
    } else {
        let start = entry::parse_clock(&prompter.ask("Start time (HH:MM)", None)?)?;
        let end = entry::parse_clock(&prompter.ask("End time (HH:MM)", None)?)?;
        // Reject a zero-length range before asking for notes.
        entry::duration_minutes(start, end)?;
        DurationInput::Clock { start, end }
    };

    let notes = entry::parse_notes(&prompter.ask("Notes (optional)", None)?);

    Ok(SessionDraft {
        date,
        topic,
        duration,
        notes,
    })
}

fn print_recent_sessions(sessions: &[StudySession]) {
    if sessions.is_empty() {
        println!("{}", style("No study sessions recorded yet.").yellow());
        return;
    }

    println!();
    println!("{}", style("Recent Study Sessions:").cyan().bold());
    println!("┌──────────────┬────────────────────┬─────────┬─────────────────┐");
    println!("│ Date         │ Topic              │ Minutes │ Notes           │");
    println!("├──────────────┼────────────────────┼─────────┼─────────────────┤");
    for session in sessions.iter().rev().take(RECENT_SESSIONS) {
        let notes: String = session
            .notes
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(15)
            .collect();
        let topic: String = session.topic.chars().take(18).collect();
        println!(
            "│ {:<12} │ {:<18} │ {:>7} │ {:<15} │",
            session.date_key(),
            topic,
            session.minutes,
            notes
        );
    }
    println!("└──────────────┴────────────────────┴─────────┴─────────────────┘");
    println!();
}

fn print_sessions_on(sessions: &[StudySession], date: NaiveDate) {
    let existing: Vec<&StudySession> = sessions.iter().filter(|s| s.date == date).collect();
    if existing.is_empty() {
        return;
    }

    println!("{}", style(format!("Existing sessions for {}:", date)).yellow());
    for session in &existing {
        match &session.notes {
            Some(notes) => println!(
                "  • {}: {} minutes - Notes: {}",
                session.topic, session.minutes, notes
            ),
            None => println!("  • {}: {} minutes", session.topic, session.minutes),
        }
    }
    let total: u64 = existing.iter().map(|s| s.minutes as u64).sum();
    println!("  {}", style(format!("Total: {} minutes", total)).yellow());
    println!();
}

fn print_saved(added: &StudySession, sessions: &[StudySession]) {
    println!();
    println!(
        "{} {}",
        style("✓").green().bold(),
        style(format!(
            "Added: {} minutes studying {} on {}",
            added.minutes, added.topic, added.date
        ))
        .green()
        .bold()
    );

    let topic_total: u64 = sessions
        .iter()
        .filter(|s| s.topic == added.topic)
        .map(|s| s.minutes as u64)
        .sum();
    println!(
        "{}",
        style(format!(
            "Total time spent on {}: {} minutes ({})",
            added.topic,
            topic_total,
            format_minutes_long(topic_total)
        ))
        .green()
    );

    let day_total: u64 = sessions
        .iter()
        .filter(|s| s.date == added.date)
        .map(|s| s.minutes as u64)
        .sum();
    println!(
        "{}",
        style(format!(
            "Total time spent on {}: {} minutes",
            added.date, day_total
        ))
        .green()
    );
}
