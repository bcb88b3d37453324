//! studylog - Learning Journey dashboard
//!
//! Summarises the study session log as terminal text, Markdown or JSON.

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use studylog_core::analytics::goals::week_start;
use studylog_core::analytics::{Dashboard, Heatmap, PeriodRollup, Selection, Selector};
use studylog_core::format::{format_minutes, format_minutes_long, hour_label};
use studylog_core::{Config, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "studylog")]
#[command(about = "Learning Journey - study session dashboard")]
#[command(version)]
struct Args {
    /// Year to show, or "All" (default: current year)
    #[arg(long)]
    year: Option<Selector>,

    /// Topic to show, or "All"
    #[arg(long, default_value = "All")]
    topic: Selector,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Session log to read (default: from config, else the XDG data dir)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Reference date, YYYY-MM-DD (default: today)
    #[arg(long)]
    today: Option<String>,
}

fn main() -> Result<()> {
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

    let selection = Selection {
        year: args
            .year
            .clone()
            .unwrap_or_else(|| Selection::current_year(today).year),
        topic: args.topic.clone(),
    };
    if let Selector::Only(year) = &selection.year {
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("Invalid year '{}'. Use YYYY or All", year);
        }
    }

    let data_file = args.data_file.clone().unwrap_or_else(|| config.data_file());
    let store = SessionStore::new(data_file);
    let sessions = store
        .load()
        .with_context(|| format!("failed to read session log {}", store.path().display()))?;

    let dashboard = Dashboard::build(&sessions, &selection, &config.goals, today);

    match args.export.as_deref() {
        Some("json") => print_json(&dashboard)?,
        Some("md") => print_markdown(&dashboard),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&dashboard),
    }

    Ok(())
}

fn plural(n: impl Into<u64>) -> &'static str {
    if n.into() == 1 {
        ""
    } else {
        "s"
    }
}

fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn rollup_line(label: &str, rollup: &PeriodRollup) -> String {
    format!(
        "   {:<11} {:>9} / {:<9} {} {:>3}%{}",
        label,
        format_minutes(rollup.minutes),
        format_minutes(rollup.goal_minutes),
        progress_bar(rollup.percent(), 20),
        rollup.percent(),
        if rollup.meets_goal { "  ✓" } else { "" }
    )
}

/// Calendar grid: one column per week, one row per weekday.
fn heatmap_rows(heatmap: &Heatmap) -> Vec<String> {
    const SHADES: [char; 5] = ['·', '░', '▒', '▓', '█'];
    const LABELS: [&str; 7] = ["   ", "Mon", "   ", "Wed", "   ", "Fri", "   "];

    let grid_start = week_start(heatmap.range.start);
    let weeks = ((heatmap.range.end - grid_start).num_days() / 7 + 1) as usize;

    (0..7)
        .map(|row| {
            let cells: String = (0..weeks)
                .map(|week| {
                    let date = grid_start + Duration::days((week * 7 + row) as i64);
                    if !heatmap.range.contains(date) {
                        return ' ';
                    }
                    let offset = (date - heatmap.range.start).num_days() as usize;
                    heatmap
                        .days
                        .get(offset)
                        .map(|d| SHADES[d.intensity() as usize])
                        .unwrap_or(' ')
                })
                .collect();
            format!("   {} {}", LABELS[row], cells)
        })
        .collect()
}

fn print_terminal(dash: &Dashboard) {
    let title = format!("Learning Journey{}", dash.selection_label());

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    if dash.is_empty() {
        println!("  No study sessions found for this selection.");
        println!();
    } else {
        let summary = &dash.summary;
        println!("SUMMARY");
        println!(
            "   Total time: {:<14} Sessions: {}",
            format_minutes(summary.total_minutes),
            summary.session_count
        );
        println!(
            "   Topics:     {:<14} Avg/session: {}",
            summary.unique_topics,
            format_minutes(summary.avg_minutes_per_session)
        );
        println!(
            "   Most studied: {} ({})",
            summary.most_studied.topic,
            format_minutes_long(summary.most_studied.minutes)
        );
        println!();

        println!("TOP TOPICS");
        for (i, topic) in summary.top_topics(5).iter().enumerate() {
            println!(
                "   {}. {:<24} {:>9}",
                i + 1,
                topic.topic,
                format_minutes(topic.minutes)
            );
        }
        println!();

        println!("ACTIVITY  {}", dash.heatmap.caption());
        for row in heatmap_rows(&dash.heatmap) {
            println!("{}", row);
        }
        println!("   Less · ░ ▒ ▓ █ More");
        println!();

        let trend = &dash.trend;
        println!(
            "LAST 7 DAYS  {} {}",
            trend.direction.arrow(),
            trend.direction.as_str()
        );
        for (date, minutes) in &trend.days {
            println!(
                "   {} {:>7} {}",
                date.format("%a %b %e"),
                format_minutes(*minutes),
                "▇".repeat((*minutes / 15).min(40) as usize)
            );
        }
        println!(
            "   Total: {}  Active days: {}  Avg/active day: {}",
            format_minutes(trend.total_minutes()),
            trend.active_days(),
            format_minutes(trend.avg_per_active_day())
        );
        println!();
    }

    // Goals
    println!(
        "GOALS  (daily target {})",
        format_minutes(dash.goals.total_daily_minutes())
    );
    if let Some(today) = dash.subjects.today() {
        println!(
            "   {:<11} {:>9} / {:<9} {} {:>3}%",
            "Today",
            format_minutes(today.total_minutes),
            format_minutes(dash.goals.total_daily_minutes()),
            progress_bar(today.goal_percent, 20),
            today.goal_percent
        );
    }
    println!("{}", rollup_line("This week", &dash.current_week));
    println!("{}", rollup_line("This month", &dash.current_month));
    println!(
        "   Goal streak: {} day{}   Days at half goal or more: {}",
        dash.goal_streaks.current_streak_days,
        plural(dash.goal_streaks.current_streak_days),
        dash.minimum_met_days
    );
    println!();

    // Streaks
    let streaks = &dash.streaks;
    println!("STREAKS");
    println!(
        "   Current:  {} day{}",
        streaks.current_streak_days,
        plural(streaks.current_streak_days)
    );
    print!(
        "   Longest:  {} day{}",
        streaks.longest_streak_days,
        plural(streaks.longest_streak_days)
    );
    if let (Some(start), Some(end)) = (streaks.longest_streak_start, streaks.longest_streak_end) {
        print!(" ({} to {})", start, end);
    }
    println!();
    println!("   Active days: {}", streaks.active_days);
    println!();

    // Time of day
    let hourly = &dash.hourly;
    println!("TIME OF DAY");
    if hourly.is_empty() {
        println!("   No sessions with start and end times.");
    } else {
        for bucket in hourly.most_active_hours() {
            println!(
                "   {:>5}  {:>9}  {} session{}",
                hour_label(bucket.hour),
                format_minutes(bucket.rounded_minutes()),
                bucket.session_count,
                plural(bucket.session_count)
            );
        }
        if let Some(period) = hourly.best_period() {
            println!("   Best period: {} ({})", period.name(), period.time_span());
        }
        if let Some(best) = hourly.most_productive_hours().first() {
            println!(
                "   Longest sessions start around {} (avg {})",
                hour_label(best.hour),
                format_minutes(best.avg_session_minutes())
            );
        }
    }
    println!();

    // Subjects
    let report = &dash.subjects;
    println!("SUBJECTS  (readiness {}%)", report.readiness_score);
    for subject in &report.subjects {
        println!(
            "   {:<16} week {:>3}%  mastery {:>3}%  streak {:>2}  total {}",
            subject.topic,
            subject.weekly_percent,
            subject.mastery_percent,
            subject.goal_streak_days,
            format_minutes(subject.total_minutes)
        );
    }
    println!();

    // Achievements
    let game = &dash.gamification;
    println!(
        "ACHIEVEMENTS  Level {} {} - {} XP",
        game.level.level, game.level.title, game.total_points
    );
    if let Some(next) = game.next_level {
        println!(
            "   {} {}% to {} ({} XP to go)",
            progress_bar(game.progress, 30),
            game.progress,
            next.title,
            game.points_to_next().unwrap_or(0)
        );
    }
    for achievement in &game.unlocked {
        println!(
            "   ✓ {:<22} {:>5} XP  {}",
            achievement.title, achievement.points, achievement.description
        );
    }
    println!(
        "   {} of {} unlocked",
        game.unlocked.len(),
        game.unlocked.len() + game.locked.len()
    );
    println!();
}

fn print_markdown(dash: &Dashboard) {
    println!("# Learning Journey{}", dash.selection_label());
    println!();

    let summary = &dash.summary;
    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!(
        "| Total Time | {} |",
        format_minutes_long(summary.total_minutes)
    );
    println!("| Sessions | {} |", summary.session_count);
    println!("| Topics | {} |", summary.unique_topics);
    println!(
        "| Avg per Session | {} |",
        format_minutes(summary.avg_minutes_per_session)
    );
    println!(
        "| Most Studied | {} ({}) |",
        summary.most_studied.topic,
        format_minutes(summary.most_studied.minutes)
    );
    println!();

    if !summary.topic_breakdown.is_empty() {
        println!("## Topics");
        println!();
        for (i, topic) in summary.topic_breakdown.iter().enumerate() {
            println!(
                "{}. **{}** - {}",
                i + 1,
                topic.topic,
                format_minutes(topic.minutes)
            );
        }
        println!();
    }

    println!("## Activity");
    println!();
    println!("- **{}**", dash.heatmap.caption());
    println!("- **Active days:** {}", dash.heatmap.active_days());
    if let Some(day) = dash.heatmap.busiest_day() {
        println!(
            "- **Busiest day:** {} ({})",
            day.date,
            format_minutes(day.minutes)
        );
    }
    println!(
        "- **Last 7 days:** {} ({}, {} active day{})",
        format_minutes(dash.trend.total_minutes()),
        dash.trend.direction.as_str(),
        dash.trend.active_days(),
        plural(dash.trend.active_days() as u64)
    );
    println!();

    println!("## Goals");
    println!();
    println!("| Period | Studied | Goal | Progress |");
    println!("|--------|---------|------|----------|");
    for (label, rollup) in [
        ("This week", &dash.current_week),
        ("This month", &dash.current_month),
    ] {
        println!(
            "| {} | {} | {} | {}% |",
            label,
            format_minutes(rollup.minutes),
            format_minutes(rollup.goal_minutes),
            rollup.percent()
        );
    }
    println!();

    println!("## Streaks");
    println!();
    println!(
        "- **Current streak:** {} days",
        dash.streaks.current_streak_days
    );
    println!(
        "- **Longest streak:** {} days",
        dash.streaks.longest_streak_days
    );
    println!(
        "- **Goal streak:** {} days",
        dash.goal_streaks.current_streak_days
    );
    println!();

    if !dash.hourly.is_empty() {
        println!("## Time of Day");
        println!();
        for bucket in dash.hourly.most_active_hours() {
            println!(
                "- **{}:** {} across {} session{}",
                hour_label(bucket.hour),
                format_minutes(bucket.rounded_minutes()),
                bucket.session_count,
                plural(bucket.session_count)
            );
        }
        if let Some(period) = dash.hourly.best_period() {
            println!("- **Best period:** {} ({})", period.name(), period.time_span());
        }
        println!();
    }

    println!("## Subjects");
    println!();
    println!("Readiness: **{}%**", dash.subjects.readiness_score);
    println!();
    println!("| Subject | Weekly | Mastery | Goal Streak | Total |");
    println!("|---------|--------|---------|-------------|-------|");
    for subject in &dash.subjects.subjects {
        println!(
            "| {} | {}% | {}% | {} | {} |",
            subject.topic,
            subject.weekly_percent,
            subject.mastery_percent,
            subject.goal_streak_days,
            format_minutes(subject.total_minutes)
        );
    }
    println!();

    let game = &dash.gamification;
    println!("## Achievements");
    println!();
    println!(
        "**Level {} - {}** ({} XP)",
        game.level.level, game.level.title, game.total_points
    );
    println!();
    for achievement in &game.unlocked {
        println!(
            "- **{}** ({} XP, {}) - {}",
            achievement.title,
            achievement.points,
            achievement.category.as_str(),
            achievement.description
        );
    }
    println!();

    println!("---");
    println!("*Generated by studylog*");
}

fn print_json(dash: &Dashboard) -> Result<()> {
    let rollup = |r: &PeriodRollup| {
        serde_json::json!({
            "start": r.start.to_string(),
            "end": r.end.to_string(),
            "minutes": r.minutes,
            "goal_minutes": r.goal_minutes,
            "meets_goal": r.meets_goal,
        })
    };

    let summary = serde_json::json!({
        "total_minutes": dash.summary.total_minutes,
        "session_count": dash.summary.session_count,
        "unique_topics": dash.summary.unique_topics,
        "avg_minutes_per_session": dash.summary.avg_minutes_per_session,
        "most_studied": {
            "topic": dash.summary.most_studied.topic,
            "minutes": dash.summary.most_studied.minutes,
        },
        "topics": dash.summary.topic_breakdown.iter().map(|t| serde_json::json!({
            "topic": t.topic,
            "minutes": t.minutes,
        })).collect::<Vec<_>>(),
    });

    let categories = dash
        .categories
        .iter()
        .map(|(name, c)| {
            serde_json::json!({
                "category": name,
                "minutes": c.minutes,
                "topics": c.topics,
            })
        })
        .collect::<Vec<_>>();

    let heatmap = serde_json::json!({
        "start": dash.heatmap.range.start.to_string(),
        "end": dash.heatmap.range.end.to_string(),
        "total_minutes": dash.heatmap.total_minutes(),
        "active_days": dash.heatmap.active_days(),
        "days": dash.heatmap.days.iter().filter(|d| d.minutes > 0).map(|d| serde_json::json!({
            "date": d.date.to_string(),
            "minutes": d.minutes,
            "level": d.intensity(),
            "topics": d.topics,
        })).collect::<Vec<_>>(),
    });

    let trend = serde_json::json!({
        "direction": dash.trend.direction.as_str(),
        "total_minutes": dash.trend.total_minutes(),
        "active_days": dash.trend.active_days(),
        "avg_per_active_day": dash.trend.avg_per_active_day(),
        "days": dash.trend.days.iter().map(|(date, minutes)| serde_json::json!({
            "date": date.to_string(),
            "minutes": minutes,
        })).collect::<Vec<_>>(),
    });

    let hourly = serde_json::json!({
        "timed_sessions": dash.hourly.timed_sessions,
        "hours": dash.hourly.hours.iter().map(|h| serde_json::json!({
            "hour": h.hour,
            "minutes": h.rounded_minutes(),
            "sessions": h.session_count,
        })).collect::<Vec<_>>(),
        "peak_hours": dash.hourly.most_active_hours().iter().map(|h| h.hour).collect::<Vec<_>>(),
        "best_period": dash.hourly.best_period().map(|p| p.name()),
    });

    let streaks = serde_json::json!({
        "current": dash.streaks.current_streak_days,
        "longest": dash.streaks.longest_streak_days,
        "longest_start": dash.streaks.longest_streak_start.map(|d| d.to_string()),
        "longest_end": dash.streaks.longest_streak_end.map(|d| d.to_string()),
        "active_days": dash.streaks.active_days,
        "goal_current": dash.goal_streaks.current_streak_days,
        "goal_longest": dash.goal_streaks.longest_streak_days,
        "goal_met_days": dash.goal_streaks.qualifying_days,
        "minimum_met_days": dash.minimum_met_days,
    });

    let goals = serde_json::json!({
        "daily_minutes": dash.goals.total_daily_minutes(),
        "weekly_minutes": dash.goals.weekly_minutes(),
        "monthly_minutes": dash.goals.monthly_minutes(),
        "current_week": rollup(&dash.current_week),
        "current_month": rollup(&dash.current_month),
        "weeks": dash.weekly.iter().map(rollup).collect::<Vec<_>>(),
        "months": dash.monthly.iter().map(rollup).collect::<Vec<_>>(),
    });

    let subjects = serde_json::json!({
        "readiness": dash.subjects.readiness_score,
        "total_hours": dash.subjects.total_hours,
        "subjects": dash.subjects.subjects.iter().map(|s| serde_json::json!({
            "topic": s.topic,
            "total_minutes": s.total_minutes,
            "days_active": s.days_active,
            "goal_streak": s.goal_streak_days,
            "mastery_percent": s.mastery_percent,
            "weekly_minutes": s.weekly_minutes,
            "weekly_goal_minutes": s.weekly_goal_minutes,
            "weekly_percent": s.weekly_percent,
        })).collect::<Vec<_>>(),
    });

    let game = &dash.gamification;
    let achievements = serde_json::json!({
        "total_points": game.total_points,
        "level": game.level.level,
        "level_title": game.level.title,
        "next_level": game.next_level.map(|l| l.title),
        "progress": game.progress,
        "unlocked": game.unlocked.iter().map(|a| a.id).collect::<Vec<_>>(),
    });

    let json = serde_json::json!({
        "today": dash.today.to_string(),
        "selection": {
            "year": dash.selection.year.as_str(),
            "topic": dash.selection.topic.as_str(),
        },
        "years": dash.years,
        "topics": dash.topics,
        "summary": summary,
        "categories": categories,
        "heatmap": heatmap,
        "trend": trend,
        "hourly": hourly,
        "streaks": streaks,
        "goals": goals,
        "subjects": subjects,
        "achievements": achievements,
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
