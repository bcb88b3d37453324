//! Formatting helpers shared by the CLI outputs.

/// Compact minutes display: "45m", "2h", "2h 5m".
pub fn format_minutes(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, rest)
    }
}

/// Long-form minutes display: "45 min", "1 hour", "2 hours 5 min".
pub fn format_minutes_long(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    let hours = minutes / 60;
    let rest = minutes % 60;
    let plural = if hours == 1 { "" } else { "s" };
    if rest == 0 {
        format!("{} hour{}", hours, plural)
    } else {
        format!("{} hour{} {} min", hours, plural, rest)
    }
}

/// Percentage of `target` reached, rounded and capped at 100.
pub fn goal_progress(achieved: u64, target: u64) -> u32 {
    if target == 0 {
        return 100;
    }
    let pct = (achieved as f64 / target as f64 * 100.0).round();
    pct.min(100.0) as u32
}

/// Clock hour label (e.g. "12 AM", "3 PM").
pub fn hour_label(hour: u8) -> String {
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{} AM", h),
        h => format!("{} PM", h - 12),
    }
}
