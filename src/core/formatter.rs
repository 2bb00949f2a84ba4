use chrono::{DateTime, Utc};

/// Status-bar percent token: "80%", or the sentinel when the aggregate is
/// undefined.
pub fn format_percent_token(percent: Option<u8>) -> String {
    match percent {
        Some(p) => format!("{}%", p),
        None => "—".to_string(),
    }
}

/// Countdown to a reset relative to `now`: "45m", "2h 15m", "3d", "3d 4h",
/// or "now" when the reset is already past.
pub fn format_reset_countdown(resets_at: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let total_seconds = (*resets_at - *now).num_seconds();

    if total_seconds <= 0 {
        return "now".to_string();
    }

    let total_minutes = total_seconds / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 24 {
        let days = hours / 24;
        let remaining_hours = hours % 24;
        if remaining_hours == 0 {
            format!("{}d", days)
        } else {
            format!("{}d {}h", days, remaining_hours)
        }
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", total_minutes.max(1))
    }
}

/// Returns "[████████░░]" where █ = remaining quota, ░ = used quota.
/// Width is the number of block characters inside the brackets.
pub fn format_quota_bar(remaining_fraction: f64, width: usize) -> String {
    let remaining = remaining_fraction.clamp(0.0, 1.0);
    let filled = ((remaining * width as f64).round() as usize).min(width);

    let full: String = "█".repeat(filled);
    let empty: String = "░".repeat(width - filled);

    format!("[{}{}]", full, empty)
}
