use chrono::{DateTime, Local, Utc};

use crate::core::formatter::{format_percent_token, format_quota_bar, format_reset_countdown};
use crate::core::models::account::{AccountRecord, ProviderSummary};
use crate::core::models::health::classify;
use crate::core::providers::Provider;

const BAR_WIDTH: usize = 10;

/// Inputs the renderer needs beyond the data itself. `generated_at` is
/// passed in rather than read from the clock, so identical inputs always
/// produce byte-identical output.
pub struct MenuContext<'a> {
    pub base_url: &'a str,
    pub warning_threshold: f64,
    pub generated_at: DateTime<Utc>,
}

/// Render the full menu: status-bar line, `---`, dropdown body, footer.
///
/// Layout:
/// ```text
/// 🤖C:80% 🌀A:55% | size=13
/// ---
/// 🤖 Codex (2 accounts) | size=14
/// -- 🟢 user@example.com [PRO] | font=Menlo size=12
/// ---- 5h window: 90% [█████████░] 🔄2h 15m | font=Menlo size=11 color=#4caf50
/// ...
/// ---
/// 🔄 Refresh | refresh=true
/// ⚙️ Management Center | href=https://proxy.example.com size=12
/// ```
pub fn render_menu(
    tracked: &[Provider],
    summaries: &[ProviderSummary],
    records: &[AccountRecord],
    ctx: &MenuContext,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(status_line(tracked, summaries));
    lines.push("---".to_string());

    for &provider in tracked {
        let count = summaries
            .iter()
            .find(|s| s.provider == provider)
            .map_or(0, |s| s.account_count);
        lines.push(format!(
            "{} {} ({} account{}) | size=14",
            provider.icon(),
            provider.display_name(),
            count,
            if count == 1 { "" } else { "s" }
        ));

        let provider_records = records.iter().filter(|r| r.provider == provider);
        let mut any = false;
        for record in provider_records {
            any = true;
            render_account(&mut lines, record, ctx);
        }
        if !any {
            lines.push("-- no accounts | color=#888888".to_string());
        }
    }

    render_footer(&mut lines, ctx.base_url, ctx.generated_at);
    lines.join("\n")
}

/// Render the degraded menu shown when the management API cannot be
/// reached or the connection settings are incomplete.
pub fn render_unreachable(reason: &str, base_url: Option<&str>) -> String {
    let mut lines = vec![
        "⚠️ Quota | color=red".to_string(),
        "---".to_string(),
        format!("Management API unreachable: {} | color=red", reason),
        "---".to_string(),
        "🔄 Refresh | refresh=true".to_string(),
    ];
    if let Some(base_url) = base_url {
        lines.push(format!("⚙️ Management Center | href={} size=12", base_url));
    }
    lines.join("\n")
}

fn status_line(tracked: &[Provider], summaries: &[ProviderSummary]) -> String {
    let total_accounts: usize = summaries.iter().map(|s| s.account_count).sum();
    if total_accounts == 0 {
        return "📊 No accounts | size=13".to_string();
    }

    let tokens: Vec<String> = tracked
        .iter()
        .map(|provider| {
            let percent = summaries
                .iter()
                .find(|s| s.provider == *provider)
                .and_then(|s| s.aggregate_percent);
            format!(
                "{}{}:{}",
                provider.icon(),
                provider.short_code(),
                format_percent_token(percent)
            )
        })
        .collect();

    format!("{} | size=13", tokens.join(" "))
}

fn render_account(lines: &mut Vec<String>, record: &AccountRecord, ctx: &MenuContext) {
    let health = classify(record, ctx.warning_threshold);
    let plan = record
        .plan
        .as_deref()
        .map(|p| format!(" [{}]", p.to_uppercase()))
        .unwrap_or_default();
    lines.push(format!(
        "-- {} {}{} | font=Menlo size=12",
        health.icon(),
        record.account_id,
        plan
    ));

    if record.windows.is_empty() {
        lines.push("---- no quota data | font=Menlo size=11 color=#888888".to_string());
        return;
    }

    for window in &record.windows {
        match window.remaining_fraction {
            Some(fraction) => {
                let percent = (fraction * 100.0).round() as u8;
                let reset = window
                    .resets_at
                    .map(|at| format!(" 🔄{}", format_reset_countdown(&at, &ctx.generated_at)))
                    .unwrap_or_default();
                lines.push(format!(
                    "---- {}: {}% {}{} | font=Menlo size=11 color={}",
                    window.label,
                    percent,
                    format_quota_bar(fraction, BAR_WIDTH),
                    reset,
                    percent_color(percent)
                ));
            }
            None => lines.push(format!(
                "---- {}: N/A | font=Menlo size=11 color=#888888",
                window.label
            )),
        }
    }
}

fn percent_color(percent: u8) -> &'static str {
    if percent > 50 {
        "#4caf50"
    } else if percent > 20 {
        "#ff9800"
    } else {
        "#f44336"
    }
}

fn render_footer(lines: &mut Vec<String>, base_url: &str, generated_at: DateTime<Utc>) {
    lines.push("---".to_string());
    lines.push(format!(
        "🕐 Updated {} | size=11 color=#888888",
        generated_at.with_timezone(&Local).format("%H:%M:%S")
    ));
    lines.push("---".to_string());
    lines.push("🔄 Refresh | refresh=true".to_string());
    lines.push(format!("⚙️ Management Center | href={} size=12", base_url));
}
