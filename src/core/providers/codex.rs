use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::core::models::account::{AccountRecord, QuotaWindow};
use crate::core::providers::Provider;

// --- Raw payload ---

#[derive(Deserialize)]
struct CodexAccountRaw {
    name: Option<String>,
    email: Option<String>,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    unavailable: bool,
    status: Option<String>,
    plan_type: Option<String>,
    rate_limit: Option<CodexRateLimitRaw>,
}

#[derive(Deserialize)]
struct CodexRateLimitRaw {
    #[serde(default)]
    limit_reached: bool,
    primary_window: Option<CodexWindowRaw>,
    secondary_window: Option<CodexWindowRaw>,
}

#[derive(Deserialize)]
struct CodexWindowRaw {
    used_percent: Option<f64>,
    reset_at: Option<i64>,
}

fn parse_window(label: &str, raw: CodexWindowRaw) -> QuotaWindow {
    let remaining_fraction = raw
        .used_percent
        .map(|used| ((100.0 - used) / 100.0).clamp(0.0, 1.0));

    let resets_at: Option<DateTime<Utc>> = raw
        .reset_at
        .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single());

    QuotaWindow {
        label: label.to_string(),
        remaining_fraction,
        resets_at,
    }
}

/// Normalize a raw Codex account entry from the management payload.
pub fn normalize(entry: &Value) -> Result<AccountRecord> {
    let raw: CodexAccountRaw =
        serde_json::from_value(entry.clone()).context("malformed codex account entry")?;

    let mut windows = Vec::new();
    let mut rate_limited = raw.unavailable;
    if let Some(rl) = raw.rate_limit {
        rate_limited = rate_limited || rl.limit_reached;
        if let Some(w) = rl.primary_window {
            windows.push(parse_window("5h window", w));
        }
        if let Some(w) = rl.secondary_window {
            windows.push(parse_window("Weekly", w));
        }
    }

    // Account-level quota follows the first window with usable data
    let remaining_fraction = windows.iter().find_map(|w| w.remaining_fraction);

    let account_id = raw
        .email
        .filter(|e| !e.is_empty())
        .or_else(|| raw.name.filter(|n| !n.is_empty()))
        .unwrap_or_else(|| "unknown".to_string());

    Ok(AccountRecord {
        provider: Provider::Codex,
        account_id,
        plan: raw.plan_type,
        remaining_fraction,
        rate_limited,
        disabled: raw.disabled,
        warning: raw.status.as_deref() == Some("warning"),
        windows,
    })
}
