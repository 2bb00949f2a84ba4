use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::core::models::account::{AccountRecord, QuotaWindow};
use crate::core::providers::Provider;

/// Quota arrives per model; the dropdown shows one line per group, folded to
/// the lowest remaining fraction among its models.
const MODEL_GROUPS: &[(&str, &[&str])] = &[
    (
        "Claude/GPT",
        &[
            "claude-sonnet-4-5-thinking",
            "claude-opus-4-5-thinking",
            "claude-opus-4-6-thinking",
            "claude-sonnet-4-5",
            "claude-sonnet-4-6",
            "gpt-oss-120b-medium",
        ],
    ),
    (
        "Gemini 3 Pro",
        &[
            "gemini-3-pro-high",
            "gemini-3-pro-low",
            "gemini-3.1-pro-high",
            "gemini-3.1-pro-low",
        ],
    ),
    ("Gemini 3 Flash", &["gemini-3-flash", "gemini-3.1-flash-image"]),
    ("Gemini 2.5 Pro", &["gemini-2.5-pro"]),
    (
        "Gemini 2.5 Flash",
        &["gemini-2.5-flash", "gemini-2.5-flash-thinking"],
    ),
    ("Gemini 2.5 Flash Lite", &["gemini-2.5-flash-lite"]),
];

// --- Raw payload ---

#[derive(Deserialize)]
struct AntigravityAccountRaw {
    name: Option<String>,
    email: Option<String>,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    unavailable: bool,
    status: Option<String>,
    #[serde(default)]
    models: BTreeMap<String, AntigravityModelRaw>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AntigravityModelRaw {
    quota_info: Option<QuotaInfoRaw>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuotaInfoRaw {
    remaining_fraction: Option<f64>,
    reset_time: Option<String>,
}

fn group_label(model_id: &str) -> Option<&'static str> {
    MODEL_GROUPS
        .iter()
        .find(|(_, ids)| ids.contains(&model_id))
        .map(|(label, _)| *label)
}

fn parse_reset_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn build_group_windows(models: &BTreeMap<String, AntigravityModelRaw>) -> Vec<QuotaWindow> {
    let mut groups: BTreeMap<&'static str, QuotaWindow> = BTreeMap::new();

    for (model_id, model) in models {
        let Some(label) = group_label(model_id) else {
            continue;
        };
        let quota = model.quota_info.as_ref();
        let remaining = quota.and_then(|q| q.remaining_fraction);
        let resets_at = quota
            .and_then(|q| q.reset_time.as_deref())
            .and_then(parse_reset_time);

        let window = groups.entry(label).or_insert_with(|| QuotaWindow {
            label: label.to_string(),
            remaining_fraction: None,
            resets_at: None,
        });
        if let Some(fraction) = remaining {
            let fraction = fraction.clamp(0.0, 1.0);
            if window.remaining_fraction.map_or(true, |current| fraction < current) {
                window.remaining_fraction = Some(fraction);
                window.resets_at = resets_at.or(window.resets_at);
            }
        }
    }

    groups.into_values().collect()
}

/// Normalize a raw Antigravity account entry from the management payload.
pub fn normalize(entry: &Value) -> Result<AccountRecord> {
    let raw: AntigravityAccountRaw =
        serde_json::from_value(entry.clone()).context("malformed antigravity account entry")?;

    let windows = build_group_windows(&raw.models);

    // The status bar tracks the tightest group, so the account-level quota is
    // the minimum across known groups
    let remaining_fraction = windows
        .iter()
        .filter_map(|w| w.remaining_fraction)
        .reduce(f64::min);

    let account_id = raw
        .email
        .filter(|e| !e.is_empty())
        .or_else(|| raw.name.filter(|n| !n.is_empty()))
        .unwrap_or_else(|| "unknown".to_string());

    Ok(AccountRecord {
        provider: Provider::Antigravity,
        account_id,
        plan: None,
        remaining_fraction,
        rate_limited: raw.unavailable,
        disabled: raw.disabled,
        warning: raw.status.as_deref() == Some("warning"),
        windows,
    })
}
