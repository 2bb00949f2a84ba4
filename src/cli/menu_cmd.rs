use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::cli::renderer::{self, MenuContext};
use crate::core::aggregate;
use crate::core::client::ManagementClient;
use crate::core::config::{AppConfig, BASE_URL_ENV, MANAGEMENT_KEY_ENV};
use crate::core::models::account::{AccountRecord, ProviderSummary};
use crate::core::models::health::{classify, HealthState};
use crate::core::normalize;

#[derive(Serialize)]
struct AccountPayload<'a> {
    #[serde(flatten)]
    record: &'a AccountRecord,
    health: HealthState,
}

#[derive(Serialize)]
struct SnapshotPayload<'a> {
    providers: &'a [ProviderSummary],
    accounts: Vec<AccountPayload<'a>>,
}

#[derive(Serialize)]
struct ErrorPayload {
    error: String,
}

/// One refresh cycle: fetch, normalize, classify, aggregate, render.
///
/// Every failure path still emits renderable output and returns Ok; the
/// host has no way to surface a crash beyond a blank menu bar.
pub async fn run(opts: &OutputOptions) -> Result<()> {
    let mut config = AppConfig::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "falling back to default config");
        AppConfig::default()
    });
    config.apply_env();

    let base_url = config.base_url.clone();
    let Some(key) = config.management_key.clone() else {
        let reason = format!("management key not set ({})", MANAGEMENT_KEY_ENV);
        return degraded(&reason, base_url.as_deref(), opts);
    };
    let Some(base_url) = base_url else {
        let reason = format!("base URL not set ({})", BASE_URL_ENV);
        return degraded(&reason, None, opts);
    };

    let timeout = Duration::from_secs(config.settings.request_timeout_secs);
    let client = match ManagementClient::new(&base_url, &key, timeout) {
        Ok(client) => client,
        Err(err) => return degraded(&err.to_string(), Some(&base_url), opts),
    };

    let raw = match client.fetch_accounts().await {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(error = %err, "management API fetch failed");
            return degraded(&err.to_string(), Some(client.base_url()), opts);
        }
    };

    let tracked = config.tracked_providers();
    let records = normalize::normalize_accounts(&raw, &tracked);
    let summaries = aggregate::summarize(&tracked, &records);

    match opts.format {
        OutputFormat::Menu => {
            let ctx = MenuContext {
                base_url: client.base_url(),
                warning_threshold: config.settings.warning_threshold,
                generated_at: Utc::now(),
            };
            println!("{}", renderer::render_menu(&tracked, &summaries, &records, &ctx));
        }
        OutputFormat::Json => {
            let threshold = config.settings.warning_threshold;
            let payload = SnapshotPayload {
                providers: &summaries,
                accounts: records
                    .iter()
                    .map(|record| AccountPayload {
                        record,
                        health: classify(record, threshold),
                    })
                    .collect(),
            };
            print_json(&payload, opts)?;
        }
    }

    Ok(())
}

fn degraded(reason: &str, base_url: Option<&str>, opts: &OutputOptions) -> Result<()> {
    if opts.verbose {
        eprintln!("quotabar: {}", reason);
    }
    match opts.format {
        OutputFormat::Menu => println!("{}", renderer::render_unreachable(reason, base_url)),
        OutputFormat::Json => print_json(
            &ErrorPayload {
                error: reason.to_string(),
            },
            opts,
        )?,
    }
    Ok(())
}

fn print_json<T: Serialize>(payload: &T, opts: &OutputOptions) -> Result<()> {
    let json = if opts.pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    println!("{}", json);
    Ok(())
}
