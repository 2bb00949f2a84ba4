use serde_json::Value;

use crate::core::models::account::AccountRecord;
use crate::core::providers::{antigravity, codex, Provider};

/// Normalize the raw management payload into uniform account records.
///
/// Entries with a missing, unknown, or untracked provider tag are dropped.
/// Entries the provider adapter cannot parse are skipped with a warning so
/// the rest of the batch survives.
pub fn normalize_accounts(raw: &[Value], tracked: &[Provider]) -> Vec<AccountRecord> {
    raw.iter()
        .filter_map(|entry| {
            let tag = match entry.get("provider").and_then(Value::as_str) {
                Some(tag) => tag,
                None => {
                    tracing::warn!("skipping account entry without provider tag");
                    return None;
                }
            };

            let provider = match Provider::from_id(tag) {
                Some(p) if tracked.contains(&p) => p,
                _ => {
                    tracing::debug!(provider = tag, "skipping untracked provider");
                    return None;
                }
            };

            match normalize_entry(provider, entry) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(
                        provider = provider.id(),
                        error = %err,
                        "skipping malformed account entry"
                    );
                    None
                }
            }
        })
        .collect()
}

fn normalize_entry(provider: Provider, entry: &Value) -> anyhow::Result<AccountRecord> {
    match provider {
        Provider::Codex => codex::normalize(entry),
        Provider::Antigravity => antigravity::normalize(entry),
    }
}
