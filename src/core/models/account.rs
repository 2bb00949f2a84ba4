use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::providers::Provider;

/// One quota window inside an account: a Codex rate window ("5h window",
/// "Weekly") or an Antigravity model group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaWindow {
    pub label: String,
    /// Remaining allowance as a fraction of the window total (0.0 - 1.0)
    pub remaining_fraction: Option<f64>,
    /// When the window resets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resets_at: Option<DateTime<Utc>>,
}

/// Uniform view of one proxied account, rebuilt from the raw management
/// payload on every refresh cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub provider: Provider,
    /// Email when the payload carries one, otherwise the auth file name
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Remaining quota across the account; None means the payload carried no
    /// usable quota data, which is not the same as 0%
    pub remaining_fraction: Option<f64>,
    pub rate_limited: bool,
    pub disabled: bool,
    pub warning: bool,
    pub windows: Vec<QuotaWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub provider: Provider,
    /// Mean remaining percentage across accounts with a known fraction; None
    /// when no account has one
    pub aggregate_percent: Option<u8>,
    pub account_count: usize,
}
