use serde::{Deserialize, Serialize};

use crate::core::models::account::AccountRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Ready,
    RateLimited,
    Warning,
    Disabled,
    Unknown,
}

impl HealthState {
    /// Dropdown icon. Total over all variants.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Ready => "🟢",
            Self::RateLimited => "🔴",
            Self::Warning => "🟡",
            Self::Disabled | Self::Unknown => "⚫",
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready"),
            Self::RateLimited => write!(f, "Rate Limited"),
            Self::Warning => write!(f, "Warning"),
            Self::Disabled => write!(f, "Disabled"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Classify an account into a discrete health state. Priority order, first
/// match wins: disabled, rate limited, warning (flagged or known fraction
/// below the threshold), ready. An unknown fraction never counts as low;
/// with no signals at all the account is Unknown.
pub fn classify(record: &AccountRecord, warning_threshold: f64) -> HealthState {
    if record.disabled {
        return HealthState::Disabled;
    }
    if record.rate_limited {
        return HealthState::RateLimited;
    }
    if record.warning {
        return HealthState::Warning;
    }
    match record.remaining_fraction {
        Some(fraction) if fraction < warning_threshold => HealthState::Warning,
        Some(_) => HealthState::Ready,
        None => HealthState::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::providers::Provider;

    fn record(
        remaining_fraction: Option<f64>,
        rate_limited: bool,
        disabled: bool,
        warning: bool,
    ) -> AccountRecord {
        AccountRecord {
            provider: Provider::Codex,
            account_id: "user@example.com".to_string(),
            plan: None,
            remaining_fraction,
            rate_limited,
            disabled,
            warning,
            windows: vec![],
        }
    }

    #[test]
    fn disabled_wins_over_everything() {
        let r = record(Some(0.05), true, true, true);
        assert_eq!(classify(&r, 0.2), HealthState::Disabled);
    }

    #[test]
    fn rate_limited_wins_over_warning() {
        let r = record(Some(0.05), true, false, true);
        assert_eq!(classify(&r, 0.2), HealthState::RateLimited);
    }

    #[test]
    fn rate_limited_regardless_of_fraction() {
        let r = record(Some(0.95), true, false, false);
        assert_eq!(classify(&r, 0.2), HealthState::RateLimited);
    }

    #[test]
    fn warning_flag_triggers_warning() {
        let r = record(Some(0.9), false, false, true);
        assert_eq!(classify(&r, 0.2), HealthState::Warning);
    }

    #[test]
    fn low_fraction_triggers_warning() {
        let r = record(Some(0.19), false, false, false);
        assert_eq!(classify(&r, 0.2), HealthState::Warning);
    }

    #[test]
    fn fraction_at_threshold_is_ready() {
        let r = record(Some(0.2), false, false, false);
        assert_eq!(classify(&r, 0.2), HealthState::Ready);
    }

    #[test]
    fn unknown_fraction_does_not_warn() {
        let r = record(None, false, false, false);
        assert_eq!(classify(&r, 0.2), HealthState::Unknown);
    }

    #[test]
    fn healthy_fraction_is_ready() {
        let r = record(Some(0.8), false, false, false);
        assert_eq!(classify(&r, 0.2), HealthState::Ready);
    }

    #[test]
    fn every_state_has_an_icon() {
        for state in [
            HealthState::Ready,
            HealthState::RateLimited,
            HealthState::Warning,
            HealthState::Disabled,
            HealthState::Unknown,
        ] {
            assert!(!state.icon().is_empty());
        }
    }
}
