use crate::core::models::account::{AccountRecord, ProviderSummary};
use crate::core::providers::Provider;

/// Mean remaining percentage across accounts with a known fraction, rounded
/// half-up. Accounts with an unknown fraction are excluded rather than
/// counted as 0%; None when every account is excluded.
pub fn aggregate_percent<'a, I>(records: I) -> Option<u8>
where
    I: IntoIterator<Item = &'a AccountRecord>,
{
    let fractions: Vec<f64> = records
        .into_iter()
        .filter_map(|r| r.remaining_fraction)
        .collect();
    if fractions.is_empty() {
        return None;
    }
    let mean = fractions.iter().sum::<f64>() / fractions.len() as f64;
    Some((mean * 100.0).round().clamp(0.0, 100.0) as u8)
}

/// One summary per tracked provider, in tracked order. Unknown-fraction
/// accounts still count toward `account_count`.
pub fn summarize(tracked: &[Provider], records: &[AccountRecord]) -> Vec<ProviderSummary> {
    tracked
        .iter()
        .map(|&provider| {
            let for_provider: Vec<&AccountRecord> =
                records.iter().filter(|r| r.provider == provider).collect();
            ProviderSummary {
                provider,
                aggregate_percent: aggregate_percent(for_provider.iter().copied()),
                account_count: for_provider.len(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(provider: Provider, remaining_fraction: Option<f64>) -> AccountRecord {
        AccountRecord {
            provider,
            account_id: "user@example.com".to_string(),
            plan: None,
            remaining_fraction,
            rate_limited: false,
            disabled: false,
            warning: false,
            windows: vec![],
        }
    }

    #[test]
    fn mean_of_two_fractions() {
        let records = vec![
            record(Provider::Codex, Some(0.9)),
            record(Provider::Codex, Some(0.7)),
        ];
        assert_eq!(aggregate_percent(&records), Some(80));
    }

    #[test]
    fn unknown_fractions_are_excluded_not_zero() {
        let records = vec![
            record(Provider::Codex, Some(0.9)),
            record(Provider::Codex, None),
        ];
        assert_eq!(aggregate_percent(&records), Some(90));
    }

    #[test]
    fn all_unknown_is_undefined() {
        let records = vec![
            record(Provider::Codex, None),
            record(Provider::Codex, None),
        ];
        assert_eq!(aggregate_percent(&records), None);
    }

    #[test]
    fn no_records_is_undefined() {
        let records: Vec<AccountRecord> = vec![];
        assert_eq!(aggregate_percent(&records), None);
    }

    #[test]
    fn rounds_half_up() {
        let records = vec![record(Provider::Codex, Some(0.125))];
        assert_eq!(aggregate_percent(&records), Some(13));
    }

    #[test]
    fn stays_within_bounds() {
        let records = vec![record(Provider::Codex, Some(0.0))];
        assert_eq!(aggregate_percent(&records), Some(0));
        let records = vec![record(Provider::Codex, Some(1.0))];
        assert_eq!(aggregate_percent(&records), Some(100));
    }

    #[test]
    fn summarize_keeps_tracked_order_and_counts_unknowns() {
        let records = vec![
            record(Provider::Antigravity, Some(0.5)),
            record(Provider::Codex, Some(0.9)),
            record(Provider::Codex, None),
        ];
        let summaries = summarize(Provider::all(), &records);
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].provider, Provider::Codex);
        assert_eq!(summaries[0].aggregate_percent, Some(90));
        assert_eq!(summaries[0].account_count, 2);

        assert_eq!(summaries[1].provider, Provider::Antigravity);
        assert_eq!(summaries[1].aggregate_percent, Some(50));
        assert_eq!(summaries[1].account_count, 1);
    }

    #[test]
    fn summarize_provider_without_accounts_is_undefined() {
        let records = vec![record(Provider::Codex, Some(0.9))];
        let summaries = summarize(Provider::all(), &records);
        assert_eq!(summaries[1].provider, Provider::Antigravity);
        assert_eq!(summaries[1].aggregate_percent, None);
        assert_eq!(summaries[1].account_count, 0);
    }
}
