use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const MANAGEMENT_PATH: &str = "/v0/management/accounts/status";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct AccountsResponse {
    #[serde(default)]
    accounts: Vec<Value>,
}

/// Client for the proxy management API. One GET per refresh cycle with the
/// management key as a bearer token; the host re-invokes the whole binary on
/// its own timer, so there are no retries.
pub struct ManagementClient {
    http: reqwest::Client,
    base_url: String,
    management_key: String,
}

impl ManagementClient {
    pub fn new(
        base_url: &str,
        management_key: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            management_key: management_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw per-account status list. Entry shapes are
    /// provider-dependent; decoding them is the normalizer's job.
    pub async fn fetch_accounts(&self) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}{}", self.base_url, MANAGEMENT_PATH);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.management_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let data: AccountsResponse = serde_json::from_str(&body)?;
        Ok(data.accounts)
    }
}
