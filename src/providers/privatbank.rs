use crate::core::ExchangeRateSource;
use crate::core::config::PrivatBankConfig;
use crate::core::window::format_query_date;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, instrument};

const ARCHIVE_PATH: &str = "/p24api/exchange_rates";

/// Client for the PrivatBank exchange rate archive.
///
/// One `reqwest::Client` is shared across every request, so a run reuses a
/// single connection pool.
pub struct PrivatBankProvider {
    base_url: String,
    client: reqwest::Client,
}

impl PrivatBankProvider {
    pub fn new(config: &PrivatBankConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("xrates/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(PrivatBankProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn archive_url(&self, date: NaiveDate) -> String {
        format!(
            "{}{}?json&date={}",
            self.base_url,
            ARCHIVE_PATH,
            format_query_date(date)
        )
    }
}

#[async_trait]
impl ExchangeRateSource for PrivatBankProvider {
    #[instrument(name = "PrivatBankFetch", skip(self), fields(date = %date))]
    async fn fetch_day(&self, date: NaiveDate) -> Result<String> {
        let url = self.archive_url(date);
        debug!("Requesting exchange rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for date: {} URL: {}", e, date, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for date: {}",
                response.status(),
                date
            ));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for date: {date}"))
    }
}
