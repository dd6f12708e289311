//! Rate source abstraction and concurrent window fetch

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::try_join_all;
use indicatif::ProgressBar;
use tracing::debug;

#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    /// Returns the raw archive body for `date`.
    async fn fetch_day(&self, date: NaiveDate) -> Result<String>;
}

/// Fetches every date concurrently and returns the bodies in `dates` order.
///
/// The first failed request fails the whole batch.
pub async fn fetch_window(
    source: &dyn ExchangeRateSource,
    dates: &[NaiveDate],
    pb: &ProgressBar,
) -> Result<Vec<String>> {
    debug!(days = dates.len(), "Fetching exchange rate window");
    let requests = dates.iter().map(|date| {
        let pb = pb.clone();
        async move {
            let body = source.fetch_day(*date).await?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(body)
        }
    });
    try_join_all(requests).await
}
