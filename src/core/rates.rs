//! Exchange rate records and the archive response transformer

use anyhow::{Context, Result, anyhow, bail};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Currency codes a run is interested in. Codes are stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFilter {
    codes: HashSet<String>,
}

impl CurrencyFilter {
    pub fn new<I, S>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes: HashSet<String> = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        if codes.is_empty() {
            bail!("Currency filter must contain at least one currency code");
        }
        Ok(Self { codes })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePair {
    pub sale: f64,
    pub purchase: f64,
}

/// Filtered rates for one archive date. Serializes as `{date: {code: pair}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    pub date: String,
    pub rates: BTreeMap<String, RatePair>,
}

impl Serialize for RateEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.rates)?;
        map.end()
    }
}

/// Entries in request order, newest date first.
pub type RateHistory = Vec<RateEntry>;

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    date: Option<String>,
    #[serde(rename = "exchangeRate")]
    exchange_rate: Vec<ArchiveRate>,
}

#[derive(Debug, Deserialize)]
struct ArchiveRate {
    // Absent on the base currency row
    currency: Option<String>,
    #[serde(rename = "saleRateNB")]
    sale_rate_nb: Option<f64>,
    #[serde(rename = "purchaseRateNB")]
    purchase_rate_nb: Option<f64>,
}

/// Parses one archive body.
///
/// Invalid JSON is an error. A document without `exchangeRate`, or whose rates
/// share no currency with `filter`, yields `Ok(None)`.
pub fn parse_archive(body: &str, filter: &CurrencyFilter) -> Result<Option<RateEntry>> {
    let value: serde_json::Value = serde_json::from_str(body).with_context(|| {
        format!("Failed to parse exchange rate response as JSON. Response: '{body}'")
    })?;

    if value.get("exchangeRate").is_none() {
        debug!("Response has no exchangeRate field, skipping");
        return Ok(None);
    }

    let archive: ArchiveResponse =
        serde_json::from_value(value).context("Unexpected exchange rate response shape")?;
    let date = archive
        .date
        .ok_or_else(|| anyhow!("Exchange rate response is missing its date"))?;

    let mut rates = BTreeMap::new();
    for record in archive.exchange_rate {
        let Some(code) = record.currency else {
            continue;
        };
        if !filter.contains(&code) {
            continue;
        }
        let (Some(sale), Some(purchase)) = (record.sale_rate_nb, record.purchase_rate_nb) else {
            bail!("Rate for {code} on {date} is missing saleRateNB or purchaseRateNB");
        };
        rates.insert(code, RatePair { sale, purchase });
    }

    if rates.is_empty() {
        debug!(%date, "No configured currencies in response, skipping");
        return Ok(None);
    }

    Ok(Some(RateEntry { date, rates }))
}

/// Parses every body in order, dropping the ones that produce no entry.
pub fn transform<S: AsRef<str>>(bodies: &[S], filter: &CurrencyFilter) -> Result<RateHistory> {
    let mut history = Vec::with_capacity(bodies.len());
    for body in bodies {
        if let Some(entry) = parse_archive(body.as_ref(), filter)? {
            history.push(entry);
        }
    }
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MIXED_RESPONSE: &str = r#"{
        "date": "01.12.2024",
        "bank": "PB",
        "baseCurrency": 980,
        "baseCurrencyLit": "UAH",
        "exchangeRate": [
            {"baseCurrency": "UAH", "saleRateNB": 1.0, "purchaseRateNB": 1.0},
            {"baseCurrency": "UAH", "currency": "USD", "saleRateNB": 39.5, "purchaseRateNB": 39.0, "saleRate": 41.6, "purchaseRate": 41.0},
            {"baseCurrency": "UAH", "currency": "EUR", "saleRateNB": 43.0, "purchaseRateNB": 42.5},
            {"baseCurrency": "UAH", "currency": "JPY", "saleRateNB": 0.27, "purchaseRateNB": 0.26}
        ]
    }"#;

    fn filter(codes: &[&str]) -> CurrencyFilter {
        CurrencyFilter::new(codes.iter().copied()).unwrap()
    }

    #[test]
    fn test_filter_normalizes_codes() {
        let f = filter(&[" usd", "Eur", "USD"]);
        assert!(f.contains("USD"));
        assert!(f.contains("EUR"));
        assert!(!f.contains("usd"));
    }

    #[test]
    fn test_empty_filter_is_rejected() {
        let result = CurrencyFilter::new(Vec::<String>::new());
        assert!(result.is_err());
        assert!(CurrencyFilter::new(["  "]).is_err());
    }

    #[test]
    fn test_parse_filters_to_configured_currencies() {
        let entry = parse_archive(MIXED_RESPONSE, &filter(&["USD", "EUR"]))
            .unwrap()
            .expect("entry expected");

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "01.12.2024": {
                    "USD": {"sale": 39.5, "purchase": 39.0},
                    "EUR": {"sale": 43.0, "purchase": 42.5}
                }
            })
        );
        assert!(!entry.rates.contains_key("JPY"));
    }

    #[test]
    fn test_missing_exchange_rate_is_skipped() {
        let body = r#"{"date": "01.12.2024", "bank": "PB"}"#;
        assert!(parse_archive(body, &filter(&["USD"])).unwrap().is_none());
    }

    #[test]
    fn test_non_object_json_is_skipped() {
        assert!(parse_archive("[]", &filter(&["USD"])).unwrap().is_none());
        assert!(parse_archive("\"hello\"", &filter(&["USD"])).unwrap().is_none());
    }

    #[test]
    fn test_no_overlap_is_skipped() {
        let entry = parse_archive(MIXED_RESPONSE, &filter(&["CHF", "PLN"])).unwrap();
        assert!(entry.is_none());
    }

    #[test]
    fn test_empty_rate_list_is_skipped() {
        let body = r#"{"date": "01.12.2024", "exchangeRate": []}"#;
        assert!(parse_archive(body, &filter(&["USD"])).unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_fails() {
        let result = parse_archive("<html>Bad Gateway</html>", &filter(&["USD"]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_missing_date_fails() {
        let body = r#"{"exchangeRate": [{"currency": "USD", "saleRateNB": 1.0, "purchaseRateNB": 1.0}]}"#;
        assert!(parse_archive(body, &filter(&["USD"])).is_err());
    }

    #[test]
    fn test_missing_rate_on_filtered_currency_fails() {
        let body = r#"{"date": "01.12.2024", "exchangeRate": [{"currency": "USD", "saleRateNB": 39.5}]}"#;
        let err = parse_archive(body, &filter(&["USD"])).unwrap_err();
        assert!(err.to_string().contains("USD"));
    }

    #[test]
    fn test_missing_rate_on_ignored_currency_is_fine() {
        let body = r#"{"date": "01.12.2024", "exchangeRate": [
            {"currency": "XAU"},
            {"currency": "USD", "saleRateNB": 39.5, "purchaseRateNB": 39.0}
        ]}"#;
        let entry = parse_archive(body, &filter(&["USD"])).unwrap().unwrap();
        assert_eq!(entry.rates.len(), 1);
    }

    #[test]
    fn test_transform_keeps_order_and_drops_empty() {
        let bodies = vec![
            r#"{"date": "03.12.2024", "exchangeRate": [{"currency": "USD", "saleRateNB": 3.0, "purchaseRateNB": 3.0}]}"#,
            r#"{"date": "02.12.2024"}"#,
            r#"{"date": "01.12.2024", "exchangeRate": [{"currency": "USD", "saleRateNB": 1.0, "purchaseRateNB": 1.0}]}"#,
        ];

        let history = transform(&bodies, &filter(&["USD"])).unwrap();

        let dates: Vec<_> = history.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["03.12.2024", "01.12.2024"]);
    }

    #[test]
    fn test_transform_fails_on_any_bad_body() {
        let bodies = vec![MIXED_RESPONSE, "not json"];
        assert!(transform(&bodies, &filter(&["USD"])).is_err());
    }
}
