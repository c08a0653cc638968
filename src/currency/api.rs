//! Exchange-rate endpoints and response parsing.
//!
//! Rate documents come from a CDN-hosted JSON API. The payload for a base
//! currency looks like `{"date": "2024-01-15", "usd": {"eur": 0.92, ...}}`:
//! one metadata key plus one map keyed by the lowercase base code.

use crate::error::{AppError, AppResult};
use std::collections::HashMap;
use std::time::Duration;

/// Primary rate source
pub const PRIMARY_API: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies";

/// Static mirror used when the primary source is unreachable
pub const FALLBACK_API: &str = "https://latest.currency-api.pages.dev/v1/currencies";

/// Per-request timeout for rate fetches
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the rate document for `base` from one endpoint and extracts the
/// rates map, with codes uppercased.
pub(crate) async fn fetch_rates_from(
    client: &reqwest::Client,
    endpoint: &str,
    base: &str,
) -> AppResult<HashMap<String, f64>> {
    let url = format!("{}/{}.json", endpoint, base.to_lowercase());
    log::debug!("Fetching exchange rates: {}", url);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(AppError::HttpStatus(response.status()));
    }

    let document: HashMap<String, serde_json::Value> = response.json().await?;
    parse_rates(&document, base)
}

/// Extracts the first non-`date` object in the document as the rates map.
pub(crate) fn parse_rates(
    document: &HashMap<String, serde_json::Value>,
    base: &str,
) -> AppResult<HashMap<String, f64>> {
    for (key, value) in document {
        if key == "date" {
            continue;
        }
        if let serde_json::Value::Object(map) = value {
            let rates: HashMap<String, f64> = map
                .iter()
                .filter_map(|(code, rate)| rate.as_f64().map(|r| (code.to_uppercase(), r)))
                .collect();
            if !rates.is_empty() {
                return Ok(rates);
            }
        }
    }
    Err(AppError::EmptyRates(base.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_document(value: serde_json::Value) -> HashMap<String, serde_json::Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn parse_extracts_and_uppercases_rates() {
        let document = as_document(json!({
            "date": "2024-01-15",
            "usd": { "eur": 0.92, "gbp": 0.79, "jpy": 148.3 }
        }));

        let rates = parse_rates(&document, "usd").unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates.get("EUR"), Some(&0.92));
        assert_eq!(rates.get("JPY"), Some(&148.3));
    }

    #[test]
    fn parse_skips_non_numeric_entries() {
        let document = as_document(json!({
            "usd": { "eur": 0.92, "note": "not a rate" }
        }));

        let rates = parse_rates(&document, "usd").unwrap();
        assert_eq!(rates.len(), 1);
        assert!(rates.contains_key("EUR"));
    }

    #[test]
    fn parse_rejects_document_without_rates_map() {
        let document = as_document(json!({ "date": "2024-01-15" }));

        match parse_rates(&document, "usd") {
            Err(AppError::EmptyRates(base)) => assert_eq!(base, "USD"),
            other => panic!("Expected EmptyRates, got: {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_empty_rates_map() {
        let document = as_document(json!({ "date": "2024-01-15", "usd": {} }));
        assert!(parse_rates(&document, "usd").is_err());
    }
}
