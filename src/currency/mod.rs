//! Currency conversion backed by a public exchange-rate API.
//!
//! Rates are fetched per base currency, primary endpoint first with a
//! static-mirror fallback, and cached in memory for thirty minutes behind a
//! read-write lock. Conversions between the same currency never touch the
//! network.

mod api;
mod cache;

pub use api::{FALLBACK_API, PRIMARY_API};
pub use cache::RateCache;

use crate::error::{AppError, AppResult};
use crate::models::{Conversion, CurrencyInfo, RatesSnapshot};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

/// How long a fetched rate document stays valid
pub const RATES_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Currencies offered in the conversion selectors
pub const SUPPORTED_CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "BRL", symbol: "R$", name: "Brazilian Real" },
    CurrencyInfo { code: "USD", symbol: "$", name: "US Dollar" },
    CurrencyInfo { code: "EUR", symbol: "€", name: "Euro" },
    CurrencyInfo { code: "GBP", symbol: "£", name: "British Pound" },
    CurrencyInfo { code: "JPY", symbol: "¥", name: "Japanese Yen" },
    CurrencyInfo { code: "CAD", symbol: "C$", name: "Canadian Dollar" },
    CurrencyInfo { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    CurrencyInfo { code: "CHF", symbol: "CHF", name: "Swiss Franc" },
    CurrencyInfo { code: "CNY", symbol: "¥", name: "Chinese Yuan" },
    CurrencyInfo { code: "INR", symbol: "₹", name: "Indian Rupee" },
];

/// Client for the exchange-rate API with an expiring in-memory cache.
pub struct CurrencyService {
    client: reqwest::Client,
    endpoints: Vec<String>,
    cache: RwLock<RateCache>,
}

impl CurrencyService {
    /// Creates a service against the production endpoints.
    pub fn new() -> Self {
        Self::with_endpoints(
            vec![PRIMARY_API.to_string(), FALLBACK_API.to_string()],
            RATES_CACHE_TTL,
        )
    }

    /// Creates a service against explicit endpoints — used in tests to point
    /// at a mock server and to shrink the cache TTL.
    pub fn with_endpoints(endpoints: Vec<String>, cache_ttl: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(api::HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });
        Self {
            client,
            endpoints,
            cache: RwLock::new(RateCache::new(cache_ttl)),
        }
    }

    /// The static table of currencies offered in the UI. Conversion itself
    /// accepts any code the rate API knows.
    pub fn supported_currencies() -> &'static [CurrencyInfo] {
        SUPPORTED_CURRENCIES
    }

    /// Converts `amount` between two currency codes (case insensitive).
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> AppResult<Conversion> {
        if amount < 0.0 {
            return Err(AppError::InvalidAmount(amount));
        }
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();

        let rate = if from == to {
            1.0
        } else {
            let rates = self.rates(&from).await?;
            *rates.get(&to).ok_or_else(|| AppError::RateNotFound {
                from: from.clone(),
                to: to.clone(),
            })?
        };

        log::debug!("Converting {} {} -> {} at rate {}", amount, from, to, rate);
        Ok(Conversion {
            amount,
            converted_amount: amount * rate,
            exchange_rate: rate,
            from_currency: from,
            to_currency: to,
            conversion_date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    /// Returns the full rates snapshot for a base currency.
    pub async fn rates_for(&self, base: &str) -> AppResult<RatesSnapshot> {
        let base = base.trim().to_uppercase();
        let rates = self.rates(&base).await?;
        Ok(RatesSnapshot {
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            base,
            rates,
        })
    }

    /// Drops every cached rate document.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        log::info!("Exchange rate cache cleared");
    }

    /// Rates for a base currency, from cache when fresh, otherwise fetched
    /// and cached.
    async fn rates(&self, base: &str) -> AppResult<HashMap<String, f64>> {
        {
            let cache = self.cache.read().await;
            if let Some(rates) = cache.get(base) {
                log::debug!("Rate cache hit for {}", base);
                return Ok(rates.clone());
            }
        }

        let fetched = self.fetch_rates(base).await?;
        self.cache.write().await.insert(base, fetched.clone());
        Ok(fetched)
    }

    /// Tries each endpoint in order and returns the first successful rates
    /// map, or the last error when every endpoint fails.
    async fn fetch_rates(&self, base: &str) -> AppResult<HashMap<String, f64>> {
        let mut last_err = AppError::EmptyRates(base.to_uppercase());
        for endpoint in &self.endpoints {
            match api::fetch_rates_from(&self.client, endpoint, base).await {
                Ok(rates) => {
                    log::debug!("Fetched {} rates for {} from {}", rates.len(), base, endpoint);
                    return Ok(rates);
                }
                Err(e) => {
                    log::warn!("Exchange rate fetch from {} failed: {}", endpoint, e);
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}
