use std::collections::HashMap;
use std::time::{Duration, Instant};

/// In-memory rate cache with a fixed time-to-live per base currency.
/// Expired entries simply stop being returned; they are overwritten by the
/// next successful fetch.
#[derive(Debug)]
pub struct RateCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

#[derive(Debug)]
struct CacheEntry {
    rates: HashMap<String, f64>,
    stored_at: Instant,
}

impl RateCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Cache key from a base currency code
    fn key(base: &str) -> String {
        base.trim().to_uppercase()
    }

    /// Get the rates for a base currency, or None when absent or expired
    pub fn get(&self, base: &str) -> Option<&HashMap<String, f64>> {
        self.entries
            .get(&Self::key(base))
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| &entry.rates)
    }

    /// Insert (or replace) the rates for a base currency
    pub fn insert(&mut self, base: &str, rates: HashMap<String, f64>) {
        self.entries.insert(
            Self::key(base),
            CacheEntry {
                rates,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every cached entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached base currencies, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
