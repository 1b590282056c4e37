//! Caching layer for airport lookups.
//!
//! Airport records are immutable once read from the lookup source, so a
//! read-through cache in front of a slow source (e.g. a database-backed
//! lookup) is transparent to consumers. Departure matches are keyed by
//! the search text, arrival boards by the departure code.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::{AirportRef, IataCode};
use crate::lookup::{AirportLookup, LookupError};

/// Configuration for the lookup cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 1000,
        }
    }
}

/// Airport lookup with caching.
///
/// Wraps any [`AirportLookup`] and caches match and resolve results.
/// Errors are never cached; a failed call is retried on the next request.
pub struct CachedAirportLookup {
    inner: Arc<dyn AirportLookup>,

    /// Departure matches, keyed by search text.
    departures: MokaCache<String, Arc<Vec<AirportRef>>>,

    /// Arrival boards, keyed by departure code.
    arrivals: MokaCache<IataCode, Arc<Vec<AirportRef>>>,

    /// Exact resolutions, including negative results.
    resolved: MokaCache<IataCode, Option<AirportRef>>,
}

impl CachedAirportLookup {
    /// Create a new cached lookup.
    pub fn new(inner: Arc<dyn AirportLookup>, config: &CacheConfig) -> Self {
        fn build<K, V>(config: &CacheConfig) -> MokaCache<K, V>
        where
            K: std::hash::Hash + Eq + Send + Sync + 'static,
            V: Clone + Send + Sync + 'static,
        {
            MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build()
        }

        Self {
            inner,
            departures: build(config),
            arrivals: build(config),
            resolved: build(config),
        }
    }

    /// Total number of cached entries across all caches.
    pub fn entry_count(&self) -> u64 {
        self.departures.entry_count() + self.arrivals.entry_count() + self.resolved.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.departures.invalidate_all();
        self.arrivals.invalidate_all();
        self.resolved.invalidate_all();
    }
}

#[async_trait]
impl AirportLookup for CachedAirportLookup {
    async fn match_departures(&self, text: &str) -> Result<Vec<AirportRef>, LookupError> {
        if let Some(cached) = self.departures.get(text).await {
            return Ok((*cached).clone());
        }

        let matches = self.inner.match_departures(text).await?;
        self.departures
            .insert(text.to_string(), Arc::new(matches.clone()))
            .await;

        Ok(matches)
    }

    async fn match_arrivals(&self, departure: &AirportRef) -> Result<Vec<AirportRef>, LookupError> {
        if let Some(cached) = self.arrivals.get(&departure.code).await {
            return Ok((*cached).clone());
        }

        let board = self.inner.match_arrivals(departure).await?;
        self.arrivals
            .insert(departure.code, Arc::new(board.clone()))
            .await;

        Ok(board)
    }

    async fn resolve(&self, code: &IataCode) -> Result<Option<AirportRef>, LookupError> {
        if let Some(cached) = self.resolved.get(code).await {
            return Ok(cached);
        }

        let airport = self.inner.resolve(code).await?;
        self.resolved.insert(*code, airport.clone()).await;

        Ok(airport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{AirportDirectory, AirportRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Lookup that counts calls reaching the underlying source.
    struct CountingLookup {
        inner: AirportDirectory,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AirportLookup for CountingLookup {
        async fn match_departures(&self, text: &str) -> Result<Vec<AirportRef>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.match_departures(text).await
        }

        async fn match_arrivals(
            &self,
            departure: &AirportRef,
        ) -> Result<Vec<AirportRef>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.match_arrivals(departure).await
        }

        async fn resolve(&self, code: &IataCode) -> Result<Option<AirportRef>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.resolve(code).await
        }
    }

    fn counting_lookup() -> Arc<CountingLookup> {
        let inner = AirportDirectory::new(vec![
            AirportRecord {
                id: 1,
                iata_code: "LHR".to_string(),
                name: "Heathrow".to_string(),
                passengers: 80,
            },
            AirportRecord {
                id: 2,
                iata_code: "JFK".to_string(),
                name: "Kennedy".to_string(),
                passengers: 60,
            },
        ]);
        Arc::new(CountingLookup {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn repeated_departure_match_hits_cache() {
        let counting = counting_lookup();
        let cached = CachedAirportLookup::new(counting.clone(), &CacheConfig::default());

        let first = cached.match_departures("heath").await.unwrap();
        let second = cached.match_departures("heath").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn negative_resolve_is_cached() {
        let counting = counting_lookup();
        let cached = CachedAirportLookup::new(counting.clone(), &CacheConfig::default());
        let code = IataCode::parse("XXX").unwrap();

        assert!(cached.resolve(&code).await.unwrap().is_none());
        assert!(cached.resolve(&code).await.unwrap().is_none());
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_all_clears_caches() {
        let counting = counting_lookup();
        let cached = CachedAirportLookup::new(counting.clone(), &CacheConfig::default());

        cached.match_departures("heath").await.unwrap();
        cached.invalidate_all();
        cached.match_departures("heath").await.unwrap();

        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 1000);
    }
}
