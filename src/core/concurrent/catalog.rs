//! Thread-safe coin catalog
//!
//! Concurrent counterpart of the synchronous catalog. Coins are keyed by
//! symbol in a `DashMap`, so seeding is duplicate-free by construction
//! even when several startup paths race on it.

use crate::types::Coin;
use dashmap::DashMap;

/// Thread-safe catalog of payout coins keyed by symbol
#[derive(Debug)]
pub struct ConcurrentCoinCatalog {
    /// Concurrent map of coin symbol to coin data
    coins: DashMap<String, Coin>,
}

impl ConcurrentCoinCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            coins: DashMap::new(),
        }
    }

    /// Seed the catalog with defaults if it is currently empty
    ///
    /// A no-op when any coin is already present. Racing seeders can at
    /// worst both pass the emptiness check; the per-symbol entry insert
    /// still keeps every symbol unique. Returns the number of coins this
    /// call inserted.
    pub fn seed_if_empty(&self, defaults: Vec<Coin>) -> usize {
        if !self.coins.is_empty() {
            return 0;
        }

        let mut inserted = 0;
        for coin in defaults {
            self.coins.entry(coin.symbol.clone()).or_insert_with(|| {
                inserted += 1;
                coin
            });
        }
        inserted
    }

    /// Look up a coin by symbol
    pub fn get(&self, symbol: &str) -> Option<Coin> {
        self.coins.get(symbol).map(|entry| entry.value().clone())
    }

    /// All coins currently offered for withdrawal, sorted by symbol
    pub fn list_active(&self) -> Vec<Coin> {
        let mut coins: Vec<Coin> = self
            .coins
            .iter()
            .filter(|entry| entry.value().is_active)
            .map(|entry| entry.value().clone())
            .collect();
        coins.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        coins
    }

    /// Number of coins in the catalog
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// Whether the catalog has been seeded yet
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}

impl Default for ConcurrentCoinCatalog {
    fn default() -> Self {
        Self::new()
    }
}
