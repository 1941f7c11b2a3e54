//! Coin catalog storage
//!
//! This module provides the CoinCatalog component holding the static set of
//! payout coins. The catalog is seeded once at startup and is effectively
//! read-only afterwards.
//!
//! # Seeding
//!
//! `seed_if_empty` only inserts when the catalog holds no coins at all, and
//! coins are keyed by symbol, so repeated seeding can never produce
//! duplicate rows.

use crate::types::Coin;
use std::collections::HashMap;

/// Catalog of payout coins keyed by symbol
pub struct CoinCatalog {
    /// Map of coin symbol to coin data
    coins: HashMap<String, Coin>,
}

impl CoinCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        CoinCatalog {
            coins: HashMap::new(),
        }
    }

    /// Seed the catalog with defaults if it is currently empty
    ///
    /// A no-op when any coin is already present. Returns the number of
    /// coins inserted.
    pub fn seed_if_empty(&mut self, defaults: Vec<Coin>) -> usize {
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
    pub fn get(&self, symbol: &str) -> Option<&Coin> {
        self.coins.get(symbol)
    }

    /// All coins currently offered for withdrawal
    ///
    /// Sorted by symbol for deterministic listings; callers are free to
    /// re-sort for presentation.
    pub fn list_active(&self) -> Vec<Coin> {
        let mut coins: Vec<Coin> = self
            .coins
            .values()
            .filter(|coin| coin.is_active)
            .cloned()
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

impl Default for CoinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::default_coins;

    #[test]
    fn test_new_catalog_is_empty() {
        let catalog = CoinCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.list_active().len(), 0);
    }

    #[test]
    fn test_seed_if_empty_inserts_defaults() {
        let mut catalog = CoinCatalog::new();

        let inserted = catalog.seed_if_empty(default_coins());

        assert_eq!(inserted, 6);
        assert_eq!(catalog.len(), 6);
        assert!(catalog.get("BTC").is_some());
        assert!(catalog.get("LTC").is_some());
    }

    #[test]
    fn test_seed_if_empty_twice_does_not_duplicate() {
        let mut catalog = CoinCatalog::new();

        catalog.seed_if_empty(default_coins());
        let size_after_first = catalog.len();

        let inserted = catalog.seed_if_empty(default_coins());

        assert_eq!(inserted, 0);
        assert_eq!(catalog.len(), size_after_first);
    }

    #[test]
    fn test_get_unknown_symbol_returns_none() {
        let mut catalog = CoinCatalog::new();
        catalog.seed_if_empty(default_coins());

        assert!(catalog.get("XYZ").is_none());
    }

    #[test]
    fn test_list_active_excludes_inactive_coins() {
        let mut catalog = CoinCatalog::new();
        let mut coins = default_coins();
        coins[0].is_active = false;
        let disabled = coins[0].symbol.clone();

        catalog.seed_if_empty(coins);

        let active = catalog.list_active();
        assert_eq!(active.len(), 5);
        assert!(active.iter().all(|c| c.symbol != disabled));
    }

    #[test]
    fn test_list_active_sorted_by_symbol() {
        let mut catalog = CoinCatalog::new();
        catalog.seed_if_empty(default_coins());

        let symbols: Vec<String> = catalog
            .list_active()
            .into_iter()
            .map(|c| c.symbol)
            .collect();
        let mut sorted = symbols.clone();
        sorted.sort();
        assert_eq!(symbols, sorted);
    }
}
