//! Coin catalog types for the Mining Rewards Engine
//!
//! Coins are static reference data: each entry names a payout currency
//! together with its withdrawal bounds. The catalog is read-only at
//! request time and seeded once when empty.

use crate::types::error::MiningError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payout currency users can withdraw points into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    /// Unique ticker symbol, e.g. `BTC`
    pub symbol: String,

    /// Human-readable display name
    pub name: String,

    /// Smallest withdrawable amount in points
    pub min_withdrawal: Decimal,

    /// Largest withdrawable amount in points
    pub max_withdrawal: Decimal,

    /// Icon shown next to the coin in the client
    pub icon_url: String,

    /// Whether the coin is currently offered for withdrawal
    pub is_active: bool,
}

impl Coin {
    /// Check a requested withdrawal amount against this coin's bounds
    ///
    /// # Errors
    ///
    /// Returns `MiningError::AmountOutOfRange` when the amount falls
    /// outside `[min_withdrawal, max_withdrawal]`.
    pub fn validate_amount(&self, amount: Decimal) -> Result<(), MiningError> {
        if amount < self.min_withdrawal || amount > self.max_withdrawal {
            return Err(MiningError::amount_out_of_range(
                &self.symbol,
                amount,
                self.min_withdrawal,
                self.max_withdrawal,
            ));
        }
        Ok(())
    }
}

/// The default coin set used to seed an empty catalog
///
/// Mirrors the production offering: six coins, each withdrawable
/// between 100 and 10000 points.
pub fn default_coins() -> Vec<Coin> {
    let bounds = (Decimal::new(100, 0), Decimal::new(10000, 0));

    let entries = [
        ("BTC", "Bitcoin", "https://cryptologos.cc/logos/bitcoin-btc-logo.png"),
        ("TRX", "Tron", "https://cryptologos.cc/logos/tron-trx-logo.png"),
        ("USDT", "Tether", "https://cryptologos.cc/logos/tether-usdt-logo.png"),
        ("TON", "TON", "https://cryptologos.cc/logos/toncoin-ton-logo.png"),
        ("DOGE", "Dogecoin", "https://cryptologos.cc/logos/dogecoin-doge-logo.png"),
        ("LTC", "Litecoin", "https://cryptologos.cc/logos/litecoin-ltc-logo.png"),
    ];

    entries
        .iter()
        .map(|(symbol, name, icon_url)| Coin {
            symbol: symbol.to_string(),
            name: name.to_string(),
            min_withdrawal: bounds.0,
            max_withdrawal: bounds.1,
            icon_url: icon_url.to_string(),
            is_active: true,
        })
        .collect()
}
