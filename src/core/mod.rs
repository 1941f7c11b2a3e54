//! Core business logic module
//!
//! This module contains the core reward-processing components:
//! - `ledger` - Account state management and balance operations
//! - `catalog` - Coin reference data and idempotent seeding
//! - `withdrawal_store` - Append-only withdrawal request log
//! - `engine` - Reward and withdrawal orchestration
//! - `traits` - Injected cache and payout capabilities
//! - `concurrent` - Thread-safe implementations

use rust_decimal::Decimal;

pub mod catalog;
pub mod concurrent;
pub mod engine;
pub mod ledger;
pub mod traits;
pub mod withdrawal_store;

pub use catalog::CoinCatalog;
pub use concurrent::{
    BatchProcessor, ConcurrentAccountLedger, ConcurrentCoinCatalog, ConcurrentMiningEngine,
    ConcurrentWithdrawalStore,
};
pub use engine::MiningEngine;
pub use ledger::AccountLedger;
pub use traits::{CacheInvalidator, NoopCache, PayoutProvider, UnconfiguredPayout};
pub use withdrawal_store::WithdrawalStore;

/// Points granted by a manual collect
pub const COLLECT_REWARD_POINTS: i64 = 10;

/// Points granted for a watched ad
pub const AD_REWARD_POINTS: i64 = 50;

/// Default number of records returned by a history query
pub const HISTORY_DEFAULT_LIMIT: usize = 20;

/// Hard cap on records returned by a history query
pub const HISTORY_MAX_LIMIT: usize = 100;

/// The collect reward as a decimal amount
pub fn collect_reward() -> Decimal {
    Decimal::new(COLLECT_REWARD_POINTS, 0)
}

/// The ad reward as a decimal amount
pub fn ad_reward() -> Decimal {
    Decimal::new(AD_REWARD_POINTS, 0)
}
