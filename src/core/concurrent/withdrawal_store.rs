//! Thread-safe withdrawal record storage
//!
//! Concurrent counterpart of the synchronous store. Ids come from an
//! atomic counter, so records created from different threads still get
//! unique serial ids, and id order remains creation order.

use crate::types::{
    UserId, Withdrawal, WithdrawalId, WithdrawalStatus, DEFAULT_PLATFORM,
};
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe append-only store of withdrawal requests
#[derive(Debug)]
pub struct ConcurrentWithdrawalStore {
    /// Concurrent map of record id to withdrawal
    withdrawals: DashMap<WithdrawalId, Withdrawal>,

    /// Next serial id to assign
    next_id: AtomicU64,
}

impl ConcurrentWithdrawalStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            withdrawals: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append a new pending withdrawal and return the created record
    pub fn append(
        &self,
        identity: UserId,
        coin: &str,
        amount: Decimal,
        email: &str,
    ) -> Withdrawal {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let withdrawal = Withdrawal {
            id,
            identity,
            coin: coin.to_string(),
            amount,
            platform: DEFAULT_PLATFORM.to_string(),
            email: email.to_string(),
            status: WithdrawalStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.withdrawals.insert(id, withdrawal.clone());
        withdrawal
    }

    /// Get a withdrawal by id
    pub fn get(&self, id: WithdrawalId) -> Option<Withdrawal> {
        self.withdrawals.get(&id).map(|entry| entry.value().clone())
    }

    /// An identity's withdrawals, most recent first
    ///
    /// Ids are monotonic, so descending id order is creation order
    /// newest-first. Returns at most `limit` records.
    pub fn history(&self, identity: UserId, limit: usize) -> Vec<Withdrawal> {
        let mut records: Vec<Withdrawal> = self
            .withdrawals
            .iter()
            .filter(|entry| entry.value().identity == identity)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records.truncate(limit);
        records
    }

    /// Total number of stored records
    pub fn len(&self) -> usize {
        self.withdrawals.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.withdrawals.is_empty()
    }
}

impl Default for ConcurrentWithdrawalStore {
    fn default() -> Self {
        Self::new()
    }
}
