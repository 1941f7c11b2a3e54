//! Withdrawal record storage
//!
//! This module provides the WithdrawalStore component, an append-only log
//! of withdrawal requests. Records are created in `Pending` status; status
//! transitions belong to a separate operator flow and only ever touch the
//! status and updated timestamps.
//!
//! # Ordering
//!
//! Record ids are serial, so id order and creation order agree. History
//! listings are returned most-recent-first by walking ids downwards.

use crate::types::{
    UserId, Withdrawal, WithdrawalId, WithdrawalStatus, DEFAULT_PLATFORM,
};
use chrono::Utc;
use rust_decimal::Decimal;

/// Append-only store of withdrawal requests
pub struct WithdrawalStore {
    /// All withdrawal records in creation order
    withdrawals: Vec<Withdrawal>,

    /// Next serial id to assign
    next_id: WithdrawalId,
}

impl WithdrawalStore {
    /// Create a new empty store
    pub fn new() -> Self {
        WithdrawalStore {
            withdrawals: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a new pending withdrawal and return the created record
    ///
    /// Assigns the next serial id and stamps both timestamps with the
    /// current time.
    pub fn append(
        &mut self,
        identity: UserId,
        coin: &str,
        amount: Decimal,
        email: &str,
    ) -> Withdrawal {
        let now = Utc::now();
        let withdrawal = Withdrawal {
            id: self.next_id,
            identity,
            coin: coin.to_string(),
            amount,
            platform: DEFAULT_PLATFORM.to_string(),
            email: email.to_string(),
            status: WithdrawalStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.withdrawals.push(withdrawal.clone());
        withdrawal
    }

    /// Get a withdrawal by id
    pub fn get(&self, id: WithdrawalId) -> Option<&Withdrawal> {
        self.withdrawals.iter().find(|w| w.id == id)
    }

    /// An identity's withdrawals, most recent first
    ///
    /// Returns at most `limit` records.
    pub fn history(&self, identity: UserId, limit: usize) -> Vec<Withdrawal> {
        self.withdrawals
            .iter()
            .rev()
            .filter(|w| w.identity == identity)
            .take(limit)
            .cloned()
            .collect()
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

impl Default for WithdrawalStore {
    fn default() -> Self {
        Self::new()
    }
}
