//! Thread-safe account ledger for concurrent request processing
//!
//! This module provides the `ConcurrentAccountLedger` struct, which manages
//! account states using concurrent data structures so requests from many
//! users can be served in parallel.
//!
//! # Design
//!
//! The ledger uses `DashMap` (a concurrent HashMap) for fine-grained
//! per-account locking. Requests touching different accounts proceed in
//! parallel; mutations of the same account are serialized on its entry.
//!
//! # Balance consistency
//!
//! Every balance mutation runs inside `update`, which holds the account's
//! entry lock for the whole read-check-write sequence. The net effect is a
//! compare-and-set: two concurrent withdrawals cannot both observe the
//! same pre-debit balance, so the balance can never go negative and no
//! update is ever lost.

use crate::types::{Account, AccountStatus, MiningError, UserId};
use dashmap::DashMap;
use rust_decimal::Decimal;

/// Thread-safe account state ledger
///
/// All methods are safe to call from multiple threads concurrently. The
/// entry API doubles as the insert-if-absent primitive that guarantees at
/// most one account per identity even under concurrent first contact.
#[derive(Debug)]
pub struct ConcurrentAccountLedger {
    /// Concurrent map of identities to account states
    accounts: DashMap<UserId, Account>,
}

impl ConcurrentAccountLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Get or create an account for the identity
    ///
    /// If multiple threads race on the same unknown identity, exactly one
    /// creates the account and all observe it. Returns a snapshot of the
    /// account at the time of the call.
    pub fn get_or_create(&self, identity: UserId, name: Option<&str>) -> Account {
        self.accounts
            .entry(identity)
            .or_insert_with(|| Account::new(identity, name))
            .clone()
    }

    /// Get a snapshot of an account
    pub fn get(&self, identity: UserId) -> Option<Account> {
        self.accounts.get(&identity).map(|entry| entry.value().clone())
    }

    /// Check if an account is banned
    ///
    /// Unknown identities are not considered banned.
    pub fn is_banned(&self, identity: UserId) -> bool {
        self.accounts
            .get(&identity)
            .map(|account| account.status == AccountStatus::Banned)
            .unwrap_or(false)
    }

    /// Update an account using a closure
    ///
    /// The closure runs while the account's entry lock is held, so the
    /// read-check-write it performs is atomic with respect to every other
    /// mutation of the same account.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` if no account exists for the identity, or
    /// whatever error the closure returns.
    pub fn update<F>(&self, identity: UserId, f: F) -> Result<(), MiningError>
    where
        F: FnOnce(&mut Account) -> Result<(), MiningError>,
    {
        let mut entry = self
            .accounts
            .get_mut(&identity)
            .ok_or_else(|| MiningError::unknown_account(identity))?;
        f(entry.value_mut())
    }

    /// Credit points to an account and return the new balance
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` if no account exists for the identity, or
    /// `ArithmeticOverflow` if the credit would overflow.
    pub fn credit(
        &self,
        identity: UserId,
        amount: Decimal,
        operation: &str,
    ) -> Result<Decimal, MiningError> {
        let mut entry = self
            .accounts
            .get_mut(&identity)
            .ok_or_else(|| MiningError::unknown_account(identity))?;

        let account = entry.value_mut();
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| MiningError::arithmetic_overflow(operation, identity))?;
        Ok(account.balance)
    }

    /// Snapshots of all accounts
    ///
    /// Arbitrary order; callers sort when determinism matters.
    pub fn get_all_accounts(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of provisioned accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no accounts have been provisioned yet
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for ConcurrentAccountLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_get_or_create_creates_new_account() {
        let ledger = ConcurrentAccountLedger::new();

        let account = ledger.get_or_create(1001, Some("alice"));

        assert_eq!(account.identity, 1001);
        assert_eq!(account.name, "alice");
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.status, AccountStatus::Active);
    }

    #[test]
    fn test_get_or_create_returns_existing_account() {
        let ledger = ConcurrentAccountLedger::new();

        ledger.get_or_create(1001, Some("alice"));
        ledger.credit(1001, Decimal::new(10, 0), "collect").unwrap();

        let account = ledger.get_or_create(1001, Some("other"));
        assert_eq!(account.name, "alice");
        assert_eq!(account.balance, Decimal::new(10, 0));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_credit_unknown_account_fails() {
        let ledger = ConcurrentAccountLedger::new();

        let result = ledger.credit(1, Decimal::new(10, 0), "collect");
        assert!(matches!(
            result.unwrap_err(),
            MiningError::UnknownAccount { .. }
        ));
    }

    #[test]
    fn test_update_unknown_account_fails() {
        let ledger = ConcurrentAccountLedger::new();

        let result = ledger.update(1, |_account| Ok(()));
        assert!(matches!(
            result.unwrap_err(),
            MiningError::UnknownAccount { .. }
        ));
    }

    #[test]
    fn test_update_returns_error_from_closure() {
        let ledger = ConcurrentAccountLedger::new();
        ledger.get_or_create(1, None);

        let result = ledger.update(1, |_account| Err(MiningError::account_banned(1)));
        assert_eq!(result.unwrap_err(), MiningError::account_banned(1));
    }

    #[test]
    fn test_is_banned_reflects_status() {
        let ledger = ConcurrentAccountLedger::new();
        assert!(!ledger.is_banned(1));

        ledger.get_or_create(1, None);
        assert!(!ledger.is_banned(1));

        ledger
            .update(1, |account| {
                account.status = AccountStatus::Banned;
                Ok(())
            })
            .unwrap();
        assert!(ledger.is_banned(1));
    }

    #[test]
    fn test_concurrent_first_contact_creates_one_account() {
        let ledger = Arc::new(ConcurrentAccountLedger::new());
        let mut handles = vec![];

        // Ten threads race to provision the same identity
        for _ in 0..10 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                let account = ledger.get_or_create(1001, Some("alice"));
                assert_eq!(account.identity, 1001);
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_concurrent_credits_are_not_lost() {
        let ledger = Arc::new(ConcurrentAccountLedger::new());
        ledger.get_or_create(1, None);

        let mut handles = vec![];
        for _ in 0..100 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                ledger.credit(1, Decimal::new(10, 0), "collect").unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // 100 credits of 10: no update may be lost
        assert_eq!(ledger.get(1).unwrap().balance, Decimal::new(1000, 0));
    }

    #[test]
    fn test_concurrent_debits_never_overdraw() {
        let ledger = Arc::new(ConcurrentAccountLedger::new());
        ledger.get_or_create(1, None);
        ledger.credit(1, Decimal::new(100, 0), "seed").unwrap();

        let mut handles = vec![];
        // Twenty threads each try to debit 10; only ten can succeed
        for _ in 0..20 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                ledger.update(1, |account| {
                    let amount = Decimal::new(10, 0);
                    if account.balance < amount {
                        return Err(MiningError::insufficient_balance(
                            1,
                            account.balance,
                            amount,
                        ));
                    }
                    account.balance -= amount;
                    Ok(())
                })
            }));
        }

        let mut successful = 0;
        let mut failed = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(()) => successful += 1,
                Err(MiningError::InsufficientBalance { .. }) => failed += 1,
                Err(e) => panic!("unexpected error: {:?}", e),
            }
        }

        assert_eq!(successful, 10);
        assert_eq!(failed, 10);
        assert_eq!(ledger.get(1).unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_concurrent_operations_on_different_accounts() {
        let ledger = Arc::new(ConcurrentAccountLedger::new());

        let mut handles = vec![];
        for i in 0i64..10 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || {
                ledger.get_or_create(i, None);
                ledger
                    .credit(i, Decimal::new((i + 1) * 10, 0), "collect")
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0i64..10 {
            let account = ledger.get(i).unwrap();
            assert_eq!(account.balance, Decimal::new((i + 1) * 10, 0));
        }
    }
}
