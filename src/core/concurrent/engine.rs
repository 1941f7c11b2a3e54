//! Concurrent reward and withdrawal orchestration
//!
//! This module provides the `ConcurrentMiningEngine`, which coordinates the
//! thread-safe ledger, catalog, and withdrawal store so requests from many
//! users can be served in parallel.
//!
//! # Architecture
//!
//! ```text
//! ConcurrentMiningEngine
//!     ├── Arc<ConcurrentAccountLedger>    (thread-safe account state)
//!     ├── Arc<ConcurrentCoinCatalog>      (thread-safe coin reference data)
//!     ├── Arc<ConcurrentWithdrawalStore>  (thread-safe request log)
//!     ├── Arc<dyn CacheInvalidator>       (injected cache hook)
//!     └── Arc<dyn PayoutProvider>         (injected payout integration)
//! ```
//!
//! # Thread Safety
//!
//! The engine is cheap to clone and safe to share across tasks. Balance
//! mutations run under the account's entry lock, so two concurrent
//! withdrawals from the same account cannot both pass the balance check.

use std::sync::Arc;

use crate::core::concurrent::{
    ConcurrentAccountLedger, ConcurrentCoinCatalog, ConcurrentWithdrawalStore,
};
use crate::core::traits::{CacheInvalidator, NoopCache, PayoutProvider, UnconfiguredPayout};
use crate::core::{ad_reward, collect_reward, HISTORY_DEFAULT_LIMIT, HISTORY_MAX_LIMIT};
use crate::types::{
    default_coins, is_valid_email, Account, AccountStatus, Coin, MiningError, OperationRecord,
    OperationType, RewardOutcome, UserId, Withdrawal, WithdrawalRequest,
};
use rust_decimal::Decimal;

/// Thread-safe rewards engine
#[derive(Clone)]
pub struct ConcurrentMiningEngine {
    /// Thread-safe account state ledger
    ledger: Arc<ConcurrentAccountLedger>,

    /// Thread-safe coin catalog
    catalog: Arc<ConcurrentCoinCatalog>,

    /// Thread-safe withdrawal request log
    withdrawals: Arc<ConcurrentWithdrawalStore>,

    /// Cache invalidation hook, called after every balance mutation
    cache: Arc<dyn CacheInvalidator>,

    /// Payout platform integration used by the operator flow
    payout: Arc<dyn PayoutProvider>,
}

impl ConcurrentMiningEngine {
    /// Create a new engine over the given stores
    ///
    /// Uses the no-op cache and the unconfigured payout provider.
    pub fn new(
        ledger: Arc<ConcurrentAccountLedger>,
        catalog: Arc<ConcurrentCoinCatalog>,
        withdrawals: Arc<ConcurrentWithdrawalStore>,
    ) -> Self {
        Self::with_capabilities(
            ledger,
            catalog,
            withdrawals,
            Arc::new(NoopCache),
            Arc::new(UnconfiguredPayout),
        )
    }

    /// Create a new engine with explicit cache and payout capabilities
    pub fn with_capabilities(
        ledger: Arc<ConcurrentAccountLedger>,
        catalog: Arc<ConcurrentCoinCatalog>,
        withdrawals: Arc<ConcurrentWithdrawalStore>,
        cache: Arc<dyn CacheInvalidator>,
        payout: Arc<dyn PayoutProvider>,
    ) -> Self {
        Self {
            ledger,
            catalog,
            withdrawals,
            cache,
            payout,
        }
    }

    /// Seed the coin catalog with the default set if it is empty
    pub fn seed_coins(&self) -> usize {
        self.catalog.seed_if_empty(default_coins())
    }

    /// Provision an account for the identity, or return the existing one
    pub fn login(&self, identity: UserId, name: Option<&str>) -> Account {
        self.ledger.get_or_create(identity, name)
    }

    /// Current balance for an identity
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` if no account exists for the identity.
    pub fn mining_status(&self, identity: UserId) -> Result<Decimal, MiningError> {
        self.ledger
            .get(identity)
            .map(|account| account.balance)
            .ok_or_else(|| MiningError::unknown_account(identity))
    }

    /// Collect the fixed mining reward
    pub fn collect(&self, identity: UserId) -> Result<RewardOutcome, MiningError> {
        self.grant_reward(identity, collect_reward(), "collect")
    }

    /// Claim the fixed bonus for a watched ad
    pub fn watch_ad(&self, identity: UserId) -> Result<RewardOutcome, MiningError> {
        self.grant_reward(identity, ad_reward(), "ad")
    }

    /// Credit a fixed reward to an existing, active account
    ///
    /// The status check and the credit run inside the account's entry
    /// lock, so a ban applied concurrently is never overwritten by a
    /// racing reward.
    fn grant_reward(
        &self,
        identity: UserId,
        reward: Decimal,
        operation: &str,
    ) -> Result<RewardOutcome, MiningError> {
        let mut new_balance = Decimal::ZERO;
        self.ledger.update(identity, |account| {
            if account.status != AccountStatus::Active {
                return Err(MiningError::account_banned(identity));
            }
            account.balance = account
                .balance
                .checked_add(reward)
                .ok_or_else(|| MiningError::arithmetic_overflow(operation, identity))?;
            new_balance = account.balance;
            Ok(())
        })?;
        self.cache.invalidate(identity);

        Ok(RewardOutcome {
            reward,
            new_balance,
        })
    }

    /// All coins currently offered for withdrawal
    pub fn list_coins(&self) -> Vec<Coin> {
        self.catalog.list_active()
    }

    /// Validate and execute a withdrawal request
    ///
    /// Validation mirrors the single-threaded engine. The final balance
    /// check and debit run under the account's entry lock: of two
    /// concurrent requests that each pass the early validation against the
    /// same balance, only the first to take the lock can debit; the second
    /// re-checks and fails with insufficient balance.
    pub fn request_withdrawal(
        &self,
        identity: UserId,
        request: &WithdrawalRequest,
    ) -> Result<Withdrawal, MiningError> {
        let account = self
            .ledger
            .get(identity)
            .ok_or_else(|| MiningError::unknown_account(identity))?;
        if account.status != AccountStatus::Active {
            return Err(MiningError::account_banned(identity));
        }

        let coin = self
            .catalog
            .get(&request.coin)
            .ok_or_else(|| MiningError::unknown_coin(&request.coin))?;
        if !coin.is_active {
            return Err(MiningError::coin_inactive(&coin.symbol));
        }

        if request.amount <= Decimal::ZERO {
            return Err(MiningError::invalid_amount(request.amount));
        }
        if !is_valid_email(&request.email) {
            return Err(MiningError::invalid_email(&request.email));
        }
        coin.validate_amount(request.amount)?;

        let amount = request.amount;

        // Re-check the balance under the entry lock before debiting; the
        // snapshot above may be stale by now
        self.ledger.update(identity, |account| {
            if account.status != AccountStatus::Active {
                return Err(MiningError::account_banned(identity));
            }
            if account.balance < amount {
                return Err(MiningError::insufficient_balance(
                    identity,
                    account.balance,
                    amount,
                ));
            }
            account.balance = account
                .balance
                .checked_sub(amount)
                .ok_or_else(|| MiningError::arithmetic_overflow("withdrawal", identity))?;
            account.email = request.email.clone();
            Ok(())
        })?;

        let withdrawal = self
            .withdrawals
            .append(identity, &coin.symbol, amount, &request.email);
        self.cache.invalidate(identity);

        Ok(withdrawal)
    }

    /// An identity's withdrawal history, most recent first
    ///
    /// The limit defaults to 20 records and is clamped to 100.
    pub fn withdrawal_history(&self, identity: UserId, limit: Option<usize>) -> Vec<Withdrawal> {
        let limit = limit.unwrap_or(HISTORY_DEFAULT_LIMIT).min(HISTORY_MAX_LIMIT);
        self.withdrawals.history(identity, limit)
    }

    /// Hand a withdrawal to the configured payout provider
    pub fn submit_payout(&self, withdrawal: &Withdrawal) -> Result<String, MiningError> {
        self.payout.submit(withdrawal)
    }

    /// Apply a replayed operation record
    pub fn apply(&self, record: OperationRecord) -> Result<(), MiningError> {
        let identity = record.identity;
        match record.op {
            OperationType::Login => {
                self.login(identity, record.name.as_deref());
                Ok(())
            }
            OperationType::Collect => self.collect(identity).map(|_| ()),
            OperationType::WatchAd => self.watch_ad(identity).map(|_| ()),
            OperationType::Withdraw => {
                let coin = record
                    .coin
                    .ok_or_else(|| MiningError::missing_field("withdraw", "coin", identity))?;
                let amount = record
                    .amount
                    .ok_or_else(|| MiningError::missing_field("withdraw", "amount", identity))?;
                let email = record
                    .email
                    .ok_or_else(|| MiningError::missing_field("withdraw", "email", identity))?;

                self.request_withdrawal(
                    identity,
                    &WithdrawalRequest {
                        coin,
                        amount,
                        email,
                    },
                )
                .map(|_| ())
            }
        }
    }

    /// Snapshots of all accounts
    pub fn get_all_accounts(&self) -> Vec<Account> {
        self.ledger.get_all_accounts()
    }
}
