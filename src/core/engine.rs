//! Reward and withdrawal orchestration
//!
//! This module provides the MiningEngine that coordinates the account
//! ledger, coin catalog, and withdrawal store.
//!
//! The engine enforces business rules such as:
//! - Reward actions require an existing, active account
//! - Withdrawals are validated against catalog bounds and balance
//! - A withdrawal debits the balance and appends a record as one unit

use crate::core::catalog::CoinCatalog;
use crate::core::ledger::AccountLedger;
use crate::core::traits::{CacheInvalidator, NoopCache, PayoutProvider, UnconfiguredPayout};
use crate::core::withdrawal_store::WithdrawalStore;
use crate::core::{ad_reward, collect_reward, HISTORY_DEFAULT_LIMIT, HISTORY_MAX_LIMIT};
use crate::types::{
    default_coins, is_valid_email, Account, AccountStatus, Coin, MiningError, OperationRecord,
    OperationType, RewardOutcome, UserId, Withdrawal, WithdrawalRequest,
};
use rust_decimal::Decimal;

/// Single-threaded rewards engine
///
/// Owns the ledger, catalog, and withdrawal store directly and takes
/// `&mut self` for every mutation, which makes each operation trivially
/// atomic. Suited to replaying an operation stream in order.
pub struct MiningEngine {
    ledger: AccountLedger,
    catalog: CoinCatalog,
    withdrawals: WithdrawalStore,
    cache: Box<dyn CacheInvalidator>,
    payout: Box<dyn PayoutProvider>,
}

impl MiningEngine {
    /// Create a new engine with no accounts and an unseeded catalog
    ///
    /// Uses the no-op cache and the unconfigured payout provider.
    pub fn new() -> Self {
        Self::with_capabilities(Box::new(NoopCache), Box::new(UnconfiguredPayout))
    }

    /// Create a new engine with explicit cache and payout capabilities
    pub fn with_capabilities(
        cache: Box<dyn CacheInvalidator>,
        payout: Box<dyn PayoutProvider>,
    ) -> Self {
        MiningEngine {
            ledger: AccountLedger::new(),
            catalog: CoinCatalog::new(),
            withdrawals: WithdrawalStore::new(),
            cache,
            payout,
        }
    }

    /// Seed the coin catalog with the default set if it is empty
    ///
    /// Returns the number of coins inserted (zero when already seeded).
    pub fn seed_coins(&mut self) -> usize {
        self.catalog.seed_if_empty(default_coins())
    }

    /// Provision an account for the identity, or return the existing one
    ///
    /// Creates the account with a zero balance, active status, and empty
    /// email on first contact. Repeated logins return the same account.
    pub fn login(&mut self, identity: UserId, name: Option<&str>) -> Account {
        self.ledger.get_or_create(identity, name).clone()
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
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` for unknown identities and `AccountBanned`
    /// for banned ones.
    pub fn collect(&mut self, identity: UserId) -> Result<RewardOutcome, MiningError> {
        self.grant_reward(identity, collect_reward(), "collect")
    }

    /// Claim the fixed bonus for a watched ad
    ///
    /// The simulated viewing delay is a client-side concern; by the time
    /// this operation arrives the ad counts as watched.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` for unknown identities and `AccountBanned`
    /// for banned ones.
    pub fn watch_ad(&mut self, identity: UserId) -> Result<RewardOutcome, MiningError> {
        self.grant_reward(identity, ad_reward(), "ad")
    }

    /// Credit a fixed reward to an existing, active account
    fn grant_reward(
        &mut self,
        identity: UserId,
        reward: Decimal,
        operation: &str,
    ) -> Result<RewardOutcome, MiningError> {
        let status = self
            .ledger
            .get(identity)
            .ok_or_else(|| MiningError::unknown_account(identity))?
            .status;
        if status != AccountStatus::Active {
            return Err(MiningError::account_banned(identity));
        }

        let new_balance = self.ledger.credit(identity, reward, operation)?;
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
    /// Validation order: account exists, account active, coin exists and
    /// is active, amount positive, email syntactically valid, amount
    /// within the coin's bounds, balance sufficient. On success the
    /// balance is debited, the account's payout email is updated, and a
    /// pending withdrawal record is appended.
    ///
    /// # Errors
    ///
    /// Any validation failure leaves the account and the withdrawal store
    /// untouched.
    pub fn request_withdrawal(
        &mut self,
        identity: UserId,
        request: &WithdrawalRequest,
    ) -> Result<Withdrawal, MiningError> {
        let status = self
            .ledger
            .get(identity)
            .ok_or_else(|| MiningError::unknown_account(identity))?
            .status;
        if status != AccountStatus::Active {
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

        let coin_symbol = coin.symbol.clone();
        let amount = request.amount;

        // Balance check, debit, and email update as one unit; a failed
        // check leaves the account untouched
        self.ledger.update(identity, |account| {
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
            .append(identity, &coin_symbol, amount, &request.email);
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
    ///
    /// Used by the operator flow once a withdrawal is approved. Returns
    /// the provider's opaque submission reference.
    ///
    /// # Errors
    ///
    /// Returns `PayoutUnavailable` when no provider is configured or the
    /// platform cannot accept the submission.
    pub fn submit_payout(&self, withdrawal: &Withdrawal) -> Result<String, MiningError> {
        self.payout.submit(withdrawal)
    }

    /// Apply a replayed operation record
    ///
    /// Routes the record to the matching engine operation. Reward and
    /// withdrawal results are discarded; replay only cares about the final
    /// account states.
    pub fn apply(&mut self, record: OperationRecord) -> Result<(), MiningError> {
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

    /// Final account states for output
    ///
    /// Sorted by identity.
    pub fn accounts(&self) -> Vec<&Account> {
        self.ledger.accounts()
    }
}

impl Default for MiningEngine {
    fn default() -> Self {
        Self::new()
    }
}
