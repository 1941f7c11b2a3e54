//! Operation types for the Mining Rewards Engine
//!
//! This module defines the replayable operation records driving the engine:
//! account provisioning, the two reward actions, and withdrawal requests.

use crate::types::account::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operation kinds accepted by the engine
///
/// Each variant corresponds to one request the client can make. Reward
/// operations carry a fixed payout; withdrawals carry coin, amount, and
/// destination email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// Provision an account for the identity (or return the existing one)
    Login,

    /// Collect the fixed mining reward
    Collect,

    /// Claim the fixed bonus for a watched ad
    #[serde(rename = "ad")]
    WatchAd,

    /// Request a payout of accumulated points
    Withdraw,
}

/// A single operation as read from a replay stream
///
/// The optional fields are only meaningful for some operation kinds:
/// `name` for logins, `coin`/`amount`/`email` for withdrawals. The engine
/// rejects withdrawals missing any of their required fields.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// The kind of operation
    pub op: OperationType,

    /// Identity the operation applies to
    pub identity: UserId,

    /// Display name (logins only; defaults when absent)
    pub name: Option<String>,

    /// Coin symbol (withdrawals only)
    pub coin: Option<String>,

    /// Withdrawal amount in points (withdrawals only)
    pub amount: Option<Decimal>,

    /// Payout destination email (withdrawals only)
    pub email: Option<String>,
}

/// Result of a successful reward operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardOutcome {
    /// Points granted by this operation
    pub reward: Decimal,

    /// Balance after the grant
    pub new_balance: Decimal,
}
