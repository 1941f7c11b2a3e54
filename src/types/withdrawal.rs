//! Withdrawal types for the Mining Rewards Engine
//!
//! A withdrawal is an append-only record of a payout request. Records are
//! created in `Pending` status; approval and rejection happen in a separate
//! operator flow that only flips the status field.

use crate::types::account::UserId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Withdrawal record identifier
///
/// Serial, monotonically increasing. Creation order and id order agree.
pub type WithdrawalId = u64;

/// The payout platform withdrawals are submitted to
pub const DEFAULT_PLATFORM: &str = "FaucetPay";

/// Lifecycle status of a withdrawal record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalStatus {
    /// Created and awaiting operator review
    Pending,

    /// Approved and handed to the payout platform
    Approved,

    /// Rejected by the operator; no payout happens
    Rejected,
}

/// A single withdrawal request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    /// Serial record id
    pub id: WithdrawalId,

    /// Identity of the requesting account
    pub identity: UserId,

    /// Symbol of the coin being withdrawn
    pub coin: String,

    /// Requested amount in points
    pub amount: Decimal,

    /// Payout platform the request targets
    pub platform: String,

    /// Destination email on the payout platform
    pub email: String,

    /// Current lifecycle status
    pub status: WithdrawalStatus,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Parameters of an incoming withdrawal request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    /// Symbol of the coin to withdraw
    pub coin: String,

    /// Requested amount in points
    pub amount: Decimal,

    /// Destination email on the payout platform
    pub email: String,
}

/// Syntactic email check for payout destinations
///
/// Accepts `local@host.tld` shapes: exactly one `@`, a non-empty local
/// part, a dotted domain, and no whitespace anywhere. Deliverability is
/// the payout platform's problem, not ours.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
