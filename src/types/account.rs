//! Account-related types for the Mining Rewards Engine
//!
//! This module defines the Account structure and related functionality
//! for tracking per-user point balances.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identity
///
/// The stable external identifier assigned by the hosting platform.
/// Signed 64-bit to match the upstream identity space.
pub type UserId = i64;

/// Lifecycle status of an account
///
/// Banned accounts keep their balance but are rejected by every
/// balance-mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account may collect rewards and request withdrawals
    Active,

    /// Account is blocked from all reward and withdrawal operations
    Banned,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "active"),
            AccountStatus::Banned => write!(f, "banned"),
        }
    }
}

/// Per-user account state
///
/// Represents the current state of a user's account: point balance,
/// lifecycle status, and the payout email last used for a withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The stable external user identity (unique)
    pub identity: UserId,

    /// Display name shown in the client
    pub name: String,

    /// Point balance
    ///
    /// Never negative. Increased by reward collection, decreased only
    /// by successful withdrawal requests.
    pub balance: Decimal,

    /// Lifecycle status (active or banned)
    pub status: AccountStatus,

    /// Payout email
    ///
    /// Empty until the first successful withdrawal; afterwards holds the
    /// address most recently used for a payout.
    pub email: String,

    /// When the account was first provisioned
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account with a zero balance
    ///
    /// When no display name is given, a default of `User{identity}` is
    /// used, matching the provisioning behavior of the client flow.
    pub fn new(identity: UserId, name: Option<&str>) -> Self {
        let name = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("User{}", identity),
        };

        Account {
            identity,
            name,
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
            email: String::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_starts_active_with_zero_balance() {
        let account = Account::new(1001, Some("alice"));

        assert_eq!(account.identity, 1001);
        assert_eq!(account.name, "alice");
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.status, AccountStatus::Active);
        assert_eq!(account.email, "");
    }

    #[test]
    fn test_new_account_defaults_display_name() {
        let account = Account::new(42, None);
        assert_eq!(account.name, "User42");

        let account = Account::new(42, Some(""));
        assert_eq!(account.name, "User42");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AccountStatus::Active.to_string(), "active");
        assert_eq!(AccountStatus::Banned.to_string(), "banned");
    }

    #[test]
    fn test_account_serializes_camel_case() {
        let account = Account::new(7, Some("bob"));
        let value = serde_json::to_value(&account).unwrap();

        assert!(value.get("identity").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["status"], "active");
        assert_eq!(value["name"], "bob");
    }
}
