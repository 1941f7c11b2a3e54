//! Error types for the Mining Rewards Engine
//!
//! This module defines all error types that can occur while processing
//! reward and withdrawal operations, together with the stable status
//! categories the transport layer translates into response codes.
//!
//! # Error Categories
//!
//! - **NotFound**: unknown account identity
//! - **Forbidden**: banned account
//! - **InvalidArgument**: malformed or out-of-bounds amount/email,
//!   unknown or inactive coin, insufficient balance
//! - **Conflict**: concurrent-update detection (reserved)
//! - **Unavailable**: payout provider not reachable
//! - **Internal**: arithmetic or storage failures

use crate::types::account::UserId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Stable status category attached to every error
///
/// The transport layer maps categories onto its own status codes; the
/// engine only guarantees that the category of a given failure mode
/// never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Forbidden,
    InvalidArgument,
    Conflict,
    Unavailable,
    Internal,
}

/// Main error type for the rewards engine
///
/// Each variant carries the context needed to produce an actionable
/// message for the caller. Validation errors are detected eagerly and
/// reported synchronously; nothing is retried inside the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MiningError {
    /// No account exists for the identity
    ///
    /// Accounts are only provisioned through login; every other operation
    /// requires the account to already exist.
    #[error("Account not found for identity {identity}")]
    UnknownAccount {
        /// The unknown identity
        identity: UserId,
    },

    /// The account exists but is banned
    ///
    /// Banned accounts keep their balance; all mutating operations are
    /// rejected.
    #[error("Account {identity} is banned")]
    AccountBanned {
        /// Identity of the banned account
        identity: UserId,
    },

    /// No coin is registered under the symbol
    #[error("Coin '{symbol}' not found")]
    UnknownCoin {
        /// The unknown coin symbol
        symbol: String,
    },

    /// The coin exists but is not offered for withdrawal
    #[error("Coin '{symbol}' is not active")]
    CoinInactive {
        /// Symbol of the inactive coin
        symbol: String,
    },

    /// The requested amount is not a positive number
    #[error("Invalid withdrawal amount {amount}: must be positive")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// The payout email is not syntactically valid
    #[error("Invalid payout email '{email}'")]
    InvalidEmail {
        /// The rejected address
        email: String,
    },

    /// The requested amount falls outside the coin's withdrawal bounds
    #[error("Amount {amount} {symbol} out of range: must be between {min} and {max}")]
    AmountOutOfRange {
        /// Coin symbol the bounds belong to
        symbol: String,
        /// The rejected amount
        amount: Decimal,
        /// Minimum withdrawable amount
        min: Decimal,
        /// Maximum withdrawable amount
        max: Decimal,
    },

    /// The account balance cannot cover the requested amount
    #[error(
        "Insufficient balance for identity {identity}: balance {balance}, requested {requested}"
    )]
    InsufficientBalance {
        /// Identity of the account
        identity: UserId,
        /// Current balance
        balance: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// A replayed operation is missing a required field
    #[error("{op} operation for identity {identity} is missing required field '{field}'")]
    MissingField {
        /// Operation kind, e.g. `withdraw`
        op: String,
        /// Name of the missing field
        field: String,
        /// Identity the operation applies to
        identity: UserId,
    },

    /// A concurrent balance update was detected
    ///
    /// Reserved: the per-account entry lock currently serializes all
    /// balance mutations, so no code path surfaces this today.
    #[error("Concurrent balance update detected for identity {identity}")]
    ConcurrentUpdate {
        /// Identity whose balance raced
        identity: UserId,
    },

    /// The payout provider rejected or never accepted the submission
    #[error("Payout provider '{platform}' is unavailable")]
    PayoutUnavailable {
        /// Name of the payout platform
        platform: String,
    },

    /// A balance computation would overflow
    #[error("Arithmetic overflow in {operation} for identity {identity}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Identity of the affected account
        identity: UserId,
    },

    /// Unexpected persistence failure
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the failure
        message: String,
    },
}

impl MiningError {
    /// The stable status category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            MiningError::UnknownAccount { .. } => ErrorCategory::NotFound,
            MiningError::AccountBanned { .. } => ErrorCategory::Forbidden,
            MiningError::UnknownCoin { .. }
            | MiningError::CoinInactive { .. }
            | MiningError::InvalidAmount { .. }
            | MiningError::InvalidEmail { .. }
            | MiningError::AmountOutOfRange { .. }
            | MiningError::InsufficientBalance { .. }
            | MiningError::MissingField { .. } => ErrorCategory::InvalidArgument,
            MiningError::ConcurrentUpdate { .. } => ErrorCategory::Conflict,
            MiningError::PayoutUnavailable { .. } => ErrorCategory::Unavailable,
            MiningError::ArithmeticOverflow { .. } | MiningError::Storage { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

// Helper functions for creating common errors

impl MiningError {
    /// Create an UnknownAccount error
    pub fn unknown_account(identity: UserId) -> Self {
        MiningError::UnknownAccount { identity }
    }

    /// Create an AccountBanned error
    pub fn account_banned(identity: UserId) -> Self {
        MiningError::AccountBanned { identity }
    }

    /// Create an UnknownCoin error
    pub fn unknown_coin(symbol: &str) -> Self {
        MiningError::UnknownCoin {
            symbol: symbol.to_string(),
        }
    }

    /// Create a CoinInactive error
    pub fn coin_inactive(symbol: &str) -> Self {
        MiningError::CoinInactive {
            symbol: symbol.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        MiningError::InvalidAmount { amount }
    }

    /// Create an InvalidEmail error
    pub fn invalid_email(email: &str) -> Self {
        MiningError::InvalidEmail {
            email: email.to_string(),
        }
    }

    /// Create an AmountOutOfRange error
    pub fn amount_out_of_range(symbol: &str, amount: Decimal, min: Decimal, max: Decimal) -> Self {
        MiningError::AmountOutOfRange {
            symbol: symbol.to_string(),
            amount,
            min,
            max,
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(identity: UserId, balance: Decimal, requested: Decimal) -> Self {
        MiningError::InsufficientBalance {
            identity,
            balance,
            requested,
        }
    }

    /// Create a MissingField error
    pub fn missing_field(op: &str, field: &str, identity: UserId) -> Self {
        MiningError::MissingField {
            op: op.to_string(),
            field: field.to_string(),
            identity,
        }
    }

    /// Create a PayoutUnavailable error
    pub fn payout_unavailable(platform: &str) -> Self {
        MiningError::PayoutUnavailable {
            platform: platform.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, identity: UserId) -> Self {
        MiningError::ArithmeticOverflow {
            operation: operation.to_string(),
            identity,
        }
    }

    /// Create a Storage error
    pub fn storage(message: &str) -> Self {
        MiningError::Storage {
            message: message.to_string(),
        }
    }
}
