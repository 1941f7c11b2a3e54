//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and identity types
//! - `coin`: Coin catalog reference data
//! - `withdrawal`: Withdrawal records and request validation helpers
//! - `operation`: Replayable operation records
//! - `error`: Error types for the rewards engine

pub mod account;
pub mod coin;
pub mod error;
pub mod operation;
pub mod withdrawal;

pub use account::{Account, AccountStatus, UserId};
pub use coin::{default_coins, Coin};
pub use error::{ErrorCategory, MiningError};
pub use operation::{OperationRecord, OperationType, RewardOutcome};
pub use withdrawal::{
    is_valid_email, Withdrawal, WithdrawalId, WithdrawalRequest, WithdrawalStatus,
    DEFAULT_PLATFORM,
};
