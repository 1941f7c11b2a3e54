//! Mining Rewards Engine Library
//! # Overview
//!
//! This library implements the core of a point-mining reward system: users
//! collect points, watch ads for bonus points, and withdraw accumulated
//! points as cryptocurrency through a payout platform.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Coin, Withdrawal, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Reward and withdrawal orchestration
//!   - [`core::ledger`] - Account state management and balance operations
//!   - [`core::catalog`] - Coin reference data with idempotent seeding
//!   - [`core::withdrawal_store`] - Append-only withdrawal request log
//!   - [`core::concurrent`] - Thread-safe implementations
//! - [`io`] - CSV replay input and account output
//! - [`strategy`] - Sync and async replay pipelines
//! - [`api`] - Wire shapes for the external transport layer
//!
//! # Operations
//!
//! The engine supports four operations:
//!
//! - **Login**: Provision an account for an identity (idempotent)
//! - **Collect**: Credit the fixed mining reward of 10 points
//! - **Ad**: Credit the fixed ad bonus of 50 points
//! - **Withdraw**: Validate a payout request against the coin catalog and
//!   the account balance, debit the balance, and append a pending record
//!
//! # Invariants
//!
//! - An account balance is never negative
//! - Every balance mutation is atomic with respect to concurrent requests
//!   from the same identity
//! - A withdrawal record exists only if its debit happened

// Module declarations
pub mod api;
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{
    AccountLedger, BatchProcessor, CoinCatalog, ConcurrentMiningEngine, MiningEngine,
    WithdrawalStore,
};
pub use crate::io::write_accounts_csv;
pub use crate::types::{
    Account, AccountStatus, Coin, MiningError, OperationRecord, OperationType, UserId,
    Withdrawal, WithdrawalId, WithdrawalRequest, WithdrawalStatus,
};
