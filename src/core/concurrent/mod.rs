//! Thread-safe implementations of the core components
//!
//! This module provides concurrent counterparts of the synchronous
//! components, built on DashMap for fine-grained per-entry locking.
//!
//! # Architecture
//!
//! - **ConcurrentAccountLedger**: thread-safe account state with
//!   entry-locked balance mutations
//! - **ConcurrentCoinCatalog**: thread-safe coin reference data with
//!   duplicate-free seeding
//! - **ConcurrentWithdrawalStore**: thread-safe request log with atomic
//!   id assignment
//! - **ConcurrentMiningEngine**: orchestrates the above
//! - **BatchProcessor**: identity-partitioned batch replay
//!
//! # Thread Safety
//!
//! Operations on different accounts proceed in parallel; operations on
//! the same account are serialized on its entry. There are no global
//! locks.

pub mod batch_processor;
pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod withdrawal_store;

pub use batch_processor::{BatchProcessor, ReplayOutcome};
pub use catalog::ConcurrentCoinCatalog;
pub use engine::ConcurrentMiningEngine;
pub use ledger::ConcurrentAccountLedger;
pub use withdrawal_store::ConcurrentWithdrawalStore;
