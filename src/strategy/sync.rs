//! Synchronous replay strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates the pipeline by coordinating the SyncReader (CSV input)
//! and MiningEngine (business logic).
//!
//! # Memory Efficiency
//!
//! Records are processed one at a time as they stream off the reader;
//! memory usage is O(accounts + withdrawals), not O(operations).

use crate::core::MiningEngine;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::Account;
use std::io::Write;
use std::path::Path;

/// Synchronous replay strategy
///
/// Replays the operation stream in file order through a single-threaded
/// engine. Per-record errors (unknown accounts, rejected withdrawals,
/// malformed rows) are logged to stderr and do not stop the replay.
#[derive(Debug, Clone, Copy)]
pub struct SyncReplayStrategy;

impl ProcessingStrategy for SyncReplayStrategy {
    /// Replay operations from the input file and write results to output
    ///
    /// Pipeline:
    /// 1. Create a MiningEngine and seed the coin catalog
    /// 2. Stream operation records off the SyncReader
    /// 3. Apply each record, logging recoverable errors to stderr
    /// 4. Write the final account states as CSV
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let mut engine = MiningEngine::new();
        engine.seed_coins();

        let reader = SyncReader::new(input_path)?;

        for result in reader {
            match result {
                Ok(operation_record) => {
                    if let Err(e) = engine.apply(operation_record) {
                        eprintln!("Operation error: {}", e);
                    }
                }
                Err(e) => {
                    eprintln!("CSV parsing error: {}", e);
                }
            }
        }

        let account_refs = engine.accounts();
        let accounts: Vec<Account> = account_refs.iter().map(|&a| a.clone()).collect();

        write_accounts_csv(&accounts, output)?;

        Ok(())
    }
}
