//! Asynchronous batch replay strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait. It
//! replays operations in batches using thread-based parallelism with
//! identity-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncReplayStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (identity partitioning + tasks)
//!     └── ConcurrentMiningEngine (thread-safe processing)
//!         ├── ConcurrentAccountLedger
//!         ├── ConcurrentCoinCatalog
//!         └── ConcurrentWithdrawalStore
//! ```
//!
//! # Ordering
//!
//! Batches are processed sequentially; within a batch, identities are
//! processed in parallel and each identity's operations stay in order.
//! Per-user ordering therefore holds across the entire stream.

use crate::core::concurrent::{
    BatchProcessor, ConcurrentAccountLedger, ConcurrentCoinCatalog, ConcurrentMiningEngine,
    ConcurrentWithdrawalStore,
};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch replay
///
/// Controls how operations are batched and the number of worker threads
/// for parallel processing within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Maximum number of batches processing concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values are rejected with a stderr warning and replaced by the
    /// defaults.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            eprintln!(
                "Warning: Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            eprintln!(
                "Warning: Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch replay strategy
///
/// Reads operations in batches and replays them through the thread-safe
/// engine, partitioned by identity within each batch.
#[derive(Debug, Clone)]
pub struct AsyncReplayStrategy {
    /// Batch replay configuration
    config: BatchConfig,
}

impl AsyncReplayStrategy {
    /// Create a new AsyncReplayStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncReplayStrategy {
    /// Replay operations from the input file and write results to output
    ///
    /// Pipeline:
    /// 1. Create the thread-safe engine components and seed the catalog
    /// 2. Create a BatchProcessor for identity-based partitioning
    /// 3. Create a tokio multi-threaded runtime
    /// 4. Read operations in batches from CSV using AsyncReader
    /// 5. Process each batch to completion before reading the next, so
    ///    per-user ordering holds across batch boundaries
    /// 6. Write the final account states as CSV
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let ledger = Arc::new(ConcurrentAccountLedger::new());
            let catalog = Arc::new(ConcurrentCoinCatalog::new());
            let withdrawals = Arc::new(ConcurrentWithdrawalStore::new());
            let engine = Arc::new(ConcurrentMiningEngine::new(
                Arc::clone(&ledger),
                Arc::clone(&catalog),
                Arc::clone(&withdrawals),
            ));
            engine.seed_coins();

            let processor = BatchProcessor::new(Arc::clone(&engine));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;

                if batch.is_empty() {
                    break;
                }

                // Wait for the whole batch so a user's operations spanning
                // batch boundaries replay in order
                let outcomes = processor.process_batch(batch).await;
                for outcome in outcomes {
                    if let Err(e) = outcome.result {
                        eprintln!("Operation error: {}", e);
                    }
                }
            }

            let accounts = ledger.get_all_accounts();

            write_accounts_csv(&accounts, output)?;

            Ok(())
        })
    }
}
