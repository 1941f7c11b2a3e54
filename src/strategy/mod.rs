//! Processing strategy module for operation replay
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! encompassing CSV parsing, engine processing, and account output. This
//! allows different implementations (synchronous, asynchronous batch) to
//! be selected at runtime.

use crate::cli::StrategyType;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncReplayStrategy, BatchConfig};
pub use sync::SyncReplayStrategy;

/// Processing strategy trait for complete replay pipelines
///
/// Each strategy reads operation records from a CSV file, seeds the coin
/// catalog, replays the operations through an engine, and writes the
/// final account states to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Replay operations from the input file and write results to output
    ///
    /// # Errors
    ///
    /// Returns an error string for fatal failures (file not found, I/O
    /// error, broken output). Individual operation errors are logged to
    /// stderr and replay continues with the next record.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// Factory selecting the implementation at runtime from the CLI choice.
///
/// # Arguments
///
/// * `strategy_type` - The type of strategy to create (Sync or Async)
/// * `config` - Optional batch configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncReplayStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncReplayStrategy::new(config))
        }
    }
}
