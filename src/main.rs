//! Mining Rewards Engine CLI
//!
//! Command-line interface for replaying reward operations from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > accounts.csv
//! cargo run -- --strategy sync operations.csv > accounts.csv
//! cargo run -- --strategy async operations.csv > accounts.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 operations.csv > accounts.csv
//! ```
//!
//! The program reads operation records from the input CSV file, replays
//! them through the rewards engine using the selected strategy, and
//! writes the final account states to stdout.
//!
//! # Replay Strategies
//!
//! - **sync**: Synchronous CSV parsing with single-threaded replay
//! - **async**: Asynchronous batch replay with per-identity parallelism (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use mining_rewards_engine::cli;
use mining_rewards_engine::strategy;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Create the appropriate replay strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    // Replay operations using the selected strategy, writing to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
