// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{CliArgs, StrategyType};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Returns a `CliArgs` struct with the parsed command-line arguments. On
/// invalid input or --help, clap prints its own message and exits.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
