use std::path::PathBuf;

use clap::Parser;
use stockledger_observability::LogFormat;

/// Single-warehouse inventory ledger.
#[derive(Debug, Parser)]
#[command(name = "stockledger", version, about)]
pub struct Cli {
    /// Load a .csv or .xml inventory file before the menu starts (repeatable).
    #[arg(long = "import", value_name = "PATH")]
    pub imports: Vec<PathBuf>,

    /// Log output format: pretty or json. Filtering follows RUST_LOG.
    #[arg(long, env = "STOCKLEDGER_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
