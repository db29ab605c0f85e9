use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cross-chain transfer tracker CLI (library-facing definitions)
#[derive(Debug, Parser)]
#[command(
    name = "transfer-tracker",
    about = "Track cross-chain USDC transfers relayed over Chainlink CCIP",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// TOML config file; falls back to CONFIG_PATH, then built-in defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List supported chains
    Chains,
    /// List every supported chain pair with its estimates
    Routes,
    /// Show the estimate and configuration checks for one route
    Route {
        #[arg(long)]
        from: u64,
        #[arg(long)]
        to: u64,
    },
    /// Show destination choices for a source chain
    Destinations {
        #[arg(long)]
        from: u64,
    },
    /// Validate a transfer request without sending anything
    Validate {
        #[arg(long)]
        from: u64,
        #[arg(long)]
        to: u64,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        receiver: Option<String>,
    },
    /// Render one state snapshot
    Render {
        /// JSON file holding a transfer state
        #[arg(long)]
        state: PathBuf,
        #[arg(long)]
        from: u64,
        #[arg(long)]
        to: u64,
        #[arg(long)]
        amount: String,
        /// Seconds since the bridge timer started
        #[arg(long)]
        elapsed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Replay a JSON-lines stream of state snapshots through a live session
    Watch {
        #[arg(long)]
        events: PathBuf,
        #[arg(long)]
        from: u64,
        #[arg(long)]
        to: u64,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        json: bool,
        /// Print Prometheus metrics when the session ends
        #[arg(long)]
        metrics: bool,
    },
    /// Extract the CCIP message id from a source-chain receipt
    DecodeReceipt {
        /// JSON file: a receipt object with `logs`, or an array of logs
        #[arg(long)]
        receipt: PathBuf,
        /// Source chain id, selects the CrossChainManager address
        #[arg(long)]
        chain: u64,
    },
}
