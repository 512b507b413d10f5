//! CLI interface for triple-momentum
//!
//! Provides subcommands for:
//! - `backtest`: Replay stored bars through the strategy
//! - `signals`: Show the current momentum ranking
//! - `config`: Show the effective configuration

mod backtest;
mod signals;

pub use backtest::{BacktestArgs, OutputFormat};
pub use signals::SignalsArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "triple-momentum")]
#[command(about = "Momentum rotation strategy for a basket of crypto assets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run backtest on stored bars
    Backtest(BacktestArgs),
    /// Show the momentum ranking at the last stored bar
    Signals(SignalsArgs),
    /// Show configuration
    Config,
}
