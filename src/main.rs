use clap::Parser;
use triple_momentum::cli::{Cli, Commands};
use triple_momentum::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = triple_momentum::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Backtest(args) => {
            tracing::info!("Starting backtest");
            args.execute(&config).await?;
        }
        Commands::Signals(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Universe: {}", config.universe.tickers.join(", "));
            println!(
                "  Momentum: long={} short={} bars",
                config.strategy.long_momentum_window, config.strategy.short_momentum_window
            );
            println!(
                "  Rebalance: every {} day(s), buy top {}, hold top {}",
                config.strategy.rebalance_window_days,
                config.strategy.buy_limit,
                config.strategy.hold_limit
            );
            println!(
                "  Thresholds: buy>={}% sell<{}%",
                config.strategy.min_buy_momentum, config.strategy.max_sell_momentum
            );
            println!(
                "  Target weight: {}",
                config.strategy.target_weight().round_dp(4)
            );
            println!(
                "  Backtest: {} to {}, cash={}",
                config.backtest.start, config.backtest.end, config.backtest.initial_cash
            );
            println!(
                "  Execution: {:?} {:?} {:?}, fee={}",
                config.execution.mode,
                config.execution.brokerage,
                config.execution.account_type,
                config.execution.effective_fee_rate()
            );
        }
    }

    Ok(())
}
