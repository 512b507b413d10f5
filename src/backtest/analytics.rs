//! Backtest analytics and reporting

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::execution::Fill;

/// Crypto trades every day of the year
const PERIODS_PER_YEAR: f64 = 365.0;

/// Portfolio value after processing one slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub equity: Decimal,
    pub cash: Decimal,
}

/// Summary statistics from backtest
#[derive(Debug, Clone, Default, Serialize)]
pub struct BacktestSummary {
    /// Starting capital
    pub initial_capital: Decimal,
    /// Ending portfolio value
    pub final_equity: Decimal,
    /// Net P&L after fees
    pub net_pnl: Decimal,
    /// Net P&L over initial capital
    pub return_pct: Decimal,
    /// Annualized Sharpe ratio of per-slice returns
    pub sharpe_ratio: f64,
    /// Maximum drawdown (absolute)
    pub max_drawdown: Decimal,
    /// Maximum drawdown (fraction of peak)
    pub max_drawdown_pct: Decimal,
    /// Total number of fills
    pub total_trades: usize,
    /// Total fees paid
    pub total_fees: Decimal,
    /// Number of rebalances that passed gating
    pub rebalances: usize,
}

/// Complete backtest results
#[derive(Debug, Clone, Default, Serialize)]
pub struct BacktestResult {
    /// Summary statistics
    pub summary: BacktestSummary,
    /// Equity after every slice
    pub equity_curve: Vec<EquityPoint>,
    /// Every executed trade
    pub fills: Vec<Fill>,
}

impl BacktestSummary {
    /// Compute statistics from an equity curve and fills
    pub fn compute(
        initial_capital: Decimal,
        equity_curve: &[EquityPoint],
        fills: &[Fill],
        rebalances: usize,
    ) -> Self {
        let final_equity = equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(initial_capital);
        let net_pnl = final_equity - initial_capital;
        let return_pct = if initial_capital.is_zero() {
            Decimal::ZERO
        } else {
            net_pnl / initial_capital
        };

        let (max_drawdown, max_drawdown_pct) = max_drawdown(initial_capital, equity_curve);

        Self {
            initial_capital,
            final_equity,
            net_pnl,
            return_pct,
            sharpe_ratio: sharpe_ratio(equity_curve),
            max_drawdown,
            max_drawdown_pct,
            total_trades: fills.len(),
            total_fees: fills.iter().map(|f| f.fees).sum(),
            rebalances,
        }
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               BACKTEST RESULTS
══════════════════════════════════════════════════════

PERFORMANCE
───────────────────────────────────────────────────────
Initial Capital:  {:.2}
Final Equity:     {:.2}
Net P&L:          {:+.2} ({:+.2}%)
Sharpe Ratio:     {:.2}
Max Drawdown:     {:.2} ({:.2}%)

ACTIVITY
───────────────────────────────────────────────────────
Rebalances:       {}
Total Trades:     {}
Total Fees:       {:.2}
══════════════════════════════════════════════════════
"#,
            self.initial_capital,
            self.final_equity,
            self.net_pnl,
            self.return_pct * dec!(100),
            self.sharpe_ratio,
            self.max_drawdown,
            self.max_drawdown_pct * dec!(100),
            self.rebalances,
            self.total_trades,
            self.total_fees,
        )
    }
}

fn max_drawdown(initial_capital: Decimal, equity_curve: &[EquityPoint]) -> (Decimal, Decimal) {
    let mut peak = initial_capital;
    let mut worst = Decimal::ZERO;
    let mut worst_pct = Decimal::ZERO;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        }
        let drawdown = peak - point.equity;
        if drawdown > worst {
            worst = drawdown;
            if !peak.is_zero() {
                worst_pct = drawdown / peak;
            }
        }
    }

    (worst, worst_pct)
}

fn sharpe_ratio(equity_curve: &[EquityPoint]) -> f64 {
    let returns: Vec<f64> = equity_curve
        .windows(2)
        .filter_map(|w| {
            let prev = w[0].equity.to_f64()?;
            let next = w[1].equity.to_f64()?;
            (prev != 0.0).then(|| next / prev - 1.0)
        })
        .collect();

    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        return 0.0;
    }
    mean / std_dev * PERIODS_PER_YEAR.sqrt()
}
