use crate::engine::StrategyResult;
use crate::strategy::Signal;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//bars per year used to annualize; perpetuals trade every day
const PERIODS_PER_YEAR: f64 = 365.0;

//summary metrics for a backtest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub strategy: String,
    pub bars: usize,
    pub total_return_pct: f64,
    pub max_drawdown_pct: f64,
    pub final_equity: f64,
    pub sharpe_ratio: f64,
    pub position_flips: usize,
    pub long_exposure: f64,
}

impl SummaryMetrics {
    //calculate summary metrics from a strategy result
    pub fn from_result(result: &StrategyResult) -> Self {
        let final_equity = result.equity_curve.last().copied().unwrap_or(1.0);

        //the first strategy return is a placeholder for the missing prior bar
        let realized = result.strategy_returns.get(1..).unwrap_or(&[]);

        SummaryMetrics {
            strategy: result.strategy.name().to_string(),
            bars: result.bar_count(),
            total_return_pct: result.total_return_pct,
            max_drawdown_pct: result.max_drawdown_pct,
            final_equity,
            sharpe_ratio: calculate_sharpe_ratio(realized),
            position_flips: count_flips(&result.signals),
            long_exposure: long_exposure(&result.signals),
        }
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        self.to_table().printstd();
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Strategy"),
            Cell::new(&self.strategy),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Bars"),
            Cell::new(&format!("{}", self.bars)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Total Return (summed)"),
            Cell::new(&format!("{:.2}%", self.total_return_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Drawdown (summed)"),
            Cell::new(&format!("{:.2}%", self.max_drawdown_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Final Equity (compounded)"),
            Cell::new(&format!("{:.4}x", self.final_equity)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sharpe Ratio"),
            Cell::new(&format!("{:.3}", self.sharpe_ratio)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Position Flips"),
            Cell::new(&format!("{}", self.position_flips)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Long Exposure"),
            Cell::new(&format!("{:.2}%", self.long_exposure * 100.0)),
        ]));

        table
    }
}

fn calculate_sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.mean();
    let std_dev = returns.std_dev();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return 0.0;
    }

    (mean / std_dev) * PERIODS_PER_YEAR.sqrt()
}

fn count_flips(signals: &[Signal]) -> usize {
    signals.windows(2).filter(|w| w[0] != w[1]).count()
}

fn long_exposure(signals: &[Signal]) -> f64 {
    if signals.is_empty() {
        return 0.0;
    }
    let longs = signals.iter().filter(|&&s| s == Signal::Long).count();
    longs as f64 / signals.len() as f64
}
