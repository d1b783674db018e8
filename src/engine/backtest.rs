use crate::data::{closes, ensure_strictly_increasing, ensure_valid_prices, Bar};
use crate::error::{require_len, CoreResult};
use crate::metrics::timeseries::{
    bar_returns, compound_curve, max_sum_drawdown, sum_drawdowns, EquityPoint,
};
use crate::strategy::{Signal, StrategyKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

//result of a single-strategy backtest over one window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: StrategyKind,

    //simple (additive) sum of strategy returns, in percent
    pub total_return_pct: f64,

    //deepest drop of the summed returns below their running peak, in percent (<= 0)
    pub max_drawdown_pct: f64,

    //compounded growth of one unit, one value per bar
    pub equity_curve: Vec<f64>,

    pub timestamps: Vec<DateTime<Utc>>,
    pub signals: Vec<Signal>,
    pub strategy_returns: Vec<f64>,
}

impl StrategyResult {
    //zips timestamps with the equity curve for plotting or export
    pub fn equity_points(&self) -> Vec<EquityPoint> {
        let drawdowns = sum_drawdowns(&self.strategy_returns);
        self.timestamps
            .iter()
            .zip(self.equity_curve.iter())
            .zip(self.strategy_returns.iter().zip(drawdowns.iter()))
            .map(|((&ts, &equity), (&ret, &dd))| EquityPoint::new(ts, equity, ret, dd))
            .collect()
    }

    pub fn bar_count(&self) -> usize {
        self.equity_curve.len()
    }
}

//evaluates one strategy over one historical window, synchronously
pub struct BacktestEngine<'a> {
    bars: &'a [Bar],
}

impl<'a> BacktestEngine<'a> {
    //creates an engine over a window, rejecting unordered or malformed bars up front
    pub fn new(bars: &'a [Bar]) -> CoreResult<Self> {
        ensure_strictly_increasing(bars)?;
        ensure_valid_prices(bars)?;
        Ok(BacktestEngine { bars })
    }

    //runs the backtest with the given strategy
    pub fn run(&self, kind: StrategyKind) -> CoreResult<StrategyResult> {
        require_len(self.bars.len(), kind.min_bars())?;

        let closes = closes(self.bars);
        let returns = bar_returns(&closes);
        let signals = kind.generate(&closes);

        //one-bar execution lag: the signal formed at t-1 earns the return over [t-1, t]
        let mut strategy_returns = Vec::with_capacity(returns.len());
        strategy_returns.push(0.0);
        strategy_returns.extend(
            signals
                .iter()
                .zip(returns.iter().skip(1))
                .map(|(signal, r)| signal.as_f64() * r),
        );

        let total_return = strategy_returns.iter().fold(0.0, |acc, r| acc + r);
        let equity_curve = compound_curve(&strategy_returns);
        let max_drawdown = max_sum_drawdown(&strategy_returns);

        debug!(
            strategy = %kind,
            bars = self.bars.len(),
            "computed strategy returns"
        );

        let result = StrategyResult {
            strategy: kind,
            total_return_pct: total_return * 100.0,
            max_drawdown_pct: max_drawdown * 100.0,
            equity_curve,
            timestamps: self.bars.iter().map(|b| b.timestamp).collect(),
            signals,
            strategy_returns,
        };

        info!(
            strategy = %kind,
            total_return_pct = result.total_return_pct,
            max_drawdown_pct = result.max_drawdown_pct,
            "backtest finished"
        );

        Ok(result)
    }
}

//string-dispatched entry point for callers holding a strategy name
pub fn run_backtest(bars: &[Bar], strategy_name: &str) -> CoreResult<StrategyResult> {
    let kind = StrategyKind::parse(strategy_name)?;
    BacktestEngine::new(bars)?.run(kind)
}
