//position sizing and single-asset strategy backtesting for a derivatives trading terminal

pub mod alert;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod risk;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::alert::{AlertError, AlertNotifier, AlertSettings, AlertSink, LogSink};
    pub use crate::config::{RiskProfile, TerminalConfig};
    pub use crate::data::{
        closes, ensure_strictly_increasing, ensure_valid_prices, load_csv, Bar, BarError,
    };
    pub use crate::engine::{run_backtest, BacktestEngine, StrategyResult};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::indicators::{
        atr, classify_price, ema, fibonacci_pivots, latest_rsi, pivots_from_series, rsi,
        true_range, PivotLevels, PivotZone, DEFAULT_ATR_PERIOD, DEFAULT_RSI_PERIOD,
    };
    pub use crate::metrics::{EquityPoint, SummaryMetrics};
    pub use crate::risk::{PositionSizingRequest, PositionSizingResult, RiskManager};
    pub use crate::strategy::{macd, MacdSeries, Signal, StrategyKind};
}
