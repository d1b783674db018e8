pub mod backtest;

pub use backtest::{run_backtest, BacktestEngine, StrategyResult};
