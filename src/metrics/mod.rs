pub mod summary;
pub mod timeseries;

pub use summary::SummaryMetrics;
pub use timeseries::{
    bar_returns, compound_curve, cumulative_sum, max_sum_drawdown, sum_drawdowns, EquityPoint,
};
