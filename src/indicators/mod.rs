//stateless indicator math over ohlcv windows

pub mod atr;
pub mod ema;
pub mod pivots;
pub mod rsi;

pub use atr::{atr, true_range, DEFAULT_ATR_PERIOD};
pub use ema::{ema, ewma, wilder};
pub use pivots::{classify_price, fibonacci_pivots, pivots_from_series, PivotLevels, PivotZone};
pub use rsi::{latest_rsi, rsi, DEFAULT_RSI_PERIOD};
