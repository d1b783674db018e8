pub mod ema_cross;
pub mod macd_cross;

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use ema_cross::{ema_cross_signals, FAST_SPAN, SLOW_SPAN};
pub use macd_cross::{macd, macd_cross_signals, MacdSeries, SIGNAL_SPAN};

//discrete directional decision for one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Long,
    Short,
}

impl Signal {
    //+1 for long, -1 for short
    pub fn as_f64(&self) -> f64 {
        match self {
            Signal::Long => 1.0,
            Signal::Short => -1.0,
        }
    }

    pub(crate) fn from_comparison(above: bool) -> Self {
        if above {
            Signal::Long
        } else {
            Signal::Short
        }
    }
}

//closed set of supported signal generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    Ema,
    Macd,
}

impl StrategyKind {
    //parse strategy kind from a user-supplied name
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_lowercase().as_str() {
            "ema" | "ema_cross" => Ok(StrategyKind::Ema),
            "macd" | "macd_cross" => Ok(StrategyKind::Macd),
            _ => Err(CoreError::InvalidStrategy(s.to_string())),
        }
    }

    //bars needed before the longest ema window is populated
    pub fn min_bars(&self) -> usize {
        match self {
            StrategyKind::Ema | StrategyKind::Macd => SLOW_SPAN,
        }
    }

    //signal aligned to each closing price
    pub fn generate(&self, closes: &[f64]) -> Vec<Signal> {
        match self {
            StrategyKind::Ema => ema_cross_signals(closes),
            StrategyKind::Macd => macd_cross_signals(closes),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Ema => "EMA Cross (12/26)",
            StrategyKind::Macd => "MACD Cross (12/26/9)",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::parse(s)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
