use crate::indicators::ema;
use crate::strategy::{Signal, FAST_SPAN, SLOW_SPAN};
use serde::{Deserialize, Serialize};

pub const SIGNAL_SPAN: usize = 9;

//macd line, its signal line and the histogram, aligned to the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(closes: &[f64]) -> MacdSeries {
    let fast = ema(closes, FAST_SPAN);
    let slow = ema(closes, SLOW_SPAN);

    let macd: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
    let signal_line = ema(&macd, SIGNAL_SPAN);
    let histogram = macd
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| m - s)
        .collect();

    MacdSeries {
        macd,
        signal_line,
        histogram,
    }
}

//long while macd is above its signal line, short otherwise
pub fn macd_cross_signals(closes: &[f64]) -> Vec<Signal> {
    let series = macd(closes);
    series
        .macd
        .iter()
        .zip(series.signal_line.iter())
        .map(|(m, s)| Signal::from_comparison(m > s))
        .collect()
}
