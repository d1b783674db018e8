use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//a point in the equity curve
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
    pub strategy_return: f64,
    pub drawdown: f64,
}

impl EquityPoint {
    pub fn new(timestamp: DateTime<Utc>, equity: f64, strategy_return: f64, drawdown: f64) -> Self {
        EquityPoint {
            timestamp,
            equity,
            strategy_return,
            drawdown,
        }
    }
}

//simple per-bar returns, r[0] = 0
pub fn bar_returns(closes: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return returns;
    }

    returns.push(0.0);
    returns.extend(closes.windows(2).map(|w| w[1] / w[0] - 1.0));
    returns
}

//running sum of returns
pub fn cumulative_sum(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(0.0, |acc, &r| {
            *acc += r;
            Some(*acc)
        })
        .collect()
}

//compounded growth of one unit, cumulative product of (1 + r)
pub fn compound_curve(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |acc, &r| {
            *acc *= 1.0 + r;
            Some(*acc)
        })
        .collect()
}

//distance of the summed return below its running peak at each bar (always <= 0)
pub fn sum_drawdowns(returns: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    cumulative_sum(returns)
        .into_iter()
        .map(|cum| {
            if cum > peak {
                peak = cum;
            }
            cum - peak
        })
        .collect()
}

//deepest summed-return drawdown, as a fraction
pub fn max_sum_drawdown(returns: &[f64]) -> f64 {
    sum_drawdowns(returns).into_iter().fold(0.0, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_return_is_zero() {
        let r = bar_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r[0], 0.0);
        assert!((r[1] - 0.1).abs() < 1e-12);
        assert!((r[2] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn sum_and_product_diverge() {
        let returns = [0.0, 0.5, -0.5];
        assert_eq!(cumulative_sum(&returns), vec![0.0, 0.5, 0.0]);
        assert_eq!(compound_curve(&returns), vec![1.0, 1.5, 0.75]);
    }

    #[test]
    fn drawdown_tracks_running_peak_of_sum() {
        let returns = [0.0, 0.1, -0.3, 0.1, 0.4];
        let dd = sum_drawdowns(&returns);
        assert_eq!(dd[0], 0.0);
        assert_eq!(dd[1], 0.0);
        assert!((dd[2] + 0.3).abs() < 1e-12);
        assert!((dd[3] + 0.2).abs() < 1e-12);
        assert_eq!(dd[4], 0.0);
        assert!((max_sum_drawdown(&returns) + 0.3).abs() < 1e-12);
    }

    #[test]
    fn empty_series_has_no_drawdown() {
        assert_eq!(max_sum_drawdown(&[]), 0.0);
        assert!(bar_returns(&[]).is_empty());
    }
}
