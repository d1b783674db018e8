use crate::error::{require_len, CoreResult};
use crate::indicators::ema::wilder;

pub const DEFAULT_RSI_PERIOD: usize = 14;

//relative strength index with wilder smoothing
//returns one value per price change, so out[i] belongs to prices[i + 1]
pub fn rsi(prices: &[f64], period: usize) -> CoreResult<Vec<f64>> {
    let period = period.max(1);
    require_len(prices.len(), period + 1)?;

    let (gains, losses): (Vec<f64>, Vec<f64>) = prices
        .windows(2)
        .map(|w| {
            let delta = w[1] - w[0];
            (delta.max(0.0), (-delta).max(0.0))
        })
        .unzip();

    let avg_gain = wilder(&gains, period);
    let avg_loss = wilder(&losses, period);

    Ok(avg_gain
        .iter()
        .zip(avg_loss.iter())
        .map(|(&g, &l)| rsi_from_averages(g, l))
        .collect())
}

//most recent rsi value of the series
pub fn latest_rsi(prices: &[f64], period: usize) -> CoreResult<f64> {
    let values = rsi(prices, period)?;
    //rsi() guarantees at least one value
    Ok(values.last().copied().unwrap_or(100.0))
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    //saturate instead of dividing by zero
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
