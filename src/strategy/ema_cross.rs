use crate::indicators::ema;
use crate::strategy::Signal;

pub const FAST_SPAN: usize = 12;
pub const SLOW_SPAN: usize = 26;

//ema crossover
//long while the fast ema is above the slow ema, short otherwise
pub fn ema_cross_signals(closes: &[f64]) -> Vec<Signal> {
    let fast = ema(closes, FAST_SPAN);
    let slow = ema(closes, SLOW_SPAN);

    fast.iter()
        .zip(slow.iter())
        .map(|(f, s)| Signal::from_comparison(f > s))
        .collect()
}
