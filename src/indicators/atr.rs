use crate::data::Bar;
use crate::error::{require_len, CoreResult};
use crate::indicators::ema::wilder;

pub const DEFAULT_ATR_PERIOD: usize = 14;

//true range per bar; the first bar has no previous close so it uses high - low
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let mut out = Vec::with_capacity(bars.len());
    let mut prev_close: Option<f64> = None;

    for bar in bars {
        let tr = match prev_close {
            Some(pc) => bar
                .range()
                .max((bar.high - pc).abs())
                .max((bar.low - pc).abs()),
            None => bar.range(),
        };
        out.push(tr);
        prev_close = Some(bar.close);
    }

    out
}

//average true range, one value per bar
pub fn atr(bars: &[Bar], period: usize) -> CoreResult<Vec<f64>> {
    let period = period.max(1);
    require_len(bars.len(), period)?;
    Ok(wilder(&true_range(bars), period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::{Duration, TimeZone, Utc};

    fn bar(day: i64, high: f64, low: f64, close: f64) -> Bar {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day);
        Bar::new_unchecked(ts, close, high, low, close, 1.0)
    }

    #[test]
    fn gap_up_uses_previous_close() {
        let bars = vec![bar(0, 101.0, 99.0, 100.0), bar(1, 112.0, 108.0, 110.0)];
        assert_eq!(true_range(&bars), vec![2.0, 12.0]);
    }

    #[test]
    fn gap_down_uses_previous_close() {
        let bars = vec![bar(0, 101.0, 99.0, 100.0), bar(1, 92.0, 90.0, 91.0)];
        assert_eq!(true_range(&bars), vec![2.0, 10.0]);
    }

    #[test]
    fn constant_range_gives_constant_atr() {
        let bars: Vec<Bar> = (0..20).map(|d| bar(d, 101.0, 99.0, 100.0)).collect();
        let values = atr(&bars, 14).unwrap();
        assert_eq!(values.len(), bars.len());
        assert!(values.iter().all(|&v| (v - 2.0).abs() < 1e-12));
    }

    #[test]
    fn smoothing_by_hand() {
        //tr [2, 12], alpha 1/2 => [2, 7]
        let bars = vec![bar(0, 101.0, 99.0, 100.0), bar(1, 112.0, 108.0, 110.0)];
        assert_eq!(atr(&bars, 2).unwrap(), vec![2.0, 7.0]);
    }

    #[test]
    fn short_window_is_rejected() {
        let bars = vec![bar(0, 101.0, 99.0, 100.0)];
        assert_eq!(
            atr(&bars, 14),
            Err(CoreError::InsufficientData {
                required: 14,
                actual: 1
            })
        );
    }
}
