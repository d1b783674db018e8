//recursive exponentially weighted average seeded by the first value
//y[0] = x[0], y[t] = alpha * x[t] + (1 - alpha) * y[t-1] (no bias adjustment)
pub fn ewma(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter();

    if let Some(&first) = iter.next() {
        let mut prev = first;
        out.push(prev);
        for &value in iter {
            prev = alpha * value + (1.0 - alpha) * prev;
            out.push(prev);
        }
    }

    out
}

//standard ema with alpha = 2 / (span + 1)
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    ewma(values, alpha)
}

//wilder smoothing, alpha = 1 / period
pub fn wilder(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 1.0 / period.max(1) as f64;
    ewma(values, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_by_first_value() {
        let out = ema(&[10.0, 10.0, 10.0], 12);
        assert_eq!(out, vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn span_three_halves_each_step() {
        //alpha = 2 / 4 = 0.5
        let out = ema(&[0.0, 8.0, 8.0], 3);
        assert_eq!(out, vec![0.0, 4.0, 6.0]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(ewma(&[], 0.5).is_empty());
    }

    #[test]
    fn wilder_uses_reciprocal_period() {
        let out = wilder(&[0.0, 4.0], 4);
        assert_eq!(out, vec![0.0, 1.0]);
    }
}
