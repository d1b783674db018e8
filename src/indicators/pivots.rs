use crate::data::Bar;
use crate::error::{require_len, CoreResult};
use serde::{Deserialize, Serialize};

//support and resistance levels derived from one completed period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotLevels {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

//where a price sits relative to the pivot levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotZone {
    AboveR1,
    BelowS1,
    BetweenPivotAndR1,
    BetweenS1AndPivot,
    Neutral,
}

impl PivotZone {
    pub fn describe(&self) -> &'static str {
        match self {
            PivotZone::AboveR1 => "above R1 (breakout, bullish)",
            PivotZone::BelowS1 => "below S1 (breakdown, bearish)",
            PivotZone::BetweenPivotAndR1 => "between pivot and R1 (mildly bullish)",
            PivotZone::BetweenS1AndPivot => "between S1 and pivot (mildly bearish)",
            PivotZone::Neutral => "at pivot (neutral)",
        }
    }
}

//pivot levels from a reference bar's high, low and close
pub fn fibonacci_pivots(bar: &Bar) -> PivotLevels {
    let (h, l, c) = (bar.high, bar.low, bar.close);
    let pivot = (h + l + c) / 3.0;
    let range = h - l;

    PivotLevels {
        pivot,
        r1: 2.0 * pivot - l,
        s1: 2.0 * pivot - h,
        r2: pivot + range,
        s2: pivot - range,
        r3: h + 2.0 * (pivot - l),
        s3: l - 2.0 * (h - pivot),
    }
}

//levels from the most recent complete bar; the last bar is still forming
pub fn pivots_from_series(bars: &[Bar]) -> CoreResult<PivotLevels> {
    require_len(bars.len(), 2)?;
    Ok(fibonacci_pivots(&bars[bars.len() - 2]))
}

pub fn classify_price(price: f64, levels: &PivotLevels) -> PivotZone {
    if price > levels.r1 {
        PivotZone::AboveR1
    } else if price < levels.s1 {
        PivotZone::BelowS1
    } else if price > levels.pivot {
        PivotZone::BetweenPivotAndR1
    } else if price < levels.pivot {
        PivotZone::BetweenS1AndPivot
    } else {
        PivotZone::Neutral
    }
}
