use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BarError {
    #[error("Invalid OHLC values: high ({high}) < low ({low})")]
    InvalidHighLow { high: f64, low: f64 },
    #[error("Invalid OHLC values: close ({close}) outside high-low range [{low}, {high}]")]
    InvalidClose { close: f64, high: f64, low: f64 },
    #[error("Invalid OHLC values: open ({open}) outside high-low range [{low}, {high}]")]
    InvalidOpen { open: f64, high: f64, low: f64 },
    #[error("Negative volume: {0}")]
    NegativeVolume(f64),
    #[error("Non-finite {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("Non-positive {field}: {value}")]
    NonPositivePrice { field: &'static str, value: f64 },
}

//a single ohlcv candle of a perpetual or futures contract
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    //creates a new Bar with validation
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, BarError> {
        let prices = [("open", open), ("high", high), ("low", low), ("close", close)];

        for (field, value) in prices.iter().copied().chain([("volume", volume)]) {
            if !value.is_finite() {
                return Err(BarError::NonFinite { field, value });
            }
        }

        for (field, value) in prices {
            if value <= 0.0 {
                return Err(BarError::NonPositivePrice { field, value });
            }
        }

        if high < low {
            return Err(BarError::InvalidHighLow { high, low });
        }

        if close < low || close > high {
            return Err(BarError::InvalidClose { close, high, low });
        }

        if open < low || open > high {
            return Err(BarError::InvalidOpen { open, high, low });
        }

        if volume < 0.0 {
            return Err(BarError::NegativeVolume(volume));
        }

        Ok(Self::new_unchecked(timestamp, open, high, low, close, volume))
    }

    //creates a Bar without validation
    pub fn new_unchecked(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    //true when every price is finite and positive
    pub fn has_valid_prices(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
    }

    //returns the typical price (HLC/3)
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    //returns the range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
    }

    #[test]
    fn rejects_inverted_high_low() {
        let err = Bar::new(ts(), 100.0, 90.0, 110.0, 100.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            BarError::InvalidHighLow {
                high: 90.0,
                low: 110.0
            }
        );
    }

    #[test]
    fn rejects_close_outside_range() {
        let err = Bar::new(ts(), 100.0, 110.0, 90.0, 111.0, 1.0).unwrap_err();
        assert!(matches!(err, BarError::InvalidClose { .. }));
    }

    #[test]
    fn rejects_negative_volume() {
        let err = Bar::new(ts(), 100.0, 110.0, 90.0, 100.0, -5.0).unwrap_err();
        assert_eq!(err, BarError::NegativeVolume(-5.0));
    }

    #[test]
    fn rejects_nan_prices() {
        let err = Bar::new(ts(), 100.0, 110.0, 90.0, f64::NAN, 1.0).unwrap_err();
        assert!(matches!(err, BarError::NonFinite { field: "close", .. }));

        let err = Bar::new(ts(), 100.0, f64::INFINITY, 90.0, 100.0, 1.0).unwrap_err();
        assert!(matches!(err, BarError::NonFinite { field: "high", .. }));

        let err = Bar::new(ts(), 100.0, 110.0, 90.0, 100.0, f64::NAN).unwrap_err();
        assert!(matches!(err, BarError::NonFinite { field: "volume", .. }));
    }

    #[test]
    fn rejects_zero_and_negative_prices() {
        let err = Bar::new(ts(), 0.0, 0.0, 0.0, 0.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            BarError::NonPositivePrice {
                field: "open",
                value: 0.0
            }
        );

        let err = Bar::new(ts(), 1.0, 2.0, -1.0, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, BarError::NonPositivePrice { field: "low", .. }));
    }

    #[test]
    fn unchecked_bar_reports_invalid_prices() {
        assert!(!Bar::new_unchecked(ts(), 1.0, 1.0, 1.0, 0.0, 1.0).has_valid_prices());
        assert!(!Bar::new_unchecked(ts(), 1.0, f64::NAN, 1.0, 1.0, 1.0).has_valid_prices());
        assert!(Bar::new_unchecked(ts(), 1.0, 1.0, 1.0, 1.0, 0.0).has_valid_prices());
    }

    #[test]
    fn typical_price_and_range() {
        let bar = Bar::new(ts(), 95.0, 110.0, 90.0, 100.0, 10.0).unwrap();
        assert_eq!(bar.typical_price(), 100.0);
        assert_eq!(bar.range(), 20.0);
    }
}
