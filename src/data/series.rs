use crate::data::Bar;
use crate::error::{CoreError, CoreResult};

//extracts the closing price series aligned 1:1 with the bars
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

//rejects windows whose timestamps are not strictly increasing
pub fn ensure_strictly_increasing(bars: &[Bar]) -> CoreResult<()> {
    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(CoreError::UnorderedBars { index: i + 1 });
        }
    }
    Ok(())
}

//rejects windows holding a non-finite or non-positive price
pub fn ensure_valid_prices(bars: &[Bar]) -> CoreResult<()> {
    match bars.iter().position(|b| !b.has_valid_prices()) {
        Some(index) => Err(CoreError::InvalidBar { index }),
        None => Ok(()),
    }
}
