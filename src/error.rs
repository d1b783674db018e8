use thiserror::Error;

//errors surfaced by the numeric core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unsupported strategy: {0} (expected one of: ema, macd)")]
    InvalidStrategy(String),
    #[error("Insufficient data: need at least {required} values, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[error("Bars out of order: timestamp at index {index} does not increase")]
    UnorderedBars { index: usize },
    #[error("Invalid bar at index {index}: prices must be finite and positive")]
    InvalidBar { index: usize },
    #[error("Invalid risk input: {0}")]
    InvalidRiskInput(String),
    #[error("Invalid risk profile: {0}")]
    InvalidRiskProfile(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

//fails fast when a window is shorter than required
pub(crate) fn require_len(actual: usize, required: usize) -> CoreResult<()> {
    if actual < required {
        return Err(CoreError::InsufficientData { required, actual });
    }
    Ok(())
}
