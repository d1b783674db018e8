pub mod manager;

pub use manager::{PositionSizingRequest, PositionSizingResult, RiskManager};
