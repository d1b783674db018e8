use crate::error::{CoreError, CoreResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

//immutable risk limits, loaded once by the surrounding process
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    //fraction of balance put at risk per trade, in (0, 1]
    pub max_risk_per_trade: f64,

    //leverage cap, >= 1
    pub max_leverage: u32,

    //fraction of the day's starting balance that may be lost, in (0, 1]
    pub daily_loss_limit: f64,
}

impl Default for RiskProfile {
    fn default() -> Self {
        RiskProfile {
            max_risk_per_trade: 0.02,
            max_leverage: 10,
            daily_loss_limit: 0.05,
        }
    }
}

impl RiskProfile {
    //creates a validated profile
    pub fn new(max_risk_per_trade: f64, max_leverage: u32, daily_loss_limit: f64) -> CoreResult<Self> {
        let profile = RiskProfile {
            max_risk_per_trade,
            max_leverage,
            daily_loss_limit,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.max_risk_per_trade > 0.0 && self.max_risk_per_trade <= 1.0) {
            return Err(CoreError::InvalidRiskProfile(format!(
                "max_risk_per_trade must be in (0, 1], got {}",
                self.max_risk_per_trade
            )));
        }

        if self.max_leverage < 1 {
            return Err(CoreError::InvalidRiskProfile(
                "max_leverage must be at least 1".to_string(),
            ));
        }

        if !(self.daily_loss_limit > 0.0 && self.daily_loss_limit <= 1.0) {
            return Err(CoreError::InvalidRiskProfile(format!(
                "daily_loss_limit must be in (0, 1], got {}",
                self.daily_loss_limit
            )));
        }

        Ok(())
    }

    //load a profile from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read risk profile {:?}", path))?;
        let profile: RiskProfile = serde_json::from_str(&contents)
            .context(format!("Failed to parse risk profile {:?}", path))?;
        profile.validate()?;
        Ok(profile)
    }

    //save the profile to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
