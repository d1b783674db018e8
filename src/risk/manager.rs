use crate::config::RiskProfile;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

//inputs for one sizing decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSizingRequest {
    pub account_balance: f64,
    pub entry_price: f64,
    pub stop_loss_price: f64,
}

impl PositionSizingRequest {
    //creates a request, rejecting non-positive or non-finite values
    pub fn new(account_balance: f64, entry_price: f64, stop_loss_price: f64) -> CoreResult<Self> {
        let request = PositionSizingRequest {
            account_balance,
            entry_price,
            stop_loss_price,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> CoreResult<()> {
        validate_sizing_inputs(self.account_balance, self.entry_price, self.stop_loss_price)
    }
}

//balance and prices must all be finite and strictly positive
fn validate_sizing_inputs(balance: f64, entry: f64, stop: f64) -> CoreResult<()> {
    let fields = [
        ("account_balance", balance),
        ("entry_price", entry),
        ("stop_loss_price", stop),
    ];

    for (name, value) in fields {
        if !(value.is_finite() && value > 0.0) {
            return Err(CoreError::InvalidRiskInput(format!(
                "{} must be a positive number, got {}",
                name, value
            )));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSizingResult {
    pub contracts: f64,
    pub leverage_used: u32,
    pub margin_required: f64,
}

//converts balance, leverage and stop distance into a bounded position size
#[derive(Debug, Clone)]
pub struct RiskManager {
    profile: RiskProfile,

    //current leverage, starts at 1x and only changes through set_leverage
    leverage: u32,
}

impl RiskManager {
    pub fn new(profile: RiskProfile) -> Self {
        RiskManager {
            profile,
            leverage: 1,
        }
    }

    pub fn profile(&self) -> &RiskProfile {
        &self.profile
    }

    pub fn leverage(&self) -> u32 {
        self.leverage
    }

    //stores the requested leverage capped at the profile maximum, returns the stored value
    pub fn set_leverage(&mut self, requested: u32) -> u32 {
        self.leverage = self.cap_leverage(requested);
        debug!(
            requested,
            applied = self.leverage,
            max = self.profile.max_leverage,
            "leverage updated"
        );
        self.leverage
    }

    //contracts to trade at the stored leverage
    pub fn position_size(&self, entry: f64, stop: f64, balance: f64) -> CoreResult<f64> {
        self.position_size_at(entry, stop, balance, self.leverage)
    }

    //contracts to trade at an explicit leverage (capped at the profile maximum)
    pub fn position_size_at(
        &self,
        entry: f64,
        stop: f64,
        balance: f64,
        leverage: u32,
    ) -> CoreResult<f64> {
        validate_sizing_inputs(balance, entry, stop)?;

        let risk_amount = balance * self.profile.max_risk_per_trade;
        let risk_per_contract = (entry - stop).abs();

        if risk_per_contract == 0.0 {
            warn!(entry, stop, "entry equals stop, sizing to zero contracts");
            return Ok(0.0);
        }

        Ok((risk_amount / risk_per_contract) * self.cap_leverage(leverage) as f64)
    }

    //margin needed to hold a position; zero leverage yields zero
    pub fn required_margin(position_size: f64, entry: f64, leverage: u32) -> f64 {
        if leverage == 0 {
            return 0.0;
        }
        (position_size * entry) / leverage as f64
    }

    //full sizing decision at the stored leverage
    pub fn size(&self, request: &PositionSizingRequest) -> CoreResult<PositionSizingResult> {
        let leverage_used = self.leverage;
        let contracts = self.position_size_at(
            request.entry_price,
            request.stop_loss_price,
            request.account_balance,
            leverage_used,
        )?;
        let margin_required = Self::required_margin(contracts, request.entry_price, leverage_used);

        Ok(PositionSizingResult {
            contracts,
            leverage_used,
            margin_required,
        })
    }

    //true once the loss since the start of the day reaches the daily limit
    pub fn daily_loss_breached(&self, day_start_balance: f64, current_balance: f64) -> bool {
        if day_start_balance <= 0.0 {
            return false;
        }
        let loss_fraction = (day_start_balance - current_balance) / day_start_balance;
        loss_fraction >= self.profile.daily_loss_limit
    }

    fn cap_leverage(&self, requested: u32) -> u32 {
        requested.min(self.profile.max_leverage)
    }
}
