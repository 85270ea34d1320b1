//! Engine configuration.
//!
//! Only the structural model has tunable inputs; the Altman coefficients and
//! all zone thresholds are fixed constants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Rate, Years};
use crate::{CreditRiskError, CreditRiskResult};

pub const DEFAULT_RISK_FREE_RATE: Rate = dec!(0.04);
pub const DEFAULT_HORIZON_YEARS: Years = dec!(2);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MertonConfig {
    /// Annualized risk-free rate (decimal).
    pub risk_free_rate: Rate,
    /// Horizon over which default is assessed.
    pub horizon_years: Years,
}

impl Default for MertonConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub merton: MertonConfig,
}

impl MertonConfig {
    /// Only the structural path consumes these values, so a bad setting is
    /// reported as a model-parameter error on that path alone.
    pub fn validate(&self) -> CreditRiskResult<()> {
        if self.horizon_years <= Decimal::ZERO {
            return Err(CreditRiskError::InvalidModelParameter {
                field: "merton.horizon_years".into(),
                reason: "Horizon must be positive.".into(),
            });
        }
        if self.risk_free_rate.abs() >= Decimal::ONE {
            return Err(CreditRiskError::InvalidModelParameter {
                field: "merton.risk_free_rate".into(),
                reason: "Risk-free rate must be a decimal (0.04 = 4%), not a percentage.".into(),
            });
        }
        Ok(())
    }
}

impl EngineConfig {
    pub fn validate(&self) -> CreditRiskResult<()> {
        self.merton.validate()
    }
}
