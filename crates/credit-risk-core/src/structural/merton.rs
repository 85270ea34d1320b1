//! Closed-form Merton distance-to-default.
//!
//! Inputs are carried as `Decimal` like every other money figure in the
//! crate; the log, square root and normal tail are evaluated in `f64` so the
//! tail probability comes from `statrs`' complementary error function rather
//! than a polynomial approximation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

use crate::config::MertonConfig;
use crate::types::{Money, Rate, Years, Zone};
use crate::{CreditRiskError, CreditRiskResult};

/// Default probabilities below this are Safe.
pub const PD_SAFE_BELOW: f64 = 0.01;
/// Default probabilities at or above this are Distress.
pub const PD_DISTRESS_FROM: f64 = 0.15;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MertonInputs {
    /// Current asset value V.
    pub asset_value: Money,
    /// Default barrier D.
    pub default_barrier: Money,
    /// Annualized asset volatility σ (decimal, e.g. 0.25 = 25%).
    pub asset_volatility: Rate,
    /// Annualized risk-free rate r (decimal).
    pub risk_free_rate: Rate,
    /// Horizon T in years.
    pub horizon_years: Years,
}

impl MertonInputs {
    pub fn with_config(
        asset_value: Money,
        default_barrier: Money,
        asset_volatility: Rate,
        config: &MertonConfig,
    ) -> Self {
        Self {
            asset_value,
            default_barrier,
            asset_volatility,
            risk_free_rate: config.risk_free_rate,
            horizon_years: config.horizon_years,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MertonResult {
    pub distance_to_default: f64,
    /// `1 - Φ(DD)`, in [0, 1].
    pub default_probability: f64,
    pub zone: Zone,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// DD = (ln(V/D) + (r − σ²/2)·T) / (σ·√T), PD = 1 − Φ(DD).
pub fn score(inputs: &MertonInputs) -> CreditRiskResult<MertonResult> {
    validate(inputs)?;

    let v = to_f64(inputs.asset_value, "asset_value")?;
    let d = to_f64(inputs.default_barrier, "default_barrier")?;
    let sigma = to_f64(inputs.asset_volatility, "asset_volatility")?;
    let r = to_f64(inputs.risk_free_rate, "risk_free_rate")?;
    let t = to_f64(inputs.horizon_years, "horizon_years")?;

    let dd = distance_to_default(v, d, sigma, r, t);
    if !dd.is_finite() {
        return Err(CreditRiskError::InvalidModelParameter {
            field: "distance_to_default".into(),
            reason: format!("evaluated to {dd}"),
        });
    }

    let pd = upper_tail(dd);
    let zone = classify(pd);

    tracing::debug!(
        distance_to_default = dd,
        default_probability = pd,
        zone = %zone,
        "merton score computed"
    );

    Ok(MertonResult {
        distance_to_default: dd,
        default_probability: pd,
        zone,
    })
}

/// Zone from a default probability: Safe below 1%, Distress from 15%.
pub fn classify(default_probability: f64) -> Zone {
    if default_probability < PD_SAFE_BELOW {
        Zone::Safe
    } else if default_probability < PD_DISTRESS_FROM {
        Zone::Grey
    } else {
        Zone::Distress
    }
}

/// Standard normal CDF Φ(x) via `erfc`, accurate to double precision.
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

fn distance_to_default(v: f64, d: f64, sigma: f64, r: f64, t: f64) -> f64 {
    ((v / d).ln() + (r - sigma * sigma / 2.0) * t) / (sigma * t.sqrt())
}

/// 1 − Φ(x) computed directly, without cancellation for large x.
fn upper_tail(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

fn to_f64(value: Decimal, field: &str) -> CreditRiskResult<f64> {
    value
        .to_f64()
        .filter(|x| x.is_finite())
        .ok_or_else(|| CreditRiskError::InvalidModelParameter {
            field: field.into(),
            reason: format!("{value} is not representable as a float"),
        })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(input: &MertonInputs) -> CreditRiskResult<()> {
    if input.asset_value <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidAssetOrBarrier {
            field: "asset_value".into(),
            value: input.asset_value.to_string(),
        });
    }
    if input.default_barrier <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidAssetOrBarrier {
            field: "default_barrier".into(),
            value: input.default_barrier.to_string(),
        });
    }
    if input.asset_volatility <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidModelParameter {
            field: "asset_volatility".into(),
            reason: "Asset volatility must be positive.".into(),
        });
    }
    if input.horizon_years <= Decimal::ZERO {
        return Err(CreditRiskError::InvalidModelParameter {
            field: "horizon_years".into(),
            reason: "Horizon must be positive.".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
