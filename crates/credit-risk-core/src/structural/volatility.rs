use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::statements::{AssetHistory, ReportingFrequency};
use crate::types::Rate;
use crate::{CreditRiskError, CreditRiskResult};

/// Fewest asset values that yield two period-over-period changes, the
/// minimum for a sample standard deviation.
pub const MIN_VOLATILITY_POINTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityEstimate {
    /// Chronological `(A[t] - A[t-1]) / A[t-1]` values.
    pub period_changes: Vec<Rate>,
    /// Sample standard deviation (n - 1) of `period_changes`.
    pub period_volatility: Rate,
    /// `period_volatility * sqrt(periods per year)`.
    pub annualized_volatility: Rate,
    pub frequency: ReportingFrequency,
}

/// Asset-volatility proxy from a short total-asset series.
///
/// Fails rather than returning zero: a flat series cannot drive the
/// structural model, which divides by this figure.
pub fn estimate_asset_volatility(history: &AssetHistory) -> CreditRiskResult<VolatilityEstimate> {
    let values = history.values();
    if values.len() < MIN_VOLATILITY_POINTS {
        return Err(CreditRiskError::InsufficientHistory {
            provided: values.len(),
            required: MIN_VOLATILITY_POINTS,
        });
    }

    let period_changes = values
        .windows(2)
        .map(|w| period_change(w[0], w[1]))
        .collect::<CreditRiskResult<Vec<Rate>>>()?;

    let period_volatility = sample_std_dev(&period_changes)?;
    if period_volatility.is_zero() {
        return Err(CreditRiskError::DegenerateVolatility);
    }

    let annualized_volatility = match history.frequency() {
        ReportingFrequency::Annual => period_volatility,
        freq => period_volatility * sqrt(Decimal::from(freq.periods_per_year()))?,
    };

    tracing::debug!(
        observations = period_changes.len(),
        period_volatility = %period_volatility,
        annualized_volatility = %annualized_volatility,
        "asset volatility estimated"
    );

    Ok(VolatilityEstimate {
        period_changes,
        period_volatility,
        annualized_volatility,
        frequency: history.frequency(),
    })
}

/// Annualized volatility only.
pub fn estimate(history: &AssetHistory) -> CreditRiskResult<Rate> {
    estimate_asset_volatility(history).map(|e| e.annualized_volatility)
}

fn period_change(prior: Decimal, current: Decimal) -> CreditRiskResult<Rate> {
    if prior <= Decimal::ZERO {
        return Err(CreditRiskError::DivisionByZero {
            context: format!("asset history: prior-period total assets must be positive (got {prior})"),
        });
    }
    Ok((current - prior) / prior)
}

fn sample_std_dev(xs: &[Decimal]) -> CreditRiskResult<Decimal> {
    let n = Decimal::from(xs.len());
    let mean = xs.iter().copied().sum::<Decimal>() / n;
    let sum_sq: Decimal = xs.iter().map(|x| (*x - mean) * (*x - mean)).sum();
    sqrt(sum_sq / (n - Decimal::ONE))
}

fn sqrt(x: Decimal) -> CreditRiskResult<Decimal> {
    x.sqrt().ok_or_else(|| CreditRiskError::InvalidModelParameter {
        field: "asset_volatility".into(),
        reason: format!("square root of {x} is undefined"),
    })
}
