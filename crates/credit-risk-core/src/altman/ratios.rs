use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statements::financials::require;
use crate::statements::{CompanyFinancials, FinancialSnapshot};
use crate::types::{FirmType, Money};
use crate::{CreditRiskError, CreditRiskResult};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The five Altman ratios, as decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
    /// Firm type the ratios were extracted for; fixes the X4 definition.
    pub firm_type: FirmType,
    /// Working capital / total assets (liquidity).
    pub x1: Decimal,
    /// Retained earnings / total assets (cumulative profitability).
    pub x2: Decimal,
    /// EBIT / total assets (earning power).
    pub x3: Decimal,
    /// Market or book equity / total liabilities (solvency buffer).
    pub x4: Decimal,
    /// Revenue / total assets (turnover). Absent for emerging markets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x5: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the Altman ratios from one reporting period.
///
/// Both denominators are checked before anything is divided, so degenerate
/// statements surface as `DivisionByZero` rather than a partially built set.
pub fn extract(snapshot: &FinancialSnapshot, firm_type: FirmType) -> CreditRiskResult<RatioSet> {
    require_positive(snapshot.total_assets, "total_assets")?;
    require_positive(snapshot.total_liabilities, "total_liabilities")?;

    let equity = if firm_type.uses_market_equity() {
        require(snapshot.market_value_of_equity, "market_value_of_equity")?
    } else {
        snapshot.stockholders_equity
    };
    let lines = AltmanLines {
        total_assets: snapshot.total_assets,
        total_liabilities: snapshot.total_liabilities,
        working_capital: snapshot.working_capital,
        retained_earnings: snapshot.retained_earnings,
        ebit: snapshot.ebit,
        equity,
        total_revenue: firm_type
            .includes_turnover()
            .then_some(snapshot.total_revenue),
    };
    Ok(lines.ratios(firm_type))
}

/// Derive the Altman ratios straight from a provider record.
///
/// Only the lines the firm type's formula reads are required: book equity is
/// ignored when market equity is used, revenue is ignored for emerging
/// markets, and current liabilities are never read.
pub fn extract_financials(
    financials: &CompanyFinancials,
    firm_type: FirmType,
) -> CreditRiskResult<RatioSet> {
    let total_assets = require(financials.total_assets, "total_assets")?;
    let total_liabilities = require(financials.total_liabilities, "total_liabilities")?;
    require_positive(total_assets, "total_assets")?;
    require_positive(total_liabilities, "total_liabilities")?;

    let equity = if firm_type.uses_market_equity() {
        require(financials.market_value_of_equity(), "market_value_of_equity")?
    } else {
        require(financials.stockholders_equity, "stockholders_equity")?
    };
    let total_revenue = if firm_type.includes_turnover() {
        Some(require(financials.total_revenue, "total_revenue")?)
    } else {
        None
    };
    let lines = AltmanLines {
        total_assets,
        total_liabilities,
        working_capital: require(financials.working_capital, "working_capital")?,
        retained_earnings: require(financials.retained_earnings, "retained_earnings")?,
        ebit: require(financials.ebit, "ebit")?,
        equity,
        total_revenue,
    };
    Ok(lines.ratios(firm_type))
}

/// Statement lines one Altman variant reads, with X4's numerator already
/// chosen and revenue present only when X5 is part of the formula. Both
/// denominators are positive.
struct AltmanLines {
    total_assets: Money,
    total_liabilities: Money,
    working_capital: Money,
    retained_earnings: Money,
    ebit: Money,
    equity: Money,
    total_revenue: Option<Money>,
}

impl AltmanLines {
    fn ratios(&self, firm_type: FirmType) -> RatioSet {
        let ta = self.total_assets;
        RatioSet {
            firm_type,
            x1: self.working_capital / ta,
            x2: self.retained_earnings / ta,
            x3: self.ebit / ta,
            x4: self.equity / self.total_liabilities,
            x5: self.total_revenue.map(|revenue| revenue / ta),
        }
    }
}

fn require_positive(denominator: Decimal, field: &str) -> CreditRiskResult<()> {
    if denominator <= Decimal::ZERO {
        return Err(CreditRiskError::DivisionByZero {
            context: format!("{field} must be positive (got {denominator})"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
