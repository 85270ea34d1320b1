use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::provider::FinancialDataProvider;
use crate::altman::{self, AltmanResult};
use crate::config::{EngineConfig, MertonConfig};
use crate::decision::{combine, CreditDecision};
use crate::statements::financials::require;
use crate::statements::{AssetHistory, CompanyFinancials, FinancialSnapshot};
use crate::structural::{self, MertonInputs, MertonResult};
use crate::types::{with_metadata, ComputationOutput, FirmType, Money, Ticker};
use crate::CreditRiskResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Fully populated evaluation: both model results and the merged decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditAssessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<Ticker>,
    pub firm_type: FirmType,
    pub altman: AltmanResult,
    pub merton: MertonResult,
    pub merton_inputs: MertonInputs,
    pub decision: CreditDecision,
}

/// Structural path output together with the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MertonOutcome {
    pub inputs: MertonInputs,
    pub result: MertonResult,
}

/// Result of each scoring path, kept separate so a caller can decide
/// whether a partial answer is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOutcomes {
    pub ticker: Option<Ticker>,
    pub firm_type: FirmType,
    pub altman: CreditRiskResult<AltmanResult>,
    pub merton: CreditRiskResult<MertonOutcome>,
    /// Notes on unusual statement lines that are present.
    pub warnings: Vec<String>,
}

impl PathOutcomes {
    /// Combined decision. Needs both zones, so fails with the first path error.
    pub fn decision(&self) -> CreditRiskResult<CreditDecision> {
        match (&self.altman, &self.merton) {
            (Ok(a), Ok(m)) => Ok(combine(a.zone, m.result.zone)),
            (Err(e), _) | (_, Err(e)) => Err(e.clone()),
        }
    }

    /// Altman result on its own, for callers willing to proceed without the
    /// structural model.
    pub fn altman_only(&self) -> CreditRiskResult<&AltmanResult> {
        self.altman.as_ref().map_err(Clone::clone)
    }

    /// Strict result envelope; fails if either path failed.
    pub fn into_output(
        self,
        config: &EngineConfig,
    ) -> CreditRiskResult<ComputationOutput<CreditAssessment>> {
        envelope(self, config)
    }

    pub fn into_assessment(self) -> CreditRiskResult<CreditAssessment> {
        let altman = self.altman?;
        let merton = self.merton?;
        let decision = combine(altman.zone, merton.result.zone);
        Ok(CreditAssessment {
            ticker: self.ticker,
            firm_type: self.firm_type,
            altman,
            merton: merton.result,
            merton_inputs: merton.inputs,
            decision,
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run both scoring paths on an already assembled snapshot and history.
///
/// Asset value is the snapshot's total assets; the default barrier is its
/// current liabilities. An invalid structural configuration fails the Merton
/// path only.
pub fn assess(
    snapshot: &FinancialSnapshot,
    history: &AssetHistory,
    firm_type: FirmType,
    config: &EngineConfig,
) -> CreditRiskResult<PathOutcomes> {
    let (altman, merton) = join(
        || altman_path(snapshot, firm_type),
        || {
            merton_path(
                snapshot.total_assets,
                snapshot.current_liabilities,
                history,
                &config.merton,
            )
        },
    );
    Ok(PathOutcomes {
        ticker: None,
        firm_type,
        altman,
        merton,
        warnings: statement_warnings(snapshot),
    })
}

/// Run both scoring paths on a provider record.
///
/// An incomplete record only fails the path that needs the missing line.
pub fn assess_financials(
    financials: &CompanyFinancials,
    firm_type: FirmType,
    config: &EngineConfig,
) -> CreditRiskResult<PathOutcomes> {
    let (altman, merton) = join(
        || {
            let ratios = altman::extract_financials(financials, firm_type)?;
            altman::score(&ratios, firm_type)
        },
        || {
            let history = financials.asset_history()?;
            let asset_value = require(financials.total_assets, "total_assets")?;
            let barrier = require(financials.current_liabilities, "current_liabilities")?;
            merton_path(asset_value, barrier, &history, &config.merton)
        },
    );

    Ok(PathOutcomes {
        ticker: Some(financials.ticker.clone()),
        firm_type,
        altman,
        merton,
        warnings: record_warnings(financials),
    })
}

/// Fetch a company from the provider and report both paths.
pub fn assess_ticker<P: FinancialDataProvider + ?Sized>(
    provider: &P,
    ticker: &str,
    firm_type: FirmType,
    config: &EngineConfig,
) -> CreditRiskResult<PathOutcomes> {
    let ticker = Ticker::new(ticker)?;
    let financials = provider.fetch(&ticker)?;
    assess_financials(&financials, firm_type, config)
}

/// Strict evaluation of a provider record: fails if either path fails.
#[tracing::instrument(skip(financials, config), fields(ticker = %financials.ticker))]
pub fn evaluate_financials(
    financials: &CompanyFinancials,
    firm_type: FirmType,
    config: &EngineConfig,
) -> CreditRiskResult<ComputationOutput<CreditAssessment>> {
    assess_financials(financials, firm_type, config)?.into_output(config)
}

/// `evaluate(ticker, firm_type)`: fetch, score both paths, combine.
#[tracing::instrument(skip(provider, config))]
pub fn evaluate<P: FinancialDataProvider + ?Sized>(
    provider: &P,
    ticker: &str,
    firm_type: FirmType,
    config: &EngineConfig,
) -> CreditRiskResult<ComputationOutput<CreditAssessment>> {
    assess_ticker(provider, ticker, firm_type, config)?.into_output(config)
}

/// Methodology and assumption record attached to every evaluation.
pub fn assumptions(firm_type: FirmType, config: &MertonConfig) -> serde_json::Value {
    let (distress_below, safe_above) = altman::scoring::thresholds(firm_type);
    serde_json::json!({
        "altman_formula": altman::scoring::formula(firm_type),
        "altman_zones": format!("Safe > {safe_above}, Grey [{distress_below}, {safe_above}], Distress < {distress_below}"),
        "merton_formula": "DD = (ln(V/D) + (r - sigma^2/2)*T) / (sigma*sqrt(T)); PD = 1 - N(DD)",
        "merton_zones": "Safe PD < 1%, Grey 1% <= PD < 15%, Distress PD >= 15%",
        "asset_value": "total assets, latest period",
        "default_barrier": "current liabilities, latest period",
        "asset_volatility": "sample standard deviation (n-1) of period-over-period total asset changes",
        "normal_cdf": "0.5 * erfc(-x / sqrt 2), statrs, double precision",
        "risk_free_rate": config.risk_free_rate,
        "horizon_years": config.horizon_years,
        "decision": "any Distress => Dismissed; Safe+Safe => Approved; Safe+Grey => Approved with Caution; Grey+Grey => Analysis Required"
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn altman_path(snapshot: &FinancialSnapshot, firm_type: FirmType) -> CreditRiskResult<AltmanResult> {
    let ratios = altman::extract(snapshot, firm_type)?;
    altman::score(&ratios, firm_type)
}

fn merton_path(
    asset_value: Money,
    default_barrier: Money,
    history: &AssetHistory,
    config: &MertonConfig,
) -> CreditRiskResult<MertonOutcome> {
    config.validate()?;
    let sigma = structural::estimate(history)?;
    let inputs = MertonInputs::with_config(asset_value, default_barrier, sigma, config);
    let result = structural::score(&inputs)?;
    Ok(MertonOutcome { inputs, result })
}

fn envelope(
    outcomes: PathOutcomes,
    config: &EngineConfig,
) -> CreditRiskResult<ComputationOutput<CreditAssessment>> {
    if let Err(e) = &outcomes.altman {
        tracing::warn!(error = %e, "altman path failed");
    }
    if let Err(e) = &outcomes.merton {
        tracing::warn!(error = %e, "merton path failed");
    }

    let firm_type = outcomes.firm_type;
    let warnings = outcomes.warnings.clone();
    let assessment = outcomes.into_assessment()?;

    tracing::info!(
        altman_zone = %assessment.altman.zone,
        merton_zone = %assessment.merton.zone,
        decision = %assessment.decision,
        "credit decision reached"
    );

    Ok(with_metadata(
        "Altman Z-Score with Merton distance-to-default",
        &assumptions(firm_type, &config.merton),
        warnings,
        "rust_decimal_128bit ratios, ieee754_f64 structural model",
        assessment,
    ))
}

/// Notes on statement lines that are legal but worth a reader's attention.
pub fn statement_warnings(snapshot: &FinancialSnapshot) -> Vec<String> {
    line_warnings(
        Some(snapshot.working_capital),
        Some(snapshot.ebit),
        Some(snapshot.stockholders_equity),
        Some(snapshot.current_liabilities),
    )
}

/// Same notes for a provider record; absent lines are skipped.
pub fn record_warnings(financials: &CompanyFinancials) -> Vec<String> {
    line_warnings(
        financials.working_capital,
        financials.ebit,
        financials.stockholders_equity,
        financials.current_liabilities,
    )
}

fn line_warnings(
    working_capital: Option<Money>,
    ebit: Option<Money>,
    stockholders_equity: Option<Money>,
    current_liabilities: Option<Money>,
) -> Vec<String> {
    let negative = |line: Option<Money>| line.is_some_and(|v| v < Decimal::ZERO);
    let mut warnings = Vec::new();
    if negative(working_capital) {
        warnings.push("Negative working capital: X1 is negative.".to_string());
    }
    if negative(ebit) {
        warnings.push("Negative EBIT: the firm is loss-making at the operating level.".to_string());
    }
    if negative(stockholders_equity) {
        warnings.push("Negative book equity: liabilities exceed assets on the balance sheet.".to_string());
    }
    if current_liabilities.is_some_and(|v| v <= Decimal::ZERO) {
        warnings.push("Current liabilities are not positive; the default barrier is undefined.".to_string());
    }
    warnings
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
