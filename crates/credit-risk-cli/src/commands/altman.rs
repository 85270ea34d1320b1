use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use credit_risk_core::altman::{self, RatioSet};
use credit_risk_core::evaluation::statement_warnings;
use credit_risk_core::statements::FinancialSnapshot;
use credit_risk_core::{with_metadata, FirmType};

use crate::input;

/// Statement lines for one reporting period, given as flags
#[derive(Args)]
pub struct StatementArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Firm type: 1/public-manufacturing, 2/private-or-non-manufacturing, 3/emerging-market
    #[arg(long)]
    pub firm_type: Option<FirmType>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Working capital (current assets less current liabilities)
    #[arg(long, allow_negative_numbers = true)]
    pub working_capital: Option<Decimal>,

    /// Retained earnings
    #[arg(long, allow_negative_numbers = true)]
    pub retained_earnings: Option<Decimal>,

    /// EBIT
    #[arg(long, allow_negative_numbers = true)]
    pub ebit: Option<Decimal>,

    /// Total revenue
    #[arg(long, alias = "revenue")]
    pub total_revenue: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,

    /// Stockholders' (book) equity
    #[arg(long, alias = "book-equity", allow_negative_numbers = true)]
    pub stockholders_equity: Option<Decimal>,

    /// Market value of equity (required for public manufacturing firms)
    #[arg(long, alias = "market-cap")]
    pub market_value_of_equity: Option<Decimal>,
}

/// Arguments for Altman ratio extraction
#[derive(Args)]
pub struct RatiosArgs {
    #[command(flatten)]
    pub statement: StatementArgs,
}

/// Arguments for Altman scoring
#[derive(Args)]
pub struct AltmanArgs {
    #[command(flatten)]
    pub statement: StatementArgs,
}

/// JSON input for `ratios` and the statement form of `altman`.
#[derive(Deserialize)]
struct StatementRequest {
    #[serde(default)]
    firm_type: Option<FirmType>,
    snapshot: FinancialSnapshot,
}

/// `altman` accepts either statements or precomputed ratios.
#[derive(Deserialize)]
#[serde(untagged)]
enum AltmanRequest {
    Ratios { ratios: RatioSet },
    Statements(StatementRequest),
}

pub fn run_ratios(args: RatiosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let args = args.statement;
    let (firm_type, snapshot) = match input::read_input::<StatementRequest>(args.input.as_deref())? {
        Some(req) => (pick_firm_type(args.firm_type, req.firm_type)?, req.snapshot),
        None => (
            pick_firm_type(args.firm_type, None)?,
            snapshot_from_flags(&args)?,
        ),
    };
    let ratios = altman::extract(&snapshot, firm_type)?;
    Ok(serde_json::to_value(ratios)?)
}

pub fn run_altman(args: AltmanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let args = args.statement;
    let (ratios, warnings) = match input::read_input::<AltmanRequest>(args.input.as_deref())? {
        Some(AltmanRequest::Ratios { ratios }) => (ratios, Vec::new()),
        Some(AltmanRequest::Statements(req)) => {
            let firm_type = pick_firm_type(args.firm_type, req.firm_type)?;
            (
                altman::extract(&req.snapshot, firm_type)?,
                statement_warnings(&req.snapshot),
            )
        }
        None => {
            let firm_type = pick_firm_type(args.firm_type, None)?;
            let snapshot = snapshot_from_flags(&args)?;
            (
                altman::extract(&snapshot, firm_type)?,
                statement_warnings(&snapshot),
            )
        }
    };

    // A --firm-type that disagrees with precomputed ratios is rejected by the scorer.
    let firm_type = args.firm_type.unwrap_or(ratios.firm_type);
    let result = altman::score(&ratios, firm_type)?;
    let (distress_below, safe_above) = altman::scoring::thresholds(firm_type);
    let assumptions = serde_json::json!({
        "formula": altman::scoring::formula(firm_type),
        "zones": format!("Safe > {safe_above}, Grey [{distress_below}, {safe_above}], Distress < {distress_below}"),
    });
    let methodology = result.model.clone();
    let output = with_metadata(
        &methodology,
        &assumptions,
        warnings,
        "rust_decimal_128bit",
        result,
    );
    Ok(serde_json::to_value(output)?)
}

/// Flag wins over the input file; one of them must be present.
fn pick_firm_type(
    flag: Option<FirmType>,
    from_input: Option<FirmType>,
) -> Result<FirmType, Box<dyn std::error::Error>> {
    flag.or(from_input)
        .ok_or_else(|| "--firm-type is required (or set firm_type in the input)".into())
}

fn snapshot_from_flags(args: &StatementArgs) -> Result<FinancialSnapshot, Box<dyn std::error::Error>> {
    Ok(FinancialSnapshot {
        period_end: None,
        total_assets: args
            .total_assets
            .ok_or("--total-assets is required (or provide --input)")?,
        working_capital: args
            .working_capital
            .ok_or("--working-capital is required (or provide --input)")?,
        retained_earnings: args
            .retained_earnings
            .ok_or("--retained-earnings is required (or provide --input)")?,
        ebit: args.ebit.ok_or("--ebit is required (or provide --input)")?,
        total_revenue: args
            .total_revenue
            .ok_or("--total-revenue is required (or provide --input)")?,
        total_liabilities: args
            .total_liabilities
            .ok_or("--total-liabilities is required (or provide --input)")?,
        current_liabilities: args
            .current_liabilities
            .ok_or("--current-liabilities is required (or provide --input)")?,
        stockholders_equity: args
            .stockholders_equity
            .ok_or("--stockholders-equity is required (or provide --input)")?,
        market_value_of_equity: args.market_value_of_equity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_statement_request_shape() {
        let req: AltmanRequest = serde_json::from_str(
            r#"{"firm_type": "emerging_market", "snapshot": {
                "total_assets": "1000", "working_capital": "100", "retained_earnings": "50",
                "ebit": "20", "total_revenue": "1200", "total_liabilities": "500",
                "current_liabilities": "200", "stockholders_equity": "500"}}"#,
        )
        .unwrap();
        match req {
            AltmanRequest::Statements(s) => {
                assert_eq!(s.firm_type, Some(FirmType::EmergingMarket));
                assert_eq!(s.snapshot.ebit, dec!(20));
            }
            AltmanRequest::Ratios { .. } => panic!("Expected statements"),
        }
    }

    #[test]
    fn test_ratio_request_shape() {
        let req: AltmanRequest = serde_json::from_str(
            r#"{"ratios": {"firm_type": "public_manufacturing",
                "x1": "0.10", "x2": "0.05", "x3": "0.02", "x4": "0.8", "x5": "1.2"}}"#,
        )
        .unwrap();
        match req {
            AltmanRequest::Ratios { ratios } => {
                let out = altman::score(&ratios, ratios.firm_type).unwrap();
                assert_eq!(out.score, dec!(1.936));
            }
            AltmanRequest::Statements(_) => panic!("Expected ratios"),
        }
    }

    #[test]
    fn test_flag_firm_type_wins() {
        let ft = pick_firm_type(Some(FirmType::EmergingMarket), Some(FirmType::PublicManufacturing))
            .unwrap();
        assert_eq!(ft, FirmType::EmergingMarket);
        assert!(pick_firm_type(None, None).is_err());
    }
}
