use clap::Args;
use serde_json::Value;

use credit_risk_core::evaluation::{self, PathOutcomes};
use credit_risk_core::statements::CompanyFinancials;
use credit_risk_core::{with_metadata, CreditRiskError, EngineConfig, FirmType};

use super::ConfigArgs;
use crate::input;
use crate::input::directory::DirectoryProvider;

/// Arguments for a full credit evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    /// Ticker symbol; its record is read from <data-dir>/<TICKER>.json
    #[arg(long)]
    pub ticker: Option<String>,

    /// Firm type: 1/public-manufacturing, 2/private-or-non-manufacturing, 3/emerging-market
    #[arg(long)]
    pub firm_type: FirmType,

    /// Directory holding company records
    #[arg(long, default_value = ".")]
    pub data_dir: String,

    /// Path to a single company record (used when --ticker is absent)
    #[arg(long)]
    pub input: Option<String>,

    /// Report the Altman result alone when structural risk cannot be assessed
    #[arg(long)]
    pub allow_altman_only: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = args.config.resolve()?;

    let outcomes = match args.ticker {
        Some(ref ticker) => {
            let provider = DirectoryProvider::new(&args.data_dir);
            evaluation::assess_ticker(&provider, ticker, args.firm_type, &config)?
        }
        None => {
            let financials: CompanyFinancials = input::read_input(args.input.as_deref())?
                .ok_or("--ticker <SYMBOL> or --input <record.json> or stdin required")?;
            evaluation::assess_financials(&financials, args.firm_type, &config)?
        }
    };

    if args.allow_altman_only {
        if let Err(reason) = &outcomes.merton {
            if reason.is_structural_risk_unavailable() {
                let reason = reason.clone();
                return altman_only_output(outcomes, &reason, &config);
            }
        }
    }

    Ok(serde_json::to_value(outcomes.into_output(&config)?)?)
}

/// Partial answer: the Altman result with the structural path marked
/// unavailable and no combined decision.
fn altman_only_output(
    outcomes: PathOutcomes,
    reason: &CreditRiskError,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let altman = outcomes.altman_only()?;
    tracing::warn!(error = %reason, "structural risk unavailable, reporting Altman result only");

    let result = serde_json::json!({
        "ticker": outcomes.ticker,
        "firm_type": outcomes.firm_type,
        "altman": altman,
        "merton": null,
        "merton_unavailable": {
            "kind": reason.kind(),
            "message": reason.caller_message(),
            "detail": reason.to_string(),
        },
        "decision": null,
    });

    let mut warnings = outcomes.warnings.clone();
    warnings.push(format!(
        "Structural risk could not be assessed ({reason}); no combined decision was made."
    ));

    let output = with_metadata(
        "Altman Z-Score only, structural model unavailable",
        &evaluation::assumptions(outcomes.firm_type, &config.merton),
        warnings,
        "rust_decimal_128bit ratios",
        result,
    );
    Ok(serde_json::to_value(output)?)
}
