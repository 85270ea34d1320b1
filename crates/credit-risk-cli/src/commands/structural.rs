use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use credit_risk_core::statements::{AssetHistory, HistoryOrder, ReportingFrequency};
use credit_risk_core::structural::{self, MertonInputs};
use credit_risk_core::{with_metadata, Money, Rate, Years};

use super::ConfigArgs;
use crate::input;

/// Order of the values passed to `--assets`
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OrderArg {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl From<OrderArg> for HistoryOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::NewestFirst => HistoryOrder::NewestFirst,
            OrderArg::OldestFirst => HistoryOrder::OldestFirst,
        }
    }
}

/// Reporting period of the asset series
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FrequencyArg {
    #[default]
    Annual,
    SemiAnnual,
    Quarterly,
}

impl From<FrequencyArg> for ReportingFrequency {
    fn from(freq: FrequencyArg) -> Self {
        match freq {
            FrequencyArg::Annual => ReportingFrequency::Annual,
            FrequencyArg::SemiAnnual => ReportingFrequency::SemiAnnual,
            FrequencyArg::Quarterly => ReportingFrequency::Quarterly,
        }
    }
}

/// Arguments for asset volatility estimation
#[derive(Args)]
pub struct VolatilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Total assets per period, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub assets: Vec<Decimal>,

    /// Order of the --assets values
    #[arg(long, value_enum, default_value_t = OrderArg::NewestFirst)]
    pub order: OrderArg,

    /// Reporting frequency of the series
    #[arg(long, value_enum, default_value_t = FrequencyArg::Annual)]
    pub frequency: FrequencyArg,
}

/// Arguments for the Merton distance-to-default
#[derive(Args)]
pub struct MertonArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Asset value V
    #[arg(long)]
    pub asset_value: Option<Decimal>,

    /// Default barrier D
    #[arg(long)]
    pub default_barrier: Option<Decimal>,

    /// Annualized asset volatility as a decimal (0.25 = 25%)
    #[arg(long, alias = "sigma")]
    pub asset_volatility: Option<Decimal>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Deserialize)]
struct VolatilityRequest {
    asset_history: Vec<Money>,
    #[serde(default)]
    history_order: HistoryOrder,
    #[serde(default)]
    frequency: ReportingFrequency,
}

/// Rate and horizon fall back to the resolved configuration when omitted.
#[derive(Deserialize)]
struct MertonRequest {
    asset_value: Money,
    default_barrier: Money,
    asset_volatility: Rate,
    #[serde(default)]
    risk_free_rate: Option<Rate>,
    #[serde(default)]
    horizon_years: Option<Years>,
}

pub fn run_volatility(args: VolatilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let history = if !args.assets.is_empty() {
        AssetHistory::new(args.assets, args.order.into(), args.frequency.into())?
    } else if let Some(req) = input::read_input::<VolatilityRequest>(args.input.as_deref())? {
        AssetHistory::new(req.asset_history, req.history_order, req.frequency)?
    } else {
        return Err("--assets <a,b,c,...> or --input <file.json> or stdin required".into());
    };

    let estimate = structural::estimate_asset_volatility(&history)?;
    let assumptions = serde_json::json!({
        "estimator": "sample standard deviation (n-1) of (A[t] - A[t-1]) / A[t-1]",
        "annualization": format!(
            "x sqrt({}) periods per year",
            history.frequency().periods_per_year()
        ),
        "observations": history.len(),
    });
    let output = with_metadata(
        "Asset volatility from total-asset history",
        &assumptions,
        Vec::new(),
        "rust_decimal_128bit",
        estimate,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_merton(args: MertonArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = args.config.resolve()?;
    config.validate()?;

    let inputs = if let (Some(v), Some(d), Some(sigma)) =
        (args.asset_value, args.default_barrier, args.asset_volatility)
    {
        MertonInputs::with_config(v, d, sigma, &config.merton)
    } else if let Some(req) = input::read_input::<MertonRequest>(args.input.as_deref())? {
        MertonInputs {
            asset_value: req.asset_value,
            default_barrier: req.default_barrier,
            asset_volatility: req.asset_volatility,
            risk_free_rate: args
                .config
                .risk_free_rate
                .or(req.risk_free_rate)
                .unwrap_or(config.merton.risk_free_rate),
            horizon_years: args
                .config
                .horizon
                .or(req.horizon_years)
                .unwrap_or(config.merton.horizon_years),
        }
    } else {
        return Err(
            "--asset-value, --default-barrier and --asset-volatility are required \
             (or provide --input)"
                .into(),
        );
    };

    let result = structural::score(&inputs)?;
    let mut warnings = Vec::new();
    if inputs.asset_value <= inputs.default_barrier {
        warnings.push("Asset value does not exceed the default barrier.".to_string());
    }
    let assumptions = serde_json::json!({
        "inputs": inputs,
        "formula": "DD = (ln(V/D) + (r - sigma^2/2)*T) / (sigma*sqrt(T)); PD = 1 - N(DD)",
        "zones": "Safe PD < 1%, Grey 1% <= PD < 15%, Distress PD >= 15%",
    });
    let output = with_metadata(
        "Merton distance-to-default",
        &assumptions,
        warnings,
        "ieee754_f64",
        result,
    );
    Ok(serde_json::to_value(output)?)
}
