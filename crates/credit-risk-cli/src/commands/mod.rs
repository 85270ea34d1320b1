pub mod altman;
pub mod decision;
pub mod evaluate;
pub mod structural;

use clap::Args;
use rust_decimal::Decimal;

use credit_risk_core::EngineConfig;

use crate::input;

/// Structural-model settings shared by `merton` and `evaluate`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Engine configuration file (.json, .yaml or .yml)
    #[arg(long)]
    pub config: Option<String>,

    /// Annualized risk-free rate as a decimal (0.04 = 4%)
    #[arg(long, allow_negative_numbers = true)]
    pub risk_free_rate: Option<Decimal>,

    /// Merton horizon in years
    #[arg(long)]
    pub horizon: Option<Decimal>,
}

impl ConfigArgs {
    /// Defaults, then the config file, then individual flags. Values are
    /// checked where the structural model consumes them.
    pub fn resolve(&self) -> Result<EngineConfig, Box<dyn std::error::Error>> {
        let mut config = match self.config {
            Some(ref path) => input::config::load_config(path)?,
            None => EngineConfig::default(),
        };
        if let Some(rate) = self.risk_free_rate {
            config.merton.risk_free_rate = rate;
        }
        if let Some(horizon) = self.horizon {
            config.merton.horizon_years = horizon;
        }
        Ok(config)
    }
}
