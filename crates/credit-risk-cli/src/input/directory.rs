use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use credit_risk_core::statements::CompanyFinancials;
use credit_risk_core::{CreditRiskError, CreditRiskResult, FinancialDataProvider, Ticker};

/// Provider reading one JSON record per company from `<root>/<TICKER>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, ticker: &Ticker) -> CreditRiskResult<PathBuf> {
        let symbol = ticker.as_str();
        if symbol.contains(['/', '\\']) || symbol.starts_with('.') {
            return Err(CreditRiskError::InvalidInput {
                field: "ticker".into(),
                reason: format!("'{symbol}' is not usable as a file name."),
            });
        }
        Ok(self.root.join(format!("{symbol}.json")))
    }
}

impl FinancialDataProvider for DirectoryProvider {
    fn fetch(&self, ticker: &Ticker) -> CreditRiskResult<CompanyFinancials> {
        let path = self.record_path(ticker)?;
        let contents = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                CreditRiskError::DataUnavailable(format!("no financial data for ticker '{ticker}'"))
            }
            _ => CreditRiskError::DataUnavailable(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            )),
        })?;

        let record: CompanyFinancials = serde_json::from_str(&contents)?;
        if record.ticker != *ticker {
            return Err(CreditRiskError::DataUnavailable(format!(
                "'{}' holds data for {}, not {}",
                path.display(),
                record.ticker,
                ticker
            )));
        }
        tracing::debug!(ticker = %ticker, path = %path.display(), "company record loaded");
        Ok(record)
    }
}
