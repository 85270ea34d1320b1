use std::collections::HashMap;

use crate::statements::CompanyFinancials;
use crate::types::Ticker;
use crate::{CreditRiskError, CreditRiskResult};

/// Source of company statement and market data.
///
/// All I/O belongs to implementors; the engine only sees finished records.
pub trait FinancialDataProvider {
    fn fetch(&self, ticker: &Ticker) -> CreditRiskResult<CompanyFinancials>;
}

impl<P: FinancialDataProvider + ?Sized> FinancialDataProvider for &P {
    fn fetch(&self, ticker: &Ticker) -> CreditRiskResult<CompanyFinancials> {
        (**self).fetch(ticker)
    }
}

/// Provider backed by records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    records: HashMap<Ticker, CompanyFinancials>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, financials: CompanyFinancials) -> Self {
        self.insert(financials);
        self
    }

    /// Store a record, replacing any earlier one for the same ticker.
    pub fn insert(&mut self, financials: CompanyFinancials) -> Option<CompanyFinancials> {
        self.records.insert(financials.ticker.clone(), financials)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FinancialDataProvider for InMemoryProvider {
    fn fetch(&self, ticker: &Ticker) -> CreditRiskResult<CompanyFinancials> {
        self.records
            .get(ticker)
            .cloned()
            .ok_or_else(|| CreditRiskError::DataUnavailable(format!("no financial data for ticker '{ticker}'")))
    }
}
