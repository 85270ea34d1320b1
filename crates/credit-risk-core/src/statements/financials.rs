use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::history::{AssetHistory, HistoryOrder, ReportingFrequency};
use super::snapshot::FinancialSnapshot;
use crate::types::{Money, Ticker};
use crate::{CreditRiskError, CreditRiskResult};

/// Raw company record as delivered by a data provider.
///
/// Every statement line is optional because providers omit rows they could
/// not source. Nothing is defaulted: [`CompanyFinancials::snapshot`] refuses
/// to build a snapshot while a required line is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFinancials {
    pub ticker: Ticker,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub total_assets: Option<Money>,
    #[serde(default)]
    pub working_capital: Option<Money>,
    #[serde(default)]
    pub retained_earnings: Option<Money>,
    #[serde(default)]
    pub ebit: Option<Money>,
    #[serde(default)]
    pub total_revenue: Option<Money>,
    #[serde(default)]
    pub total_liabilities: Option<Money>,
    #[serde(default)]
    pub current_liabilities: Option<Money>,
    #[serde(default)]
    pub stockholders_equity: Option<Money>,
    #[serde(default)]
    pub share_price: Option<Money>,
    #[serde(default)]
    pub shares_outstanding: Option<Decimal>,
    /// Total assets for recent periods, in `history_order`.
    #[serde(default)]
    pub asset_history: Vec<Money>,
    #[serde(default)]
    pub history_order: HistoryOrder,
    #[serde(default)]
    pub frequency: ReportingFrequency,
}

impl CompanyFinancials {
    /// Price times shares outstanding, when both are known.
    pub fn market_value_of_equity(&self) -> Option<Money> {
        match (self.share_price, self.shares_outstanding) {
            (Some(price), Some(shares)) => Some(price * shares),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> CreditRiskResult<FinancialSnapshot> {
        Ok(FinancialSnapshot {
            period_end: self.period_end,
            total_assets: require(self.total_assets, "total_assets")?,
            working_capital: require(self.working_capital, "working_capital")?,
            retained_earnings: require(self.retained_earnings, "retained_earnings")?,
            ebit: require(self.ebit, "ebit")?,
            total_revenue: require(self.total_revenue, "total_revenue")?,
            total_liabilities: require(self.total_liabilities, "total_liabilities")?,
            current_liabilities: require(self.current_liabilities, "current_liabilities")?,
            stockholders_equity: require(self.stockholders_equity, "stockholders_equity")?,
            market_value_of_equity: self.market_value_of_equity(),
        })
    }

    pub fn asset_history(&self) -> CreditRiskResult<AssetHistory> {
        AssetHistory::new(
            self.asset_history.clone(),
            self.history_order,
            self.frequency,
        )
    }
}

pub(crate) fn require(value: Option<Money>, field: &str) -> CreditRiskResult<Money> {
    value.ok_or_else(|| CreditRiskError::MissingField {
        field: field.to_string(),
    })
}
