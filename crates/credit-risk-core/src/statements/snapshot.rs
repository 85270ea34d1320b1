use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// One reporting period of balance-sheet and income-statement lines.
///
/// Produced by the data collaborator and consumed read-only by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    pub total_assets: Money,
    pub working_capital: Money,
    pub retained_earnings: Money,
    pub ebit: Money,
    pub total_revenue: Money,
    pub total_liabilities: Money,
    pub current_liabilities: Money,
    /// Book value of stockholders' equity.
    pub stockholders_equity: Money,
    /// Share price times shares outstanding. Only the public manufacturing
    /// variant needs it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_value_of_equity: Option<Money>,
}
