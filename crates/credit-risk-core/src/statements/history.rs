use serde::{Deserialize, Serialize};

use crate::types::Money;
use crate::{CreditRiskError, CreditRiskResult};

/// Minimum number of values an [`AssetHistory`] may hold.
pub const MIN_HISTORY_POINTS: usize = 2;

/// Order in which a caller supplies asset values.
///
/// Statement providers usually list the latest period first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOrder {
    OldestFirst,
    #[default]
    NewestFirst,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingFrequency {
    #[default]
    Annual,
    SemiAnnual,
    Quarterly,
}

impl ReportingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Self::Annual => 1,
            Self::SemiAnnual => 2,
            Self::Quarterly => 4,
        }
    }
}

/// Total-asset values across consecutive reporting periods, stored oldest
/// to newest regardless of the order they were supplied in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetHistory {
    values: Vec<Money>,
    frequency: ReportingFrequency,
}

impl AssetHistory {
    pub fn new(
        values: Vec<Money>,
        order: HistoryOrder,
        frequency: ReportingFrequency,
    ) -> CreditRiskResult<Self> {
        if values.len() < MIN_HISTORY_POINTS {
            return Err(CreditRiskError::InsufficientHistory {
                provided: values.len(),
                required: MIN_HISTORY_POINTS,
            });
        }
        let mut values = values;
        if order == HistoryOrder::NewestFirst {
            values.reverse();
        }
        Ok(Self { values, frequency })
    }

    pub fn oldest_first(values: Vec<Money>) -> CreditRiskResult<Self> {
        Self::new(values, HistoryOrder::OldestFirst, ReportingFrequency::Annual)
    }

    pub fn newest_first(values: Vec<Money>) -> CreditRiskResult<Self> {
        Self::new(values, HistoryOrder::NewestFirst, ReportingFrequency::Annual)
    }

    /// Values in chronological order.
    pub fn values(&self) -> &[Money] {
        &self.values
    }

    pub fn frequency(&self) -> ReportingFrequency {
        self.frequency
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
