use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CreditRiskError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Firm category that selects the Altman variant.
///
/// The integer codes (1, 2, 3) are the ones callers submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirmType {
    /// Code 1: classic Z-Score, market equity in X4.
    PublicManufacturing,
    /// Code 2: Z'-Score, book equity in X4.
    PrivateOrNonManufacturing,
    /// Code 3: Z''-Score, book equity in X4, no X5.
    EmergingMarket,
}

impl FirmType {
    pub const ALL: [FirmType; 3] = [
        FirmType::PublicManufacturing,
        FirmType::PrivateOrNonManufacturing,
        FirmType::EmergingMarket,
    ];

    pub fn code(self) -> u8 {
        match self {
            Self::PublicManufacturing => 1,
            Self::PrivateOrNonManufacturing => 2,
            Self::EmergingMarket => 3,
        }
    }

    /// Whether X4 is built from market rather than book equity.
    pub fn uses_market_equity(self) -> bool {
        matches!(self, Self::PublicManufacturing)
    }

    /// Whether the asset-turnover ratio X5 takes part in the score.
    pub fn includes_turnover(self) -> bool {
        !matches!(self, Self::EmergingMarket)
    }
}

impl TryFrom<u8> for FirmType {
    type Error = CreditRiskError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::PublicManufacturing),
            2 => Ok(Self::PrivateOrNonManufacturing),
            3 => Ok(Self::EmergingMarket),
            other => Err(CreditRiskError::InvalidInput {
                field: "firm_type".into(),
                reason: format!("Invalid firm type code {other}. Must be 1, 2, or 3."),
            }),
        }
    }
}

impl FromStr for FirmType {
    type Err = CreditRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "1" | "public-manufacturing" | "public" => Ok(Self::PublicManufacturing),
            "2" | "private-or-non-manufacturing" | "private" | "non-manufacturing" => {
                Ok(Self::PrivateOrNonManufacturing)
            }
            "3" | "emerging-market" | "emerging" => Ok(Self::EmergingMarket),
            _ => Err(CreditRiskError::InvalidInput {
                field: "firm_type".into(),
                reason: format!(
                    "Unknown firm type '{s}'. Use 1/public-manufacturing, \
                     2/private-or-non-manufacturing or 3/emerging-market."
                ),
            }),
        }
    }
}

impl fmt::Display for FirmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicManufacturing => write!(f, "Public Manufacturing"),
            Self::PrivateOrNonManufacturing => write!(f, "Private / Non-Manufacturing"),
            Self::EmergingMarket => write!(f, "Emerging Market"),
        }
    }
}

/// Discretization of a continuous risk measure against fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Safe,
    Grey,
    Distress,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Safe, Zone::Grey, Zone::Distress];
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe Zone"),
            Self::Grey => write!(f, "Grey Zone"),
            Self::Distress => write!(f, "Distress Zone"),
        }
    }
}

impl FromStr for Zone {
    type Err = CreditRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.trim_end_matches(" zone") {
            "safe" => Ok(Self::Safe),
            "grey" | "gray" => Ok(Self::Grey),
            "distress" => Ok(Self::Distress),
            _ => Err(CreditRiskError::InvalidInput {
                field: "zone".into(),
                reason: format!("Unknown zone '{s}'. Use safe, grey or distress."),
            }),
        }
    }
}

/// Normalized stock ticker: trimmed, upper-cased, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn new(raw: &str) -> Result<Self, CreditRiskError> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CreditRiskError::InvalidInput {
                field: "ticker".into(),
                reason: "ticker must not be empty.".into(),
            });
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = CreditRiskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ticker::new(&value)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

impl FromStr for Ticker {
    type Err = CreditRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::new(s)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation. Deliberately free of timestamps and
/// timings so that repeated evaluations serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    precision: &str,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: precision.to_string(),
        },
    }
}
