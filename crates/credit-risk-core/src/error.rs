use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CreditRiskError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing field: {field} is required but was not provided")]
    MissingField { field: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Insufficient history: {provided} asset values supplied, at least {required} required")]
    InsufficientHistory { provided: usize, required: usize },

    #[error("Degenerate volatility: asset value changes have zero standard deviation")]
    DegenerateVolatility,

    #[error("Invalid asset value or default barrier: {field} must be positive (got {value})")]
    InvalidAssetOrBarrier { field: String, value: String },

    #[error("Invalid model parameter: {field} — {reason}")]
    InvalidModelParameter { field: String, reason: String },

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Coarse classification of a [`CreditRiskError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    MissingField,
    DivisionByZero,
    InsufficientHistory,
    DegenerateVolatility,
    InvalidAssetOrBarrier,
    InvalidModelParameter,
    DataUnavailable,
    Serialization,
}

impl CreditRiskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::InsufficientHistory { .. } => ErrorKind::InsufficientHistory,
            Self::DegenerateVolatility => ErrorKind::DegenerateVolatility,
            Self::InvalidAssetOrBarrier { .. } => ErrorKind::InvalidAssetOrBarrier,
            Self::InvalidModelParameter { .. } => ErrorKind::InvalidModelParameter,
            Self::DataUnavailable(_) => ErrorKind::DataUnavailable,
            Self::SerializationError(_) => ErrorKind::Serialization,
        }
    }

    /// Text shown to whoever asked for the evaluation.
    pub fn caller_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::MissingField => "cannot evaluate, incomplete data",
            ErrorKind::DivisionByZero => "degenerate financial data",
            ErrorKind::InsufficientHistory
            | ErrorKind::DegenerateVolatility
            | ErrorKind::InvalidAssetOrBarrier
            | ErrorKind::InvalidModelParameter => "cannot assess structural risk",
            ErrorKind::InvalidInput => "invalid request",
            ErrorKind::DataUnavailable => "financial data unavailable",
            ErrorKind::Serialization => "malformed data",
        }
    }

    /// True for failures confined to the Merton path. A caller may still
    /// report the Altman result when one of these occurs.
    pub fn is_structural_risk_unavailable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InsufficientHistory
                | ErrorKind::DegenerateVolatility
                | ErrorKind::InvalidAssetOrBarrier
                | ErrorKind::InvalidModelParameter
        )
    }
}

impl From<serde_json::Error> for CreditRiskError {
    fn from(e: serde_json::Error) -> Self {
        CreditRiskError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_family() {
        assert!(CreditRiskError::DegenerateVolatility.is_structural_risk_unavailable());
        assert!(CreditRiskError::InsufficientHistory {
            provided: 2,
            required: 3
        }
        .is_structural_risk_unavailable());
        assert!(!CreditRiskError::MissingField {
            field: "ebit".into()
        }
        .is_structural_risk_unavailable());
        assert!(!CreditRiskError::DivisionByZero {
            context: "X1".into()
        }
        .is_structural_risk_unavailable());
    }

    #[test]
    fn test_caller_messages() {
        let missing = CreditRiskError::MissingField {
            field: "market_value_of_equity".into(),
        };
        assert_eq!(missing.caller_message(), "cannot evaluate, incomplete data");
        let zero = CreditRiskError::DivisionByZero {
            context: "total_assets".into(),
        };
        assert_eq!(zero.caller_message(), "degenerate financial data");
    }

    #[test]
    fn test_display_names_field() {
        let err = CreditRiskError::MissingField {
            field: "retained_earnings".into(),
        };
        assert!(err.to_string().contains("retained_earnings"));
    }
}
