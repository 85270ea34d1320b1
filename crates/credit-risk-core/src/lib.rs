pub mod altman;
pub mod config;
pub mod decision;
pub mod error;
pub mod evaluation;
pub mod statements;
pub mod structural;
pub mod types;

pub use config::{EngineConfig, MertonConfig};
pub use decision::{combine, CreditDecision};
pub use error::{CreditRiskError, ErrorKind};
pub use evaluation::{evaluate, CreditAssessment, FinancialDataProvider, PathOutcomes};
pub use types::*;

/// Standard result type for all credit-risk operations
pub type CreditRiskResult<T> = Result<T, CreditRiskError>;
