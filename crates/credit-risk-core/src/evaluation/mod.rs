//! Evaluation pipeline: provider lookup, the two independent scoring paths
//! and the join into a credit decision.

pub mod pipeline;
pub mod provider;

pub use pipeline::{
    assess, assess_financials, assess_ticker, assumptions, evaluate, evaluate_financials,
    record_warnings, statement_warnings, CreditAssessment, MertonOutcome, PathOutcomes,
};
pub use provider::{FinancialDataProvider, InMemoryProvider};
