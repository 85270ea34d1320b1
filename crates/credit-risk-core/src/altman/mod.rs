//! Altman Z-Score family.
//!
//! 1. **Ratio extraction**: X1-X5 from a statement snapshot or a provider
//!    record, with the X4 definition and X5 inclusion fixed by the firm type.
//! 2. **Scoring**: weighted sum against the published coefficient table and
//!    classification into Safe / Grey / Distress.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

pub mod ratios;
pub mod scoring;

pub use ratios::{extract, extract_financials, RatioSet};
pub use scoring::{classify, score, AltmanResult, ZScoreComponent};
