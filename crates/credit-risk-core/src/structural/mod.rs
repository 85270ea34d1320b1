//! Structural (Merton) credit model.
//!
//! 1. **Asset volatility**: sample standard deviation of period-over-period
//!    changes in total assets.
//! 2. **Distance to Default / PD**: closed-form Merton solution with the
//!    asset value and default barrier taken as given.

pub mod merton;
pub mod volatility;

pub use merton::{score, standard_normal_cdf, MertonInputs, MertonResult};
pub use volatility::{estimate, estimate_asset_volatility, VolatilityEstimate};
