pub mod financials;
pub mod history;
pub mod snapshot;

pub use financials::CompanyFinancials;
pub use history::{AssetHistory, HistoryOrder, ReportingFrequency};
pub use snapshot::FinancialSnapshot;
