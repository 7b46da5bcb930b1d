//! The per-truck cost/revenue summary report.

mod summary;
mod summary_endpoint;

pub use summary::{SummaryQuery, TransactionSummary, TruckTotals, build_summary, summarize};
pub use summary_endpoint::get_summary_endpoint;
