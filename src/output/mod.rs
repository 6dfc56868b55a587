//! Output rendering module
//!
//! Per-workspace report blocks, the organization summary and error output.

mod report;
mod summary;

pub use report::{format_timestamp, print_error, Reporter};
pub use summary::{summary_table, ReportTotals, SummaryRow};
