//! Organization summary: totals and per-workspace table

use comfy_table::{presets::NOTHING, Table};

use crate::hcp::report::WorkspaceReport;

/// One line of the summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub name: String,
    pub resources: u32,
    pub locked: bool,
    /// Status of the latest run, `None` when the workspace was never run
    pub latest_status: Option<String>,
}

impl From<&WorkspaceReport> for SummaryRow {
    fn from(report: &WorkspaceReport) -> Self {
        Self {
            name: report.workspace.attributes.name.clone(),
            resources: report.workspace.resource_count(),
            locked: report.workspace.is_locked(),
            latest_status: report.run.as_ref().map(|r| r.status().to_string()),
        }
    }
}

/// Organization-wide totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportTotals {
    pub workspaces: usize,
    pub resources: u64,
}

impl ReportTotals {
    pub fn from_rows(rows: &[SummaryRow]) -> Self {
        Self {
            workspaces: rows.len(),
            resources: rows.iter().map(|r| u64::from(r.resources)).sum(),
        }
    }
}

/// Build the per-workspace summary table
pub fn summary_table(rows: &[SummaryRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_header(vec!["Workspace", "Resources", "Locked", "Latest Run"]);

    for row in rows {
        let locked = if row.locked { "Yes" } else { "No" };
        table.add_row(vec![
            row.name.as_str(),
            &row.resources.to_string(),
            locked,
            row.latest_status.as_deref().unwrap_or("-"),
        ]);
    }

    table
}
