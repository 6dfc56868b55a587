//! Organization report: workspace -> latest run -> configuration diff -> state versions

use log::{debug, info};
use std::io::Write;

use crate::cli::SingleVersionPolicy;
use crate::context::ProbeContext;
use crate::error::Result;
use crate::hcp::configuration_versions::{diff_configuration_versions, ConfigDiffOutcome};
use crate::hcp::runs::Run;
use crate::hcp::state::StateVersionReport;
use crate::hcp::traits::TfeResource;
use crate::hcp::workspaces::Workspace;
use crate::hcp::TfeClient;
use crate::output::{Reporter, ReportTotals, SummaryRow};
use crate::scratch::ScratchSpace;
use crate::ui::{create_spinner, finish_spinner};

/// Behavior switches for one report
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub single_version: SingleVersionPolicy,
    /// Hide the progress spinner (quiet or debug output)
    pub hide_progress: bool,
}

/// Everything collected for one workspace
#[derive(Debug)]
pub struct WorkspaceReport {
    pub workspace: Workspace,
    /// Latest run, `None` when the workspace was never run
    pub run: Option<Run>,
    /// Present only when the latest run references a configuration version
    pub config_diff: Option<ConfigDiffOutcome>,
    /// Present only when the token may read state versions
    pub state: Option<StateVersionReport>,
}

/// Collect the report for a single workspace
///
/// The configuration diff is attempted whenever the latest run references a
/// `cv-` id; state versions are only read when the workspace permissions
/// allow it.
pub async fn build_workspace_report(
    client: &TfeClient,
    org: &str,
    workspace: Workspace,
    scratch: &ScratchSpace,
    options: &ReportOptions,
) -> Result<WorkspaceReport> {
    let run = client.latest_run(&workspace.id).await?;

    let config_diff = match run.as_ref().and_then(Run::diffable_configuration_version) {
        Some(cv_id) => Some(
            diff_configuration_versions(
                client,
                &workspace.id,
                cv_id,
                scratch,
                options.single_version,
            )
            .await?,
        ),
        None => {
            debug!(
                "Skipping configuration diff for {}: no configuration version reference",
                workspace.label()
            );
            None
        }
    };

    let state = if workspace.can_read_state_versions() {
        Some(
            client
                .state_versions(org, &workspace.attributes.name)
                .await?,
        )
    } else {
        debug!(
            "Skipping state versions for {}: not readable with this token",
            workspace.label()
        );
        None
    };

    Ok(WorkspaceReport {
        workspace,
        run,
        config_diff,
        state,
    })
}

/// Report every workspace of the context's organization, in name order
///
/// Output is streamed per workspace; the first error aborts the report.
pub async fn run_report<W: Write>(
    client: &TfeClient,
    context: &ProbeContext,
    scratch: &ScratchSpace,
    options: &ReportOptions,
    reporter: &mut Reporter<W>,
) -> Result<ReportTotals> {
    let org = context.organization.as_str();
    reporter.connection(context)?;

    let spinner = create_spinner(
        &format!("Listing workspaces of '{}'...", org),
        options.hide_progress,
    );
    let listed = client.list_workspaces(org).await;
    finish_spinner(spinner);
    let workspaces = listed?;

    info!("Reporting {} workspaces of '{}'", workspaces.len(), org);
    reporter.banner(org, workspaces.len())?;

    let mut rows = Vec::with_capacity(workspaces.len());
    for (_, workspace) in workspaces {
        debug!("Inspecting {}", workspace.label());
        let report = build_workspace_report(client, org, workspace, scratch, options).await?;
        reporter.workspace(&report)?;
        rows.push(SummaryRow::from(&report));
    }

    reporter.summary(&rows)
}
