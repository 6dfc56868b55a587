//! Line-oriented report renderer

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use std::io::Write;

use crate::config::defaults;
use crate::context::ProbeContext;
use crate::diff::render_unified;
use crate::error::{Result, TfeError};
use crate::hcp::configuration_versions::ConfigDiffOutcome;
use crate::hcp::report::WorkspaceReport;
use crate::hcp::runs::Run;
use crate::hcp::state::{StateVersion, StateVersionReport};

use super::summary::{summary_table, ReportTotals, SummaryRow};

/// Label width of `field` lines
const LABEL_WIDTH: usize = 20;

/// Render an RFC 3339 timestamp as UTC, keeping unparseable values as-is
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Print an error to stdout behind a red marker; API bodies follow in yellow
///
/// A closed stdout is ignored so the caller still exits with the error's code.
pub fn print_error(err: &TfeError) {
    let _ = write_error(&mut std::io::stdout().lock(), err);
}

fn write_error<W: Write>(out: &mut W, err: &TfeError) -> std::io::Result<()> {
    writeln!(out, "{} {}", "ERROR".red().bold(), err)?;
    if let TfeError::Api { body, .. } = err {
        if !body.is_empty() {
            writeln!(out, "{}", body.yellow())?;
        }
    }
    out.flush()
}

/// Writes the report to `out`
///
/// `quiet` drops the connection echo, banners, separators and the summary
/// table; `color` toggles ANSI styling.
pub struct Reporter<W: Write> {
    out: W,
    quiet: bool,
    color: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, quiet: bool, color: bool) -> Self {
        Self { out, quiet, color }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn field(&mut self, label: &str, value: &str) -> Result<()> {
        writeln!(
            self.out,
            "  {:<width$} {}",
            format!("{}:", label),
            value,
            width = LABEL_WIDTH
        )?;
        Ok(())
    }

    fn separator(&mut self) -> Result<()> {
        if !self.quiet {
            writeln!(self.out, "{}", "=".repeat(defaults::SEPARATOR_WIDTH))?;
        }
        Ok(())
    }

    /// Echo where the report connects to; the token is shown masked
    pub fn connection(&mut self, context: &ProbeContext) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.out, "Address:      {}", context.api_base)?;
        writeln!(self.out, "Organization: {}", context.organization)?;
        writeln!(self.out, "Token:        {}", context.masked_token())?;
        if let Some(ca) = &context.ca_bundle {
            writeln!(self.out, "CA bundle:    {}", ca.display())?;
        }
        Ok(())
    }

    /// Heading printed once the workspace list is known
    pub fn banner(&mut self, org: &str, workspaces: usize) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.separator()?;
        let title = format!("Organization '{}': {} workspace(s)", org, workspaces);
        let title = self.paint(&title, |s| s.bold());
        writeln!(self.out, "{}", title)?;
        Ok(())
    }

    /// Render one workspace block
    pub fn workspace(&mut self, report: &WorkspaceReport) -> Result<()> {
        let ws = &report.workspace;
        self.separator()?;

        let heading = format!("Workspace: {} ({})", ws.attributes.name, ws.id);
        let heading = self.paint(&heading, |s| s.bold().cyan());
        writeln!(self.out, "{}", heading)?;

        self.field("created", &format_timestamp(ws.created_at()))?;
        self.field("terraform version", ws.terraform_version())?;
        let lock = if ws.is_locked() {
            self.paint("locked", |s| s.red().bold())
        } else {
            self.paint("unlocked", |s| s.green())
        };
        self.field("lock", &lock)?;
        self.field("auto-apply", yes_no(ws.attributes.auto_apply))?;
        self.field("speculative", yes_no(ws.attributes.speculative_enabled))?;
        self.field(
            "global remote state",
            yes_no(ws.attributes.global_remote_state),
        )?;
        self.field("resources", &ws.resource_count().to_string())?;

        match &report.run {
            Some(run) => self.run(run)?,
            None => writeln!(self.out, "Latest run: no runs yet")?,
        }

        if let Some(diff) = &report.config_diff {
            self.config_diff(diff)?;
        }

        if let Some(state) = &report.state {
            self.state_versions(state)?;
        }

        Ok(())
    }

    fn run(&mut self, run: &Run) -> Result<()> {
        writeln!(self.out, "Latest run: {}", run.id)?;
        let status = run.status().to_string();
        let status = if run.status().is_non_final() {
            self.paint(&status, |s| s.yellow())
        } else {
            status
        };
        self.field("status", &status)?;
        self.field("created by", run.creator_id().unwrap_or("n/a"))?;
        self.field(
            "configuration",
            run.configuration_version_id().unwrap_or("n/a"),
        )?;
        if let Some(created) = run.attributes.created_at.as_deref() {
            self.field("created", &format_timestamp(created))?;
        }
        if let Some(reason) = run.attributes.trigger_reason.as_deref() {
            self.field("trigger", reason)?;
        }
        if let Some(message) = run.attributes.message.as_deref() {
            self.field("message", message)?;
        }

        for (milestone, at) in run.milestones() {
            let value = match at {
                Some(ts) => format_timestamp(ts),
                None => self.paint("not reached", |s| s.dimmed()),
            };
            self.field(milestone.label(), &value)?;
        }
        Ok(())
    }

    fn config_diff(&mut self, outcome: &ConfigDiffOutcome) -> Result<()> {
        match outcome {
            ConfigDiffOutcome::SingleVersion { id } => {
                writeln!(
                    self.out,
                    "Configuration diff: no previous configuration version ({})",
                    id
                )?;
            }
            ConfigDiffOutcome::Compared {
                latest,
                previous,
                changes,
            } => {
                writeln!(self.out, "Configuration diff: {} -> {}", previous, latest)?;
                if changes.is_empty() {
                    writeln!(self.out, "  no difference")?;
                } else {
                    write!(self.out, "{}", render_unified(changes))?;
                }
            }
        }
        Ok(())
    }

    fn state_versions(&mut self, state: &StateVersionReport) -> Result<()> {
        let describe = |sv: &StateVersion| format!("{} (serial {})", sv.id, sv.serial());

        match (&state.latest, &state.previous) {
            (None, _) => writeln!(self.out, "State versions: no state versions")?,
            (Some(latest), previous) => {
                writeln!(self.out, "State versions:")?;
                self.field("latest", &describe(latest))?;
                if let Some(previous) = previous {
                    self.field("previous", &describe(previous))?;
                }
            }
        }
        Ok(())
    }

    /// Print totals and, unless quiet, the per-workspace table
    pub fn summary(&mut self, rows: &[SummaryRow]) -> Result<ReportTotals> {
        let totals = ReportTotals::from_rows(rows);
        self.separator()?;

        if !self.quiet && !rows.is_empty() {
            writeln!(self.out, "{}", summary_table(rows))?;
        }
        writeln!(self.out, "Total workspaces: {}", totals.workspaces)?;
        writeln!(self.out, "Total resources:  {}", totals.resources)?;
        Ok(totals)
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ChangeKind, FileChange, FileContent};
    use crate::hcp::workspaces::Workspace;

    fn workspace(locked: bool) -> Workspace {
        serde_json::from_value(serde_json::json!({
            "id": "ws-1",
            "attributes": {
                "name": "net-prod",
                "locked": locked,
                "auto-apply": true,
                "resource-count": 12,
                "terraform-version": "1.6.0",
                "created-at": "2024-03-01T10:00:00.000Z"
            }
        }))
        .unwrap()
    }

    fn run(timestamps: serde_json::Value) -> Run {
        serde_json::from_value(serde_json::json!({
            "id": "run-1",
            "attributes": {
                "status": "planning",
                "message": "nightly",
                "status-timestamps": timestamps
            }
        }))
        .unwrap()
    }

    fn report(run: Option<Run>) -> WorkspaceReport {
        WorkspaceReport {
            workspace: workspace(false),
            run,
            config_diff: None,
            state: None,
        }
    }

    fn render(quiet: bool, report: &WorkspaceReport) -> String {
        let mut reporter = Reporter::new(Vec::new(), quiet, false);
        reporter.workspace(report).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    /// Value of the `label:` field line, trimmed
    fn field_value(out: &str, label: &str) -> Option<String> {
        let prefix = format!("{}:", label);
        out.lines()
            .map(str::trim_start)
            .find(|l| l.starts_with(&prefix))
            .map(|l| l[prefix.len()..].trim().to_string())
    }

    /// Writer that fails like a stdout whose reader has gone away
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_write_error_with_api_body() {
        let err = TfeError::Api {
            status: 404,
            message: "not found".to_string(),
            body: "{\"errors\": []}".to_string(),
        };
        let mut out = Vec::new();
        write_error(&mut out, &err).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ERROR"));
        assert!(text.contains("API error (status 404): not found"));
        assert!(text.contains("{\"errors\": []}"));
    }

    #[test]
    fn test_write_error_closed_pipe_is_reported_not_panicking() {
        let err = TfeError::Consistency("head mismatch".to_string());
        let result = write_error(&mut ClosedPipe, &err);
        assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2025-01-01T12:00:00+02:00"),
            "2025-01-01 10:00:00 UTC"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_workspace_block() {
        let out = render(false, &report(None));
        assert!(out.starts_with(&"=".repeat(80)));
        assert!(out.contains("Workspace: net-prod (ws-1)"));
        assert_eq!(field_value(&out, "resources").as_deref(), Some("12"));
        assert_eq!(field_value(&out, "lock").as_deref(), Some("unlocked"));
        assert_eq!(field_value(&out, "auto-apply").as_deref(), Some("yes"));
        assert_eq!(
            field_value(&out, "created").as_deref(),
            Some("2024-03-01 10:00:00 UTC")
        );
        assert!(out.contains("Latest run: no runs yet"));
    }

    #[test]
    fn test_locked_workspace() {
        let mut r = report(None);
        r.workspace = workspace(true);
        let out = render(true, &r);
        assert_eq!(field_value(&out, "lock").as_deref(), Some("locked"));
        // quiet drops separators
        assert!(!out.contains("===="));
    }

    #[test]
    fn test_partial_milestones() {
        let out = render(
            false,
            &report(Some(run(serde_json::json!({
                "plan-queueable-at": "2025-01-01T10:00:00+00:00",
                "planning-at": "2025-01-01T10:00:05+00:00"
            })))),
        );
        assert_eq!(field_value(&out, "status").as_deref(), Some("planning"));
        assert_eq!(field_value(&out, "created by").as_deref(), Some("n/a"));
        assert_eq!(field_value(&out, "message").as_deref(), Some("nightly"));
        assert_eq!(
            field_value(&out, "plan queueable").as_deref(),
            Some("2025-01-01 10:00:00 UTC")
        );
        assert_eq!(
            field_value(&out, "plan queued").as_deref(),
            Some("not reached")
        );
        assert_eq!(
            field_value(&out, "applied").as_deref(),
            Some("not reached")
        );
    }

    #[test]
    fn test_config_diff_blocks() {
        let mut r = report(None);
        r.config_diff = Some(ConfigDiffOutcome::Compared {
            latest: "cv-2".to_string(),
            previous: "cv-1".to_string(),
            changes: vec![FileChange {
                path: "main.tf".to_string(),
                kind: ChangeKind::Added,
                previous: None,
                latest: Some(FileContent::Text("x\n".to_string())),
            }],
        });
        let out = render(false, &r);
        assert!(out.contains("Configuration diff: cv-1 -> cv-2"));
        assert!(out.contains("+++ latest/main.tf"));

        r.config_diff = Some(ConfigDiffOutcome::SingleVersion {
            id: "cv-9".to_string(),
        });
        let out = render(false, &r);
        assert!(out.contains("no previous configuration version (cv-9)"));
    }

    #[test]
    fn test_state_version_blocks() {
        let mut r = report(None);
        r.state = Some(StateVersionReport::default());
        assert!(render(false, &r).contains("State versions: no state versions"));

        let sv: StateVersion = serde_json::from_value(serde_json::json!({
            "id": "sv-7",
            "attributes": { "serial": 7 }
        }))
        .unwrap();
        r.state = Some(StateVersionReport::from_versions(vec![sv]));
        let out = render(false, &r);
        assert_eq!(
            field_value(&out, "latest").as_deref(),
            Some("sv-7 (serial 7)")
        );
        assert_eq!(field_value(&out, "previous"), None);
    }

    #[test]
    fn test_connection_echo_masks_token() {
        let context = ProbeContext {
            api_base: "https://tfe.example.com".to_string(),
            token: "abcdefgh.atlasv1.secret1234".to_string(),
            ca_bundle: None,
            organization: "acme".to_string(),
        };

        let mut reporter = Reporter::new(Vec::new(), false, false);
        reporter.connection(&context).unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("https://tfe.example.com"));
        assert!(out.contains("1234"));
        assert!(!out.contains("atlasv1"));

        let mut quiet = Reporter::new(Vec::new(), true, false);
        quiet.connection(&context).unwrap();
        assert!(quiet.into_inner().is_empty());
    }

    #[test]
    fn test_summary_quiet_keeps_totals() {
        let rows = vec![SummaryRow {
            name: "net-prod".to_string(),
            resources: 12,
            locked: false,
            latest_status: Some("applied".to_string()),
        }];

        let mut quiet = Reporter::new(Vec::new(), true, false);
        let totals = quiet.summary(&rows).unwrap();
        let out = String::from_utf8(quiet.into_inner()).unwrap();
        assert_eq!(totals.resources, 12);
        assert!(out.contains("Total resources:  12"));
        assert!(!out.contains("Latest Run"));

        let mut loud = Reporter::new(Vec::new(), false, false);
        loud.summary(&rows).unwrap();
        let out = String::from_utf8(loud.into_inner()).unwrap();
        assert!(out.contains("Latest Run"));
    }
}
