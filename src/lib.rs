//! tfx-probe - Report on a Terraform Enterprise organization
//!
//! For every workspace of an organization, in name order, the report shows
//! the workspace flags and resource count, the latest run with its lifecycle
//! milestones, the diff between the two newest configuration versions and
//! the newest state versions.
//!
//! # Example
//!
//! ```bash
//! export TFE_ADDR=tfe.example.com
//! export TFE_TOKEN=...
//!
//! # Full report
//! tfx-probe --org my-org
//!
//! # Non-interactive, without decorations
//! tfx-probe --org my-org --batch --quiet
//!
//! # Fail when a workspace has nothing to compare against
//! tfx-probe --org my-org --single-version fail
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod hcp;
pub mod output;
pub mod scratch;
pub mod ui;

pub use cli::{Cli, SingleVersionPolicy};
pub use context::ProbeContext;
pub use error::{Result, TfeError};
pub use hcp::{
    run_report, HostResolver, ReportOptions, Run, TfeClient, TfeResource, TokenResolver,
    Workspace,
};
pub use output::Reporter;
pub use scratch::ScratchSpace;
