//! TFE API client module
//!
//! This module provides functionality to interact with Terraform Enterprise API.

mod client;
pub mod configuration_versions;
mod credentials;
pub mod document;
mod host;
pub mod report;
pub mod runs;
pub mod state;
pub mod traits;
pub mod workspaces;

pub use client::{FetchTarget, Fetched, TfeClient};
pub use configuration_versions::{ConfigDiffOutcome, ConfigurationVersion};
pub use credentials::TokenResolver;
pub use host::HostResolver;
pub use report::{build_workspace_report, run_report, ReportOptions, WorkspaceReport};
pub use runs::{Milestone, Run, RunAttributes, RunStatus};
pub use state::{StateVersion, StateVersionReport};
pub use traits::TfeResource;
pub use workspaces::{Workspace, WorkspaceAttributes};
