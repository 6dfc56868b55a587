//! CLI argument parsing

mod enums;

use clap::Parser;

use crate::config::defaults;

pub use enums::SingleVersionPolicy;

/// Terraform Enterprise organization probe
#[derive(Parser, Debug)]
#[command(name = "tfx-probe")]
#[command(version)]
#[command(
    about = "Report workspaces, latest runs, configuration changes and state versions of a TFE organization",
    long_about = "Report every workspace of a Terraform Enterprise / HCP Terraform organization: \
                  its flags and resource count, the latest run with its lifecycle milestones, \
                  the diff between the two newest configuration versions and the newest state \
                  versions.\n\n\
                  Connection settings come from TFE_ADDR, TFE_TOKEN, TFE_ORG and the optional \
                  TFE_CACERT; missing values are prompted for unless --batch is given."
)]
pub struct Cli {
    /// Organization name (overrides TFE_ORG)
    #[arg(short, long)]
    pub org: Option<String>,

    /// Suppress banners, separators, the connection echo and the summary table
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Echo request URLs and raw response bodies
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Batch mode: never prompt, fail on missing settings
    #[arg(short, long, default_value_t = false)]
    pub batch: bool,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Behavior when a workspace has a single configuration version
    #[arg(long, value_enum, default_value_t = SingleVersionPolicy::Skip)]
    pub single_version: SingleVersionPolicy,

    /// Maximum number of pages followed per listing
    #[arg(long, default_value_t = crate::config::api::MAX_PAGES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,
}
