//! Option enums for CLI flags

use clap::ValueEnum;

/// What to do when a workspace has only one configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SingleVersionPolicy {
    /// Report "no previous configuration version" and continue (default)
    #[default]
    Skip,
    /// Abort the report with a consistency error
    Fail,
}

impl std::fmt::Display for SingleVersionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SingleVersionPolicy::Skip => write!(f, "skip"),
            SingleVersionPolicy::Fail => write!(f, "fail"),
        }
    }
}
