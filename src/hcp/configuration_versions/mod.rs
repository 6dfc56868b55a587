//! Configuration versions module - list, download and compare workspace configurations

mod api;
mod differ;
mod models;

pub use differ::{diff_configuration_versions, select_diff_pair, ConfigDiffOutcome, DiffPair};
pub use models::{
    is_configuration_version_id, ConfigurationVersion, ConfigurationVersionAttributes,
    ConfigurationVersionLinks,
};
