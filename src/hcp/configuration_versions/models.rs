//! Configuration version data models

use serde::Deserialize;

use crate::config::ids;
use crate::hcp::traits::TfeResource;

/// Whether an id names a configuration version (`cv-` prefix)
pub fn is_configuration_version_id(id: &str) -> bool {
    id.starts_with(ids::CONFIGURATION_VERSION_PREFIX)
}

/// Configuration version data from TFE API
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigurationVersion {
    pub id: String,
    pub attributes: ConfigurationVersionAttributes,
    #[serde(default)]
    pub links: Option<ConfigurationVersionLinks>,
}

/// Configuration version attributes
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigurationVersionAttributes {
    /// Status: pending, fetching, uploaded, archived, errored
    pub status: String,
    #[serde(default)]
    pub speculative: bool,
}

/// Configuration version links
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigurationVersionLinks {
    /// Download link for the configuration tarball
    pub download: Option<String>,
}

impl TfeResource for ConfigurationVersion {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        // Configuration versions don't have names
        &self.id
    }

    fn label(&self) -> String {
        format!("configuration version '{}'", self.id)
    }
}

impl ConfigurationVersion {
    /// Get download path if available
    pub fn download_path(&self) -> Option<&str> {
        self.links.as_ref().and_then(|l| l.download.as_deref())
    }
}
