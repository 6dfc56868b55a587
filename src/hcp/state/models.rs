//! State version data models

use serde::Deserialize;

use crate::config::ids;
use crate::hcp::traits::TfeResource;

/// State version data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct StateVersion {
    pub id: String,
    pub attributes: StateVersionAttributes,
}

/// State version attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct StateVersionAttributes {
    pub serial: u64,

    #[serde(rename = "created-at")]
    pub created_at: Option<String>,

    #[serde(rename = "terraform-version")]
    pub terraform_version: Option<String>,
}

impl TfeResource for StateVersion {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("state version '{}'", self.id)
    }
}

impl StateVersion {
    pub fn serial(&self) -> u64 {
        self.attributes.serial
    }

    /// Whether the id carries the state version prefix
    pub fn has_valid_id(&self) -> bool {
        self.id.starts_with(ids::STATE_VERSION_PREFIX)
    }
}

/// The two newest state versions of a workspace
#[derive(Debug, Clone, Default)]
pub struct StateVersionReport {
    pub latest: Option<StateVersion>,
    pub previous: Option<StateVersion>,
}

impl StateVersionReport {
    /// Build from a newest-first listing; extra entries are ignored
    pub fn from_versions(versions: Vec<StateVersion>) -> Self {
        let mut iter = versions.into_iter();
        Self {
            latest: iter.next(),
            previous: iter.next(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_none()
    }
}
