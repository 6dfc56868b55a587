//! Workspace data models

use serde::Deserialize;

use crate::hcp::traits::TfeResource;

/// Workspace data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Workspace {
    pub id: String,
    pub attributes: WorkspaceAttributes,
}

/// Generic relationship data
#[derive(Deserialize, Debug, Clone)]
pub struct RelationshipData {
    pub data: Option<RelationshipId>,
}

/// Relationship ID reference
#[derive(Deserialize, Debug, Clone)]
pub struct RelationshipId {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
}

impl RelationshipData {
    /// Id of the related resource, if the relationship is populated
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.id.as_str())
    }
}

impl TfeResource for Workspace {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }

    fn label(&self) -> String {
        format!("workspace '{}'", self.attributes.name)
    }
}

impl Workspace {
    /// Number of resources in the current state
    pub fn resource_count(&self) -> u32 {
        self.attributes.resource_count
    }

    /// Check if workspace is locked
    pub fn is_locked(&self) -> bool {
        self.attributes.locked
    }

    /// Terraform version pinned on the workspace
    pub fn terraform_version(&self) -> &str {
        &self.attributes.terraform_version
    }

    /// Creation timestamp (RFC 3339)
    pub fn created_at(&self) -> &str {
        &self.attributes.created_at
    }

    /// Whether the token may list this workspace's state versions
    pub fn can_read_state_versions(&self) -> bool {
        self.attributes.permissions.can_read_state_versions
    }
}

/// Workspace attributes from TFE API
///
/// Attributes the report cannot do without are required; the flags that
/// older API versions omit default to `false`.
#[derive(Deserialize, Debug, Clone)]
pub struct WorkspaceAttributes {
    pub name: String,

    pub locked: bool,

    #[serde(rename = "auto-apply")]
    pub auto_apply: bool,

    #[serde(rename = "speculative-enabled", default)]
    pub speculative_enabled: bool,

    #[serde(rename = "global-remote-state", default)]
    pub global_remote_state: bool,

    #[serde(rename = "resource-count")]
    pub resource_count: u32,

    #[serde(rename = "terraform-version")]
    pub terraform_version: String,

    #[serde(rename = "created-at")]
    pub created_at: String,

    #[serde(default)]
    pub permissions: WorkspacePermissions,
}

/// Permissions of the calling token on a workspace
#[derive(Deserialize, Debug, Clone, Default)]
pub struct WorkspacePermissions {
    #[serde(rename = "can-read-state-versions", default)]
    pub can_read_state_versions: bool,
}
