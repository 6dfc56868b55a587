//! State version API operations

use log::{debug, warn};

use crate::config::api;
use crate::error::Result;
use crate::hcp::document;
use crate::hcp::TfeClient;

use super::models::{StateVersion, StateVersionReport};

impl TfeClient {
    /// Get the newest state versions of a workspace (metadata only)
    ///
    /// The listing is filtered by workspace and organization name and is
    /// read as a single page of `STATE_VERSION_PAGE_SIZE` entries.
    pub async fn state_versions(&self, org: &str, workspace_name: &str) -> Result<StateVersionReport> {
        let url = format!(
            "{}/{}?filter[workspace][name]={}&filter[organization][name]={}&page[size]={}",
            self.base_url(),
            api::STATE_VERSIONS,
            urlencoding::encode(workspace_name),
            urlencoding::encode(org),
            api::STATE_VERSION_PAGE_SIZE
        );

        let mut doc = self.fetch_document(&url).await?;
        let versions: Vec<StateVersion> =
            document::decode_items(document::take_data(&mut doc), "state version")?;

        for version in versions.iter().filter(|v| !v.has_valid_id()) {
            warn!("Unexpected state version id '{}'", version.id);
        }

        debug!(
            "Workspace '{}' returned {} state version(s)",
            workspace_name,
            versions.len()
        );
        Ok(StateVersionReport::from_versions(versions))
    }
}
