//! Configuration versions API operations

use log::debug;
use std::path::Path;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::client::{FetchTarget, Fetched};
use crate::hcp::document;
use crate::hcp::TfeClient;

use super::models::ConfigurationVersion;

impl TfeClient {
    /// Get the newest configuration versions of a workspace, newest first
    ///
    /// Only the first page is read: the diff needs the head pair and nothing
    /// older, so long upload histories never count against the page budget.
    pub async fn get_configuration_versions(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<ConfigurationVersion>> {
        let url = format!(
            "{}/{}/{}/{}?page[size]={}",
            self.base_url(),
            api::WORKSPACES,
            workspace_id,
            api::CONFIGURATION_VERSIONS,
            api::CONFIGURATION_VERSION_PAGE_SIZE
        );

        let mut doc = self.fetch_document(&url).await?;
        let items = document::take_data(&mut doc);
        let versions: Vec<ConfigurationVersion> =
            document::decode_items(items, "configuration version")?;

        debug!(
            "Fetched {} configuration versions for workspace '{}'",
            versions.len(),
            workspace_id
        );
        Ok(versions)
    }

    /// Download a configuration version tarball and write it, decompressed, to `output_path`
    ///
    /// # Returns
    /// Number of bytes written
    pub async fn download_configuration(
        &self,
        cv: &ConfigurationVersion,
        output_path: &Path,
    ) -> Result<u64> {
        let link = cv.download_path().ok_or_else(|| TfeError::MissingField {
            resource: format!("configuration version '{}'", cv.id),
            detail: "missing field `links.download`".to_string(),
        })?;

        debug!("Downloading {} from {}", cv.id, link);
        match self.fetch(link, FetchTarget::Download(output_path)).await? {
            Fetched::Archive { bytes } => Ok(bytes),
            other => Err(TfeError::Config(format!(
                "'{}' is not an archive target (got {:?})",
                output_path.display(),
                other
            ))),
        }
    }
}
