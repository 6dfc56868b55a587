//! Run API operations

use log::debug;

use crate::config::api;
use crate::error::Result;
use crate::hcp::document;
use crate::hcp::TfeClient;

use super::models::Run;

impl TfeClient {
    /// Get the most recent run of a workspace
    ///
    /// Runs are listed newest first, so a single one-item page is enough.
    /// Returns `None` when the workspace has never been run.
    pub async fn latest_run(&self, workspace_id: &str) -> Result<Option<Run>> {
        let url = format!(
            "{}/{}/{}/{}?page[size]=1",
            self.base_url(),
            api::WORKSPACES,
            workspace_id,
            api::RUNS
        );

        let mut doc = self.fetch_document(&url).await?;
        let latest = match document::take_data(&mut doc).into_iter().next() {
            Some(item) => Some(document::decode_item::<Run>(item, "run")?),
            None => None,
        };

        match &latest {
            Some(run) => debug!("Latest run of '{}' is {}", workspace_id, run.id),
            None => debug!("Workspace '{}' has no runs", workspace_id),
        }
        Ok(latest)
    }
}
