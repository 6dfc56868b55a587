//! Diff between the two newest configuration versions of a workspace

use log::debug;

use crate::cli::SingleVersionPolicy;
use crate::diff::{diff_trees, FileChange};
use crate::error::{Result, TfeError};
use crate::hcp::traits::TfeResource;
use crate::hcp::TfeClient;
use crate::scratch::{extract_archive, ScratchSpace, Slot};

use super::models::ConfigurationVersion;

/// Configuration versions selected for comparison
#[derive(Debug, PartialEq)]
pub enum DiffPair<'a> {
    /// Only one version exists and the policy allows carrying on
    SingleVersion(&'a ConfigurationVersion),
    Pair {
        latest: &'a ConfigurationVersion,
        previous: &'a ConfigurationVersion,
    },
}

/// Result of comparing configuration versions
#[derive(Debug)]
pub enum ConfigDiffOutcome {
    /// No previous version to compare against
    SingleVersion { id: String },
    /// Two versions compared; `changes` is empty when they are identical
    Compared {
        latest: String,
        previous: String,
        changes: Vec<FileChange>,
    },
}

/// Pick the versions to compare
///
/// The newest version must be the one the latest run was started from.
pub fn select_diff_pair<'a>(
    run_cv_id: &str,
    versions: &'a [ConfigurationVersion],
    policy: SingleVersionPolicy,
) -> Result<DiffPair<'a>> {
    let latest = versions.first().ok_or_else(|| {
        TfeError::Consistency(format!(
            "run references configuration version '{}' but the workspace lists none",
            run_cv_id
        ))
    })?;

    if latest.id != run_cv_id {
        return Err(TfeError::Consistency(format!(
            "latest run uses configuration version '{}' but the newest listed is '{}'",
            run_cv_id, latest.id
        )));
    }

    match (versions.get(1), policy) {
        (Some(previous), _) => Ok(DiffPair::Pair { latest, previous }),
        (None, SingleVersionPolicy::Skip) => Ok(DiffPair::SingleVersion(latest)),
        (None, SingleVersionPolicy::Fail) => Err(TfeError::Consistency(format!(
            "configuration version '{}' has no predecessor to compare against",
            latest.id
        ))),
    }
}

/// Download, unpack and compare the two newest configuration versions
///
/// Both scratch directories are emptied again once the comparison is done.
pub async fn diff_configuration_versions(
    client: &TfeClient,
    workspace_id: &str,
    run_cv_id: &str,
    scratch: &ScratchSpace,
    policy: SingleVersionPolicy,
) -> Result<ConfigDiffOutcome> {
    let versions = client.get_configuration_versions(workspace_id).await?;

    let (latest, previous) = match select_diff_pair(run_cv_id, &versions, policy)? {
        DiffPair::SingleVersion(only) => {
            debug!("Workspace '{}' has a single configuration version", workspace_id);
            return Ok(ConfigDiffOutcome::SingleVersion {
                id: only.id.clone(),
            });
        }
        DiffPair::Pair { latest, previous } => (latest, previous),
    };

    scratch.prepare()?;
    for (slot, cv) in [(Slot::Latest, latest), (Slot::Previous, previous)] {
        let archive = scratch.archive_path(slot);
        let bytes = client.download_configuration(cv, &archive).await?;
        debug!("Fetched {} ({} bytes)", cv.label(), bytes);
        extract_archive(&archive, &scratch.extract_dir(slot))?;
    }

    let changes = diff_trees(
        &scratch.extract_dir(Slot::Previous),
        &scratch.extract_dir(Slot::Latest),
    )?;
    scratch.reset()?;

    debug!(
        "{} -> {}: {} changed file(s)",
        previous.id,
        latest.id,
        changes.len()
    );
    Ok(ConfigDiffOutcome::Compared {
        latest: latest.id.clone(),
        previous: previous.id.clone(),
        changes,
    })
}
