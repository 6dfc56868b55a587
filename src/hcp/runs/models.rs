//! Run data models

use serde::Deserialize;

use crate::hcp::configuration_versions::is_configuration_version_id;
use crate::hcp::traits::TfeResource;
use crate::hcp::workspaces::RelationshipData;

/// Run lifecycle status
///
/// Statuses this build does not know about are kept verbatim in `Unknown`
/// so a newer server never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RunStatus {
    Pending,
    Fetching,
    FetchingCompleted,
    PrePlanRunning,
    PrePlanCompleted,
    Queuing,
    PlanQueued,
    Planning,
    Planned,
    CostEstimating,
    CostEstimated,
    PolicyChecking,
    PolicyOverride,
    PolicySoftFailed,
    PolicyChecked,
    Confirmed,
    PostPlanRunning,
    PostPlanCompleted,
    PlannedAndFinished,
    PlannedAndSaved,
    ApplyQueued,
    Applying,
    Applied,
    Discarded,
    Errored,
    Canceled,
    ForceCanceled,
    Unknown(String),
}

impl RunStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Fetching => "fetching",
            RunStatus::FetchingCompleted => "fetching_completed",
            RunStatus::PrePlanRunning => "pre_plan_running",
            RunStatus::PrePlanCompleted => "pre_plan_completed",
            RunStatus::Queuing => "queuing",
            RunStatus::PlanQueued => "plan_queued",
            RunStatus::Planning => "planning",
            RunStatus::Planned => "planned",
            RunStatus::CostEstimating => "cost_estimating",
            RunStatus::CostEstimated => "cost_estimated",
            RunStatus::PolicyChecking => "policy_checking",
            RunStatus::PolicyOverride => "policy_override",
            RunStatus::PolicySoftFailed => "policy_soft_failed",
            RunStatus::PolicyChecked => "policy_checked",
            RunStatus::Confirmed => "confirmed",
            RunStatus::PostPlanRunning => "post_plan_running",
            RunStatus::PostPlanCompleted => "post_plan_completed",
            RunStatus::PlannedAndFinished => "planned_and_finished",
            RunStatus::PlannedAndSaved => "planned_and_saved",
            RunStatus::ApplyQueued => "apply_queued",
            RunStatus::Applying => "applying",
            RunStatus::Applied => "applied",
            RunStatus::Discarded => "discarded",
            RunStatus::Errored => "errored",
            RunStatus::Canceled => "canceled",
            RunStatus::ForceCanceled => "force_canceled",
            RunStatus::Unknown(raw) => raw,
        }
    }

    /// Check if the run is still in progress
    pub fn is_non_final(&self) -> bool {
        !matches!(
            self,
            RunStatus::Applied
                | RunStatus::Discarded
                | RunStatus::Errored
                | RunStatus::Canceled
                | RunStatus::ForceCanceled
                | RunStatus::PlannedAndFinished
                | RunStatus::PlannedAndSaved
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for RunStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => RunStatus::Pending,
            "fetching" => RunStatus::Fetching,
            "fetching_completed" => RunStatus::FetchingCompleted,
            "pre_plan_running" => RunStatus::PrePlanRunning,
            "pre_plan_completed" => RunStatus::PrePlanCompleted,
            "queuing" => RunStatus::Queuing,
            "plan_queued" => RunStatus::PlanQueued,
            "planning" => RunStatus::Planning,
            "planned" => RunStatus::Planned,
            "cost_estimating" => RunStatus::CostEstimating,
            "cost_estimated" => RunStatus::CostEstimated,
            "policy_checking" => RunStatus::PolicyChecking,
            "policy_override" => RunStatus::PolicyOverride,
            "policy_soft_failed" => RunStatus::PolicySoftFailed,
            "policy_checked" => RunStatus::PolicyChecked,
            "confirmed" => RunStatus::Confirmed,
            "post_plan_running" => RunStatus::PostPlanRunning,
            "post_plan_completed" => RunStatus::PostPlanCompleted,
            "planned_and_finished" => RunStatus::PlannedAndFinished,
            "planned_and_saved" => RunStatus::PlannedAndSaved,
            "apply_queued" => RunStatus::ApplyQueued,
            "applying" => RunStatus::Applying,
            "applied" => RunStatus::Applied,
            "discarded" => RunStatus::Discarded,
            "errored" => RunStatus::Errored,
            "canceled" => RunStatus::Canceled,
            "force_canceled" => RunStatus::ForceCanceled,
            other => RunStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        RunStatus::from(s.as_str())
    }
}

/// Lifecycle milestones recorded in a run's `status-timestamps`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    PlanQueueable,
    PlanQueued,
    Planning,
    Planned,
    ApplyQueued,
    Applying,
    Confirmed,
    Applied,
}

impl Milestone {
    /// Every milestone, in lifecycle order
    pub const ALL: [Milestone; 8] = [
        Milestone::PlanQueueable,
        Milestone::PlanQueued,
        Milestone::Planning,
        Milestone::Planned,
        Milestone::ApplyQueued,
        Milestone::Applying,
        Milestone::Confirmed,
        Milestone::Applied,
    ];

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Milestone::PlanQueueable => "plan queueable",
            Milestone::PlanQueued => "plan queued",
            Milestone::Planning => "planning",
            Milestone::Planned => "planned",
            Milestone::ApplyQueued => "apply queued",
            Milestone::Applying => "applying",
            Milestone::Confirmed => "confirmed",
            Milestone::Applied => "applied",
        }
    }
}

/// Raw `status-timestamps` object; every key is independently optional
#[derive(Deserialize, Debug, Clone, Default)]
pub struct StatusTimestamps {
    #[serde(rename = "plan-queueable-at")]
    pub plan_queueable_at: Option<String>,
    #[serde(rename = "plan-queued-at")]
    pub plan_queued_at: Option<String>,
    #[serde(rename = "planning-at")]
    pub planning_at: Option<String>,
    #[serde(rename = "planned-at")]
    pub planned_at: Option<String>,
    #[serde(rename = "apply-queued-at")]
    pub apply_queued_at: Option<String>,
    #[serde(rename = "applying-at")]
    pub applying_at: Option<String>,
    #[serde(rename = "confirmed-at")]
    pub confirmed_at: Option<String>,
    #[serde(rename = "applied-at")]
    pub applied_at: Option<String>,
}

impl StatusTimestamps {
    /// Timestamp at which the milestone was reached
    pub fn get(&self, milestone: Milestone) -> Option<&str> {
        let value = match milestone {
            Milestone::PlanQueueable => &self.plan_queueable_at,
            Milestone::PlanQueued => &self.plan_queued_at,
            Milestone::Planning => &self.planning_at,
            Milestone::Planned => &self.planned_at,
            Milestone::ApplyQueued => &self.apply_queued_at,
            Milestone::Applying => &self.applying_at,
            Milestone::Confirmed => &self.confirmed_at,
            Milestone::Applied => &self.applied_at,
        };
        value.as_deref()
    }
}

/// Run data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Run {
    pub id: String,
    pub attributes: RunAttributes,
    #[serde(default)]
    pub relationships: Option<RunRelationships>,
}

/// Run attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RunAttributes {
    pub status: RunStatus,
    pub message: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "trigger-reason")]
    pub trigger_reason: Option<String>,
    #[serde(rename = "status-timestamps", default)]
    pub status_timestamps: StatusTimestamps,
}

/// Run relationships from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct RunRelationships {
    pub workspace: Option<RelationshipData>,
    #[serde(rename = "configuration-version")]
    pub configuration_version: Option<RelationshipData>,
    #[serde(rename = "created-by")]
    pub created_by: Option<RelationshipData>,
}

impl TfeResource for Run {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        format!("run '{}'", self.id)
    }
}

impl Run {
    /// Get run status
    pub fn status(&self) -> &RunStatus {
        &self.attributes.status
    }

    /// Workspace the run belongs to
    pub fn workspace_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.workspace.as_ref())
            .and_then(RelationshipData::id)
    }

    /// User who created the run
    pub fn creator_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.created_by.as_ref())
            .and_then(RelationshipData::id)
    }

    /// Configuration version the run was started from
    pub fn configuration_version_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|r| r.configuration_version.as_ref())
            .and_then(RelationshipData::id)
    }

    /// Configuration version id, only when it is a proper `cv-` reference
    pub fn diffable_configuration_version(&self) -> Option<&str> {
        self.configuration_version_id()
            .filter(|id| is_configuration_version_id(id))
    }

    /// Every milestone with its timestamp, `None` when not reached
    pub fn milestones(&self) -> Vec<(Milestone, Option<&str>)> {
        Milestone::ALL
            .iter()
            .map(|m| (*m, self.attributes.status_timestamps.get(*m)))
            .collect()
    }
}
