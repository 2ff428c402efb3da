// Bulk group reassignment
//
// CollectSourceIds → Confirm → { Abort | MoveAll }. Confirmation belongs to
// the caller; this module only decides what counts as a "yes".
//
// MoveAll is best-effort: each router is reassigned on its own, failures
// are recorded and the loop carries on. There is no rollback. The one
// exception is an authentication failure, which stops the run because
// every later request would be refused the same way.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::directory::FleetDirectory;
use crate::error::CoreError;

/// `true` only for a trimmed, case-insensitive `"y"`.
pub fn is_confirmed(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

/// Result of one router's reassignment, as NCM answered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveResult {
    /// Accepted. `group` is the group URL on the router NCM returned.
    Moved { group: String },
    /// Rejected, with the error text verbatim.
    Failed { reason: String },
}

impl MoveResult {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { group } if group.is_empty() => f.write_str("moved"),
            Self::Moved { group } => write!(f, "moved to {group}"),
            Self::Failed { reason } => f.write_str(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub router_id: String,
    pub result: MoveResult,
}

/// Every outcome of a run, in the order the routers were attempted.
#[derive(Debug, Clone, Serialize)]
pub struct MoveReport {
    pub source_group: String,
    pub target_group: String,
    pub outcomes: Vec<MoveOutcome>,
}

impl MoveReport {
    pub fn moved(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_moved()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.moved()
    }
}

/// The routers to move, collected before anything is changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub source_group: String,
    pub target_group: String,
    pub router_ids: Vec<String>,
}

impl MovePlan {
    /// Fetch every router id in `source_group`, in fetch order.
    ///
    /// Group ids are passed through unvalidated; NCM rejects bad ones.
    pub async fn collect<D: FleetDirectory>(
        directory: &D,
        source_group: &str,
        target_group: &str,
    ) -> Result<Self, CoreError> {
        let routers = directory.routers_in_group(source_group).await?;
        let total = routers.len();
        let router_ids: Vec<String> = routers
            .iter()
            .filter_map(|r| r.id().map(str::to_owned))
            .collect();
        if router_ids.len() < total {
            warn!(
                skipped = total - router_ids.len(),
                source_group, "router records without an id were skipped"
            );
        }

        Ok(Self {
            source_group: source_group.to_owned(),
            target_group: target_group.to_owned(),
            router_ids,
        })
    }

    pub fn len(&self) -> usize {
        self.router_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.router_ids.is_empty()
    }

    /// Reassign each router in turn, reporting every outcome to
    /// `on_outcome` as soon as it is known.
    pub async fn execute<D: FleetDirectory>(
        self,
        directory: &D,
        mut on_outcome: impl FnMut(&MoveOutcome),
    ) -> Result<MoveReport, CoreError> {
        let mut outcomes = Vec::with_capacity(self.router_ids.len());

        for router_id in self.router_ids {
            let result = match directory
                .assign_router_to_group(&router_id, &self.target_group)
                .await
            {
                Ok(router) => MoveResult::Moved {
                    group: router.group_url().to_owned(),
                },
                Err(e) if e.is_auth_error() => return Err(e),
                Err(e) => {
                    warn!(router_id = %router_id, error = %e, "router move failed");
                    MoveResult::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            let outcome = MoveOutcome { router_id, result };
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        let report = MoveReport {
            source_group: self.source_group,
            target_group: self.target_group,
            outcomes,
        };
        info!(
            moved = report.moved(),
            failed = report.failed(),
            "group move finished"
        );
        Ok(report)
    }
}
