//! Entitlement lifecycle events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, ContributionId, EventId, MemberId, Timestamp};

use super::{Decision, EntitlementStatus};

/// A contribution decision was changed and the member's entitlement
/// rewritten in the same commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionUpdated {
    pub event_id: EventId,
    pub contribution_id: ContributionId,
    pub member_id: MemberId,
    pub previous_decision: Decision,
    pub decision: Decision,
    pub previous_status: EntitlementStatus,
    pub entitlement_status: EntitlementStatus,
    pub period_start: Option<NaiveDate>,
    pub version: u64,
    pub updated_at: Timestamp,
}

impl ContributionUpdated {
    /// True when the member's entitlement flipped.
    pub fn entitlement_changed(&self) -> bool {
        self.previous_status != self.entitlement_status
    }
}

domain_event!(
    ContributionUpdated,
    event_type = "contribution.updated.v1",
    schema_version = 1,
    aggregate_id = contribution_id,
    aggregate_type = "Contribution",
    occurred_at = updated_at,
    event_id = event_id
);
