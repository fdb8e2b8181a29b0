//! Member domain events.

use serde::{Deserialize, Serialize};

use crate::domain::entitlement::{Decision, EntitlementStatus};
use crate::domain::foundation::{
    domain_event, EventId, MemberId, MemberNumber, NationalId, Timestamp,
};

use super::Organization;

/// A new member was registered together with their initial contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRegistered {
    pub event_id: EventId,
    pub member_id: MemberId,
    pub member_number: MemberNumber,
    pub national_id: NationalId,
    pub contribution_section: Organization,
    pub initial_decision: Decision,
    pub entitlement_status: EntitlementStatus,
    pub registered_at: Timestamp,
}

domain_event!(
    MemberRegistered,
    event_type = "member.registered.v1",
    schema_version = 1,
    aggregate_id = member_id,
    aggregate_type = "Member",
    occurred_at = registered_at,
    event_id = event_id
);

/// A member's demographics were edited. Entitlement is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfileUpdated {
    pub event_id: EventId,
    pub member_id: MemberId,
    pub member_number: MemberNumber,
    pub previous_national_id: NationalId,
    pub national_id: NationalId,
    pub updated_at: Timestamp,
}

domain_event!(
    MemberProfileUpdated,
    event_type = "member.profile_updated.v1",
    schema_version = 1,
    aggregate_id = member_id,
    aggregate_type = "Member",
    occurred_at = updated_at,
    event_id = event_id
);
