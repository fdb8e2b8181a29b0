//! Claim domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, ClaimId, EventId, MemberId, Timestamp};

use super::ClaimStatus;

/// A claim was accepted through the eligibility gate and stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimFiled {
    pub event_id: EventId,
    pub claim_id: ClaimId,
    pub member_id: MemberId,
    pub receipt_number: String,
    pub amount_cents: i64,
    pub status: ClaimStatus,
    pub filed_at: Timestamp,
}

domain_event!(
    ClaimFiled,
    event_type = "claim.filed.v1",
    schema_version = 1,
    aggregate_id = claim_id,
    aggregate_type = "Claim",
    occurred_at = filed_at,
    event_id = event_id
);

/// A claim's review status changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimStatusChanged {
    pub event_id: EventId,
    pub claim_id: ClaimId,
    pub member_id: MemberId,
    pub from: ClaimStatus,
    pub to: ClaimStatus,
    pub changed_at: Timestamp,
}

domain_event!(
    ClaimStatusChanged,
    event_type = "claim.status_changed.v1",
    schema_version = 1,
    aggregate_id = claim_id,
    aggregate_type = "Claim",
    occurred_at = changed_at,
    event_id = event_id
);

/// A claim's receipt, amount or care period was edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDetailsUpdated {
    pub event_id: EventId,
    pub claim_id: ClaimId,
    pub member_id: MemberId,
    pub receipt_number: String,
    pub amount_cents: i64,
    pub status: ClaimStatus,
    pub updated_at: Timestamp,
}

domain_event!(
    ClaimDetailsUpdated,
    event_type = "claim.details_updated.v1",
    schema_version = 1,
    aggregate_id = claim_id,
    aggregate_type = "Claim",
    occurred_at = updated_at,
    event_id = event_id
);
