//! CheckClaimEligibilityHandler - Query handler for the claim gate.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::domain::entitlement::{ClaimDenialReason, ClaimEligibility, EntitlementError};
use crate::domain::foundation::MemberId;
use crate::ports::MemberRepository;

/// Query asking whether a member may file a claim.
#[derive(Debug, Clone)]
pub struct CheckClaimEligibilityQuery {
    pub member_id: MemberId,
}

/// Result of the eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckClaimEligibilityResult {
    pub member_id: MemberId,
    pub eligible: bool,
    /// Set when `eligible` is false.
    pub reason: Option<ClaimDenialReason>,
    /// User-facing explanation of `reason`.
    pub message: Option<String>,
}

/// Handler answering the claim eligibility gate for a member.
///
/// Advisory only: `FileClaimHandler` evaluates the gate again at write time.
pub struct CheckClaimEligibilityHandler {
    members: Arc<dyn MemberRepository>,
}

impl CheckClaimEligibilityHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(
        &self,
        query: CheckClaimEligibilityQuery,
    ) -> Result<CheckClaimEligibilityResult, EntitlementError> {
        let member = self
            .members
            .find_by_id(&query.member_id)
            .await?
            .ok_or_else(|| EntitlementError::member_not_found(query.member_id))?;

        let eligibility = ClaimEligibility::evaluate(&member);
        debug!(
            member_id = %member.id,
            eligible = eligibility.is_eligible(),
            "claim eligibility checked"
        );

        let reason = eligibility.denial_reason().cloned();
        Ok(CheckClaimEligibilityResult {
            member_id: member.id,
            eligible: eligibility.is_eligible(),
            message: reason.as_ref().map(ClaimDenialReason::user_message),
            reason,
        })
    }
}
