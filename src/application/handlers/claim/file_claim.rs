//! FileClaimHandler - Command handler for filing claims.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::publish_committed;
use crate::domain::claim::{Claim, ClaimDetails, ClaimFiled};
use crate::domain::entitlement::{ClaimEligibility, EntitlementError};
use crate::domain::foundation::{ClaimId, EventId, MemberId};
use crate::ports::{ClaimRepository, Clock, EventPublisher, MemberRepository};

/// Command to file a claim for a member.
#[derive(Debug, Clone)]
pub struct FileClaimCommand {
    pub member_id: MemberId,
    pub details: ClaimDetails,
}

/// Result of successful claim filing.
#[derive(Debug, Clone)]
pub struct FileClaimResult {
    pub claim: Claim,
    pub event: ClaimFiled,
}

/// Handler for filing claims.
///
/// The eligibility gate runs against a member read in this call, right
/// before the claim is written. A member object fetched earlier by the
/// caller is never trusted.
pub struct FileClaimHandler {
    members: Arc<dyn MemberRepository>,
    claims: Arc<dyn ClaimRepository>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl FileClaimHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        claims: Arc<dyn ClaimRepository>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            members,
            claims,
            clock,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: FileClaimCommand) -> Result<FileClaimResult, EntitlementError> {
        // 1. Validate input
        cmd.details.validate()?;

        // 2. Fresh member read
        let member = self
            .members
            .find_by_id(&cmd.member_id)
            .await?
            .ok_or_else(|| EntitlementError::member_not_found(cmd.member_id))?;

        // 3. Eligibility gate
        if let ClaimEligibility::Denied(reason) = ClaimEligibility::evaluate(&member) {
            warn!(member_id = %member.id, reason = ?reason, "claim refused");
            return Err(EntitlementError::not_entitled(member.id));
        }

        // 4. Persist the claim
        let now = self.clock.now();
        let claim = Claim::file(ClaimId::new(), member.id, cmd.details, now)?;
        self.claims.save(&claim).await?;

        info!(
            claim_id = %claim.id,
            member_id = %claim.member_id,
            amount_cents = claim.amount_cents,
            "claim filed"
        );

        // 5. Publish after commit
        let event = ClaimFiled {
            event_id: EventId::new(),
            claim_id: claim.id,
            member_id: claim.member_id,
            receipt_number: claim.receipt_number.clone(),
            amount_cents: claim.amount_cents,
            status: claim.status,
            filed_at: now,
        };
        publish_committed(self.event_publisher.as_ref(), &event).await;

        Ok(FileClaimResult { claim, event })
    }
}
