//! UpdateClaimDetailsHandler - Command handler for correcting a filed claim.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::publish_committed;
use crate::domain::claim::{Claim, ClaimDetails, ClaimDetailsUpdated};
use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::{ClaimId, EventId};
use crate::ports::{ClaimRepository, Clock, EventPublisher};

/// Command to rewrite a claim's receipt, amount, beneficiary and care period.
#[derive(Debug, Clone)]
pub struct UpdateClaimDetailsCommand {
    pub claim_id: ClaimId,
    pub details: ClaimDetails,
}

/// Result of a details update.
#[derive(Debug, Clone)]
pub struct UpdateClaimDetailsResult {
    pub claim: Claim,
    pub event: ClaimDetailsUpdated,
}

/// Handler for claim corrections.
///
/// Entitlement is not re-checked. The claim passed the gate when it was filed.
pub struct UpdateClaimDetailsHandler {
    claims: Arc<dyn ClaimRepository>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateClaimDetailsHandler {
    pub fn new(
        claims: Arc<dyn ClaimRepository>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            claims,
            clock,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateClaimDetailsCommand,
    ) -> Result<UpdateClaimDetailsResult, EntitlementError> {
        // 1. Validate
        cmd.details.validate()?;

        // 2. Load the claim
        let mut claim = self
            .claims
            .find_by_id(&cmd.claim_id)
            .await?
            .ok_or_else(|| EntitlementError::claim_not_found(cmd.claim_id))?;

        // 3. Apply, routing any status change through the state machine
        let now = self.clock.now();
        let current = claim.status;
        let target = cmd.details.status.unwrap_or(current);
        claim.update_details(cmd.details, now).map_err(|_| {
            warn!(
                claim_id = %claim.id,
                from = %current,
                to = %target,
                "invalid claim transition in details update"
            );
            EntitlementError::invalid_state(current.as_str(), target.as_str())
        })?;

        // 4. Persist
        self.claims.update(&claim).await?;
        info!(
            claim_id = %claim.id,
            amount_cents = claim.amount_cents,
            status = %claim.status,
            "claim details updated"
        );

        // 5. Publish after commit
        let event = ClaimDetailsUpdated {
            event_id: EventId::new(),
            claim_id: claim.id,
            member_id: claim.member_id,
            receipt_number: claim.receipt_number.clone(),
            amount_cents: claim.amount_cents,
            status: claim.status,
            updated_at: now,
        };
        publish_committed(self.event_publisher.as_ref(), &event).await;

        Ok(UpdateClaimDetailsResult { claim, event })
    }
}
