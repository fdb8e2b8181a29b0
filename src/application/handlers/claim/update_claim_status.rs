//! UpdateClaimStatusHandler - Command handler for claim review.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::publish_committed;
use crate::domain::claim::{Claim, ClaimStatus, ClaimStatusChanged};
use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::{ClaimId, EventId};
use crate::ports::{ClaimRepository, Clock, EventPublisher};

/// Command to move a claim to a new status.
#[derive(Debug, Clone)]
pub struct UpdateClaimStatusCommand {
    pub claim_id: ClaimId,
    pub status: ClaimStatus,
}

/// Result of a status change.
#[derive(Debug, Clone)]
pub struct UpdateClaimStatusResult {
    pub claim: Claim,
    pub event: ClaimStatusChanged,
}

/// Handler for claim status changes.
///
/// The member's entitlement is not consulted: a claim filed while entitled
/// stays valid after the entitlement lapses.
pub struct UpdateClaimStatusHandler {
    claims: Arc<dyn ClaimRepository>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateClaimStatusHandler {
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
        cmd: UpdateClaimStatusCommand,
    ) -> Result<UpdateClaimStatusResult, EntitlementError> {
        // 1. Load the claim
        let mut claim = self
            .claims
            .find_by_id(&cmd.claim_id)
            .await?
            .ok_or_else(|| EntitlementError::claim_not_found(cmd.claim_id))?;

        // 2. Transition
        let now = self.clock.now();
        let previous = claim.change_status(cmd.status, now).map_err(|_| {
            warn!(
                claim_id = %claim.id,
                from = %claim.status,
                to = %cmd.status,
                "invalid claim transition"
            );
            EntitlementError::invalid_state(claim.status.as_str(), cmd.status.as_str())
        })?;

        // 3. Persist
        self.claims.update(&claim).await?;
        info!(
            claim_id = %claim.id,
            from = %previous,
            to = %claim.status,
            "claim status changed"
        );

        // 4. Publish after commit
        let event = ClaimStatusChanged {
            event_id: EventId::new(),
            claim_id: claim.id,
            member_id: claim.member_id,
            from: previous,
            to: claim.status,
            changed_at: now,
        };
        publish_committed(self.event_publisher.as_ref(), &event).await;

        Ok(UpdateClaimStatusResult { claim, event })
    }
}
