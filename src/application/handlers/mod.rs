//! Application handlers.
//!
//! Command and query handlers that orchestrate the entitlement domain
//! through the ports. Every write handler commits first and publishes its
//! event afterwards.

pub mod claim;
pub mod contribution;
pub mod member;

#[cfg(test)]
pub(crate) mod test_support;

use tracing::warn;

use crate::domain::foundation::SerializableDomainEvent;
use crate::ports::EventPublisher;

pub use claim::{
    CheckClaimEligibilityHandler, CheckClaimEligibilityQuery, CheckClaimEligibilityResult,
    FileClaimCommand, FileClaimHandler, FileClaimResult, SearchClaimsHandler, SearchClaimsQuery,
    SearchClaimsResult, UpdateClaimDetailsCommand, UpdateClaimDetailsHandler,
    UpdateClaimDetailsResult, UpdateClaimStatusCommand, UpdateClaimStatusHandler,
    UpdateClaimStatusResult,
};
pub use contribution::{
    ContributionListItem, GetContributionHandler, GetContributionQuery,
    SearchContributionsHandler, SearchContributionsQuery, SearchContributionsResult,
    UpdateContributionCommand, UpdateContributionHandler, UpdateContributionResult,
};
pub use member::{
    GetMemberHandler, GetMemberQuery, GetMemberResult, RegisterMemberCommand,
    RegisterMemberHandler, RegisterMemberResult, SearchMembersHandler, SearchMembersQuery,
    SearchMembersResult, UpdateMemberProfileCommand, UpdateMemberProfileHandler,
    UpdateMemberProfileResult,
};

/// Trimmed filter value, or `None` when the operator left it blank.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Publishes an event whose state change is already committed.
///
/// Failures are logged and swallowed. The committed state stands.
pub(crate) async fn publish_committed<E>(publisher: &dyn EventPublisher, event: &E)
where
    E: SerializableDomainEvent,
{
    let envelope = match event.to_envelope() {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(
                event_type = event.event_type(),
                error = %err,
                "failed to build event envelope after commit"
            );
            return;
        }
    };

    if let Err(err) = publisher.publish(envelope).await {
        warn!(
            event_type = event.event_type(),
            aggregate_id = %event.aggregate_id(),
            error = %err,
            "event publish failed after commit"
        );
    }
}
