//! UpdateContributionHandler - The contribution update transaction.
//!
//! Applies a new decision to a contribution and rewrites the owning member's
//! entitlement in a single atomic commit.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::publish_committed;
use crate::domain::contribution::Contribution;
use crate::domain::entitlement::{ContributionUpdated, Decision, EntitlementError};
use crate::domain::foundation::{ContributionId, EventId};
use crate::domain::member::Member;
use crate::ports::{Clock, ContributionRepository, EventPublisher, MemberRepository};

/// Command to change a contribution decision.
#[derive(Debug, Clone)]
pub struct UpdateContributionCommand {
    pub contribution_id: ContributionId,
    pub decision: Decision,
}

impl UpdateContributionCommand {
    /// Builds a command from caller input.
    ///
    /// # Errors
    ///
    /// `InvalidDecision` if `raw_decision` is neither yes nor no.
    pub fn parse(
        contribution_id: ContributionId,
        raw_decision: &str,
    ) -> Result<Self, EntitlementError> {
        Ok(Self {
            contribution_id,
            decision: Decision::parse(raw_decision)?,
        })
    }
}

/// Result of a committed contribution update.
#[derive(Debug, Clone)]
pub struct UpdateContributionResult {
    pub contribution: Contribution,
    pub member: Member,
    pub event: ContributionUpdated,
}

/// Handler for the contribution update transaction.
///
/// The lock policy is checked against the freshly loaded record, and the
/// commit is guarded by the contribution's version so that two concurrent
/// updates cannot both land.
pub struct UpdateContributionHandler {
    contributions: Arc<dyn ContributionRepository>,
    members: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateContributionHandler {
    pub fn new(
        contributions: Arc<dyn ContributionRepository>,
        members: Arc<dyn MemberRepository>,
        clock: Arc<dyn Clock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            contributions,
            members,
            clock,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateContributionCommand,
    ) -> Result<UpdateContributionResult, EntitlementError> {
        let today = self.clock.today();
        let now = self.clock.now();

        // 1. Load the contribution
        let mut contribution = self
            .contributions
            .find_by_id(&cmd.contribution_id)
            .await?
            .ok_or_else(|| EntitlementError::contribution_not_found(cmd.contribution_id))?;
        let previous_decision = contribution.decision;

        // 2. Lock policy, then derivation
        let derived = contribution
            .apply(cmd.decision, today, now)
            .map_err(|err| {
                warn!(
                    contribution_id = %cmd.contribution_id,
                    requested = %cmd.decision,
                    error = %err,
                    "contribution update rejected"
                );
                err
            })?;

        // 3. Rewrite the owning member's entitlement from the same derivation
        let mut member = self
            .members
            .find_by_id(&contribution.member_id)
            .await?
            .ok_or_else(|| EntitlementError::member_not_found(contribution.member_id))?;
        let previous_status = member.entitlement_status();
        member.apply_entitlement(&derived, now);

        // 4. Commit both records atomically
        if let Err(err) = self
            .contributions
            .commit_with_member(&contribution, &member)
            .await
        {
            let err = EntitlementError::from(err);
            warn!(
                contribution_id = %contribution.id,
                version = contribution.version,
                error = %err,
                "contribution commit failed"
            );
            return Err(err);
        }

        info!(
            contribution_id = %contribution.id,
            member_id = %member.id,
            decision = %contribution.decision,
            entitlement_status = member.entitlement_status().as_str(),
            version = contribution.version,
            "contribution updated"
        );

        // 5. Publish after commit
        let event = ContributionUpdated {
            event_id: EventId::new(),
            contribution_id: contribution.id,
            member_id: member.id,
            previous_decision,
            decision: contribution.decision,
            previous_status,
            entitlement_status: member.entitlement_status(),
            period_start: contribution.period_start,
            version: contribution.version,
            updated_at: now,
        };
        publish_committed(self.event_publisher.as_ref(), &event).await;

        Ok(UpdateContributionResult {
            contribution,
            member,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEntitlementStore;
    use crate::application::handlers::test_support::{date, Fixture};
    use crate::domain::entitlement::EntitlementStatus;
    use crate::domain::foundation::{DomainError, MemberId};
    use async_trait::async_trait;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// Reads through to the store but loses every commit race.
    struct LosingRaceRepository {
        inner: Arc<InMemoryEntitlementStore>,
    }

    #[async_trait]
    impl ContributionRepository for LosingRaceRepository {
        async fn find_by_id(
            &self,
            id: &ContributionId,
        ) -> Result<Option<Contribution>, DomainError> {
            ContributionRepository::find_by_id(self.inner.as_ref(), id).await
        }

        async fn find_by_member(
            &self,
            member_id: &MemberId,
        ) -> Result<Option<Contribution>, DomainError> {
            self.inner.find_by_member(member_id).await
        }

        async fn commit_with_member(
            &self,
            _contribution: &Contribution,
            _member: &Member,
        ) -> Result<(), DomainError> {
            Err(DomainError::conflict("stored version moved"))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn handler(fx: &Fixture) -> UpdateContributionHandler {
        UpdateContributionHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.clock.clone(),
            fx.bus.clone(),
        )
    }

    fn command(contribution: &Contribution, decision: Decision) -> UpdateContributionCommand {
        UpdateContributionCommand {
            contribution_id: contribution.id,
            decision,
        }
    }

    async fn stored(fx: &Fixture, contribution: &Contribution) -> (Contribution, Member) {
        let c = ContributionRepository::find_by_id(fx.store.as_ref(), &contribution.id)
            .await
            .unwrap()
            .unwrap();
        let m = MemberRepository::find_by_id(fx.store.as_ref(), &c.member_id)
            .await
            .unwrap()
            .unwrap();
        (c, m)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn yes_on_a_no_record_opens_period_and_entitles() {
        let fx = Fixture::on(date(2024, 1, 10));
        let (_, contribution) = fx.seed("AB100", Decision::No, date(2023, 6, 1)).await;

        let result = handler(&fx)
            .handle(command(&contribution, Decision::Yes))
            .await
            .unwrap();

        assert_eq!(result.contribution.decision, Decision::Yes);
        assert_eq!(result.contribution.period_start, Some(date(2024, 1, 10)));
        assert_eq!(result.contribution.period_end, None);
        assert_eq!(result.member.entitlement_status(), EntitlementStatus::Entitled);
    }

    #[tokio::test]
    async fn commits_member_and_contribution_together() {
        let fx = Fixture::on(date(2024, 1, 10));
        let (_, contribution) = fx.seed("AB101", Decision::No, date(2023, 6, 1)).await;

        handler(&fx)
            .handle(command(&contribution, Decision::Yes))
            .await
            .unwrap();

        let (c, m) = stored(&fx, &contribution).await;
        assert_eq!(c.decision, Decision::Yes);
        assert_eq!(c.version, 2);
        assert_eq!(m.entitlement_status(), EntitlementStatus::Entitled);
    }

    #[tokio::test]
    async fn publishes_contribution_updated_event() {
        let fx = Fixture::on(date(2024, 1, 10));
        let (_, contribution) = fx.seed("AB102", Decision::No, date(2023, 6, 1)).await;

        let result = handler(&fx)
            .handle(command(&contribution, Decision::Yes))
            .await
            .unwrap();

        let events = fx.bus.events_of_type("contribution.updated.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, contribution.id.to_string());
        assert!(result.event.entitlement_changed());
        assert_eq!(result.event.previous_decision, Decision::No);
    }

    #[tokio::test]
    async fn no_after_window_revokes_entitlement() {
        let fx = Fixture::on(date(2024, 2, 15));
        let (_, contribution) = fx.seed("AB103", Decision::Yes, date(2024, 1, 10)).await;

        let result = handler(&fx)
            .handle(command(&contribution, Decision::No))
            .await
            .unwrap();

        assert_eq!(result.contribution.period_start, None);
        assert_eq!(result.member.entitlement_status(), EntitlementStatus::NotEntitled);
    }

    #[tokio::test]
    async fn same_decision_twice_is_idempotent_on_status() {
        let fx = Fixture::on(date(2024, 1, 10));
        let (_, contribution) = fx.seed("AB104", Decision::No, date(2023, 6, 1)).await;
        let handler = handler(&fx);

        let first = handler
            .handle(command(&contribution, Decision::No))
            .await
            .unwrap();
        let second = handler
            .handle(command(&contribution, Decision::No))
            .await
            .unwrap();

        assert_eq!(
            first.member.entitlement_status(),
            second.member.entitlement_status()
        );
        assert_eq!(second.contribution.version, 3);
        assert!(!second.event.entitlement_changed());
    }

    #[tokio::test]
    async fn publish_failure_does_not_undo_commit() {
        let fx = Fixture::on(date(2024, 1, 10));
        let (_, contribution) = fx.seed("AB105", Decision::No, date(2023, 6, 1)).await;
        fx.bus.set_failing(true);

        let result = handler(&fx)
            .handle(command(&contribution, Decision::Yes))
            .await;

        assert!(result.is_ok());
        let (c, m) = stored(&fx, &contribution).await;
        assert_eq!(c.decision, Decision::Yes);
        assert!(m.is_entitled());
        assert_eq!(fx.bus.event_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn fails_when_contribution_not_found() {
        let fx = Fixture::on(date(2024, 1, 10));
        let missing = ContributionId::new();

        let result = handler(&fx)
            .handle(UpdateContributionCommand {
                contribution_id: missing,
                decision: Decision::Yes,
            })
            .await;

        assert_eq!(result.unwrap_err(), EntitlementError::ContributionNotFound(missing));
        assert!(fx.bus.published_events().is_empty());
    }

    #[tokio::test]
    async fn fails_when_inside_lock_window() {
        let fx = Fixture::on(date(2024, 1, 25));
        let (_, contribution) = fx.seed("AB106", Decision::Yes, date(2024, 1, 10)).await;

        let err = handler(&fx)
            .handle(command(&contribution, Decision::No))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EntitlementError::ModificationLocked { unlocks_on, .. } if unlocks_on == date(2024, 2, 10)
        ));
        let (c, m) = stored(&fx, &contribution).await;
        assert_eq!(c, contribution);
        assert!(m.is_entitled());
        assert!(fx.bus.published_events().is_empty());
    }

    #[tokio::test]
    async fn fails_with_conflict_when_commit_loses_race() {
        let fx = Fixture::on(date(2024, 1, 10));
        let (_, contribution) = fx.seed("AB107", Decision::No, date(2023, 6, 1)).await;
        let handler = UpdateContributionHandler::new(
            Arc::new(LosingRaceRepository {
                inner: fx.store.clone(),
            }),
            fx.store.clone(),
            fx.clock.clone(),
            fx.bus.clone(),
        );

        let err = handler
            .handle(command(&contribution, Decision::Yes))
            .await
            .unwrap_err();

        assert!(matches!(err, EntitlementError::Conflict(_)));
        assert!(err.is_retryable());
        let (_, m) = stored(&fx, &contribution).await;
        assert!(!m.is_entitled());
        assert!(fx.bus.published_events().is_empty());
    }

    #[tokio::test]
    async fn fails_when_repository_unavailable() {
        let fx = Fixture::on(date(2024, 1, 10));
        let (_, contribution) = fx.seed("AB108", Decision::No, date(2023, 6, 1)).await;
        fx.store.set_unavailable(true);

        let err = handler(&fx)
            .handle(command(&contribution, Decision::Yes))
            .await
            .unwrap_err();

        assert!(matches!(err, EntitlementError::RepositoryUnavailable(_)));
    }

    #[test]
    fn parse_rejects_unknown_decision() {
        let err = UpdateContributionCommand::parse(ContributionId::new(), "maybe").unwrap_err();
        assert!(matches!(err, EntitlementError::InvalidDecision(_)));

        let cmd = UpdateContributionCommand::parse(ContributionId::new(), " Oui ").unwrap();
        assert_eq!(cmd.decision, Decision::Yes);
    }
}
