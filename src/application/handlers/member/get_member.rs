//! GetMemberHandler - Query handler for the member detail screen.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::claim::Claim;
use crate::domain::contribution::Contribution;
use crate::domain::entitlement::{EntitlementError, LockState};
use crate::domain::foundation::MemberId;
use crate::domain::member::Member;
use crate::ports::{ClaimRepository, Clock, ContributionRepository, MemberRepository};

#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    pub member_id: MemberId,
}

/// A member with their contribution, its lock state today, and their claims.
#[derive(Debug, Clone)]
pub struct GetMemberResult {
    pub member: Member,
    pub contribution: Contribution,
    pub can_modify: bool,
    pub unlocks_on: Option<NaiveDate>,
    pub claims: Vec<Claim>,
}

/// Handler for member detail lookups.
pub struct GetMemberHandler {
    members: Arc<dyn MemberRepository>,
    contributions: Arc<dyn ContributionRepository>,
    claims: Arc<dyn ClaimRepository>,
    clock: Arc<dyn Clock>,
}

impl GetMemberHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        contributions: Arc<dyn ContributionRepository>,
        claims: Arc<dyn ClaimRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            members,
            contributions,
            claims,
            clock,
        }
    }

    pub async fn handle(&self, query: GetMemberQuery) -> Result<GetMemberResult, EntitlementError> {
        let member = self
            .members
            .find_by_id(&query.member_id)
            .await?
            .ok_or_else(|| EntitlementError::member_not_found(query.member_id))?;

        // Registration writes both rows together, so a gap here is a broken store.
        let Some(contribution) = self.contributions.find_by_member(&member.id).await? else {
            warn!(member_id = %member.id, "member has no contribution record");
            return Err(EntitlementError::no_contribution_for_member(member.id));
        };

        let claims = self.claims.list_by_member(&member.id).await?;
        let lock = contribution.lock_state(self.clock.today());
        debug!(member_id = %member.id, claims = claims.len(), "member detail");

        Ok(GetMemberResult {
            can_modify: lock.is_unlocked(),
            unlocks_on: match lock {
                LockState::Locked { unlocks_on, .. } => Some(unlocks_on),
                LockState::Unlocked => None,
            },
            member,
            contribution,
            claims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{date, Fixture};
    use crate::domain::claim::ClaimDetails;
    use crate::domain::entitlement::Decision;
    use crate::domain::foundation::{ClaimId, ContributionId, DomainError};
    use async_trait::async_trait;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// A contribution table that lost its rows.
    struct EmptyContributions;

    #[async_trait]
    impl ContributionRepository for EmptyContributions {
        async fn find_by_id(
            &self,
            _id: &ContributionId,
        ) -> Result<Option<Contribution>, DomainError> {
            Ok(None)
        }

        async fn find_by_member(
            &self,
            _member_id: &MemberId,
        ) -> Result<Option<Contribution>, DomainError> {
            Ok(None)
        }

        async fn commit_with_member(
            &self,
            _contribution: &Contribution,
            _member: &Member,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn handler(fx: &Fixture) -> GetMemberHandler {
        GetMemberHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.clock.clone(),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn returns_member_with_locked_contribution_and_claims() {
        let fx = Fixture::on(date(2024, 1, 25));
        let (member, contribution) = fx.seed("AB900", Decision::Yes, date(2024, 1, 10)).await;
        let claim = Claim::file(
            ClaimId::new(),
            member.id,
            ClaimDetails {
                receipt_number: "R-900".to_string(),
                amount_cents: 3_000,
                beneficiary: None,
                care_start: date(2024, 1, 20),
                care_end: date(2024, 1, 20),
                status: None,
            },
            fx.clock.now(),
        )
        .unwrap();
        fx.store.save(&claim).await.unwrap();

        let result = handler(&fx)
            .handle(GetMemberQuery {
                member_id: member.id,
            })
            .await
            .unwrap();

        assert_eq!(result.member, member);
        assert_eq!(result.contribution.id, contribution.id);
        assert!(!result.can_modify);
        assert_eq!(result.unlocks_on, Some(date(2024, 2, 10)));
        assert_eq!(result.claims, vec![claim]);
    }

    #[tokio::test]
    async fn unlocked_contribution_has_no_unlock_date() {
        let fx = Fixture::on(date(2024, 3, 1));
        let (member, _) = fx.seed("AB901", Decision::No, date(2024, 2, 28)).await;

        let result = handler(&fx)
            .handle(GetMemberQuery {
                member_id: member.id,
            })
            .await
            .unwrap();

        assert!(result.can_modify);
        assert_eq!(result.unlocks_on, None);
        assert!(result.claims.is_empty());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn fails_when_member_not_found() {
        let fx = Fixture::on(date(2024, 3, 1));
        let missing = MemberId::new();

        let err = handler(&fx)
            .handle(GetMemberQuery { member_id: missing })
            .await
            .unwrap_err();

        assert_eq!(err, EntitlementError::MemberNotFound(missing));
    }

    #[tokio::test]
    async fn fails_when_contribution_row_is_missing() {
        let fx = Fixture::on(date(2024, 3, 1));
        let (member, _) = fx.seed("AB902", Decision::No, date(2024, 1, 10)).await;
        let handler = GetMemberHandler::new(
            fx.store.clone(),
            Arc::new(EmptyContributions),
            fx.store.clone(),
            fx.clock.clone(),
        );

        let err = handler
            .handle(GetMemberQuery {
                member_id: member.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, EntitlementError::NoContributionForMember(member.id));
    }
}
