//! In-memory entitlement store.
//!
//! Implements every repository port over a single set of tables guarded by
//! one `Mutex`, so a multi-record commit is atomic with respect to all
//! readers. Suitable for tests and single-process embedding; nothing
//! survives a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::claim::Claim;
use crate::domain::contribution::Contribution;
use crate::domain::foundation::{
    ClaimId, ContributionId, DomainError, ErrorCode, MemberId, MemberNumber, NationalId,
};
use crate::domain::member::Member;
use crate::ports::{
    ClaimFilter, ClaimReader, ClaimRepository, ClaimView, ContributionFilter, ContributionReader,
    ContributionRepository, ContributionView, MemberFilter, MemberReader, MemberRepository,
};

#[derive(Default)]
struct Tables {
    members: HashMap<MemberId, Member>,
    contributions: HashMap<ContributionId, Contribution>,
    claims: HashMap<ClaimId, Claim>,
    last_member_sequence: u32,
}

impl Tables {
    fn claim_view(&self, claim: &Claim) -> Option<ClaimView> {
        let member = self.members.get(&claim.member_id)?;
        Some(ClaimView {
            claim_id: claim.id,
            member_id: member.id,
            member_number: member.member_number.clone(),
            national_id: member.profile.national_id.clone(),
            last_name: member.profile.last_name.clone(),
            first_name: member.profile.first_name.clone(),
            receipt_number: claim.receipt_number.clone(),
            status: claim.status,
            amount_cents: claim.amount_cents,
            beneficiary: claim.beneficiary.clone(),
            care_start: claim.care_start,
            care_end: claim.care_end,
            updated_at: claim.updated_at,
        })
    }

    fn view(&self, contribution: &Contribution) -> Option<ContributionView> {
        let member = self.members.get(&contribution.member_id)?;
        Some(ContributionView {
            contribution_id: contribution.id,
            member_id: member.id,
            member_number: member.member_number.clone(),
            national_id: member.profile.national_id.clone(),
            last_name: member.profile.last_name.clone(),
            first_name: member.profile.first_name.clone(),
            bank_account: member.profile.bank_account.as_str().to_string(),
            hire_date: member.profile.hire_date,
            decision: contribution.decision,
            period_start: contribution.period_start,
            period_end: contribution.period_end,
            entitlement_status: member.entitlement_status(),
            updated_at: contribution.updated_at,
        })
    }
}

/// In-memory implementation of the repository ports.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryEntitlementStore::new());
/// let handler = UpdateContributionHandler::new(
///     store.clone(), store.clone(), clock, publisher,
/// );
/// ```
#[derive(Default)]
pub struct InMemoryEntitlementStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryEntitlementStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every operation fails with `DatabaseError` as if the
    /// backing store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored claims.
    pub fn claim_count(&self) -> usize {
        self.tables
            .lock()
            .map(|t| t.claims.len())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("in-memory store marked unavailable"));
        }
        self.tables
            .lock()
            .map_err(|_| DomainError::database("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl MemberRepository for InMemoryEntitlementStore {
    async fn register(
        &self,
        member: &Member,
        contribution: &Contribution,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock()?;

        let taken = tables.members.values().any(|m| {
            m.profile.national_id == member.profile.national_id
                || m.member_number == member.member_number
        });
        if taken || tables.members.contains_key(&member.id) {
            return Err(DomainError::new(
                ErrorCode::MemberExists,
                format!("Member {} already registered", member.profile.national_id),
            )
            .with_detail("national_id", member.profile.national_id.as_str()));
        }
        if contribution.member_id != member.id {
            return Err(DomainError::validation(
                "member_id",
                "contribution does not belong to the registered member",
            ));
        }

        tables.members.insert(member.id, member.clone());
        tables
            .contributions
            .insert(contribution.id, contribution.clone());
        Ok(())
    }

    async fn update_profile(&self, member: &Member) -> Result<(), DomainError> {
        let mut tables = self.lock()?;

        let taken = tables
            .members
            .values()
            .any(|m| m.id != member.id && m.profile.national_id == member.profile.national_id);
        if taken {
            return Err(DomainError::new(
                ErrorCode::MemberExists,
                format!("Member {} already registered", member.profile.national_id),
            )
            .with_detail("national_id", member.profile.national_id.as_str()));
        }
        let Some(stored) = tables.members.get_mut(&member.id) else {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found")
                .with_detail("id", member.id.to_string()));
        };

        *stored = Member::restore(
            stored.id,
            stored.member_number.clone(),
            member.profile.clone(),
            stored.entitlement_status(),
            stored.created_at,
            member.updated_at,
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.lock()?.members.get(id).cloned())
    }

    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<Member>, DomainError> {
        Ok(self
            .lock()?
            .members
            .values()
            .find(|m| &m.profile.national_id == national_id)
            .cloned())
    }

    async fn next_member_number(&self) -> Result<MemberNumber, DomainError> {
        let mut tables = self.lock()?;
        let next = tables.last_member_sequence + 1;
        let number = MemberNumber::from_sequence(next)?;
        tables.last_member_sequence = next;
        Ok(number)
    }
}

#[async_trait]
impl ContributionRepository for InMemoryEntitlementStore {
    async fn find_by_id(&self, id: &ContributionId) -> Result<Option<Contribution>, DomainError> {
        Ok(self.lock()?.contributions.get(id).cloned())
    }

    async fn find_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<Contribution>, DomainError> {
        Ok(self
            .lock()?
            .contributions
            .values()
            .find(|c| &c.member_id == member_id)
            .cloned())
    }

    async fn commit_with_member(
        &self,
        contribution: &Contribution,
        member: &Member,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock()?;

        let stored_version = match tables.contributions.get(&contribution.id) {
            Some(stored) => stored.version,
            None => {
                return Err(DomainError::new(
                    ErrorCode::ContributionNotFound,
                    "Contribution no longer exists",
                )
                .with_detail("id", contribution.id.to_string()))
            }
        };
        if stored_version != contribution.expected_stored_version() {
            return Err(DomainError::conflict(format!(
                "contribution {} is at version {}, expected {}",
                contribution.id,
                stored_version,
                contribution.expected_stored_version()
            )));
        }
        if contribution.member_id != member.id {
            return Err(DomainError::validation(
                "member_id",
                "contribution does not belong to this member",
            ));
        }
        let Some(stored_member) = tables.members.get_mut(&member.id) else {
            return Err(
                DomainError::new(ErrorCode::MemberNotFound, "Member no longer exists")
                    .with_detail("id", member.id.to_string()),
            );
        };

        // Only the entitlement columns move; the rest of the member row is
        // owned by other workflows.
        *stored_member = Member::restore(
            stored_member.id,
            stored_member.member_number.clone(),
            stored_member.profile.clone(),
            member.entitlement_status(),
            stored_member.created_at,
            member.updated_at,
        );
        tables
            .contributions
            .insert(contribution.id, contribution.clone());
        Ok(())
    }
}

#[async_trait]
impl ContributionReader for InMemoryEntitlementStore {
    async fn search(
        &self,
        filter: &ContributionFilter,
    ) -> Result<Vec<ContributionView>, DomainError> {
        let tables = self.lock()?;
        let mut views: Vec<ContributionView> = tables
            .contributions
            .values()
            .filter_map(|c| tables.view(c))
            .filter(|v| v.matches(filter))
            .collect();
        views.sort_by_key(|v| v.member_number.sequence());
        Ok(views)
    }

    async fn get(&self, id: &ContributionId) -> Result<Option<ContributionView>, DomainError> {
        let tables = self.lock()?;
        Ok(tables.contributions.get(id).and_then(|c| tables.view(c)))
    }
}

#[async_trait]
impl MemberReader for InMemoryEntitlementStore {
    async fn search(&self, filter: &MemberFilter) -> Result<Vec<Member>, DomainError> {
        let tables = self.lock()?;
        let mut members: Vec<Member> = tables
            .members
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        members.sort_by_key(|m| m.member_number.sequence());
        Ok(members)
    }
}

#[async_trait]
impl ClaimReader for InMemoryEntitlementStore {
    async fn search(&self, filter: &ClaimFilter) -> Result<Vec<ClaimView>, DomainError> {
        let tables = self.lock()?;
        let mut views: Vec<ClaimView> = tables
            .claims
            .values()
            .filter_map(|c| tables.claim_view(c))
            .filter(|v| v.matches(filter))
            .collect();
        views.sort_by(|a, b| {
            b.care_start
                .cmp(&a.care_start)
                .then_with(|| a.receipt_number.cmp(&b.receipt_number))
        });
        Ok(views)
    }
}

#[async_trait]
impl ClaimRepository for InMemoryEntitlementStore {
    async fn save(&self, claim: &Claim) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        if !tables.members.contains_key(&claim.member_id) {
            return Err(
                DomainError::new(ErrorCode::MemberNotFound, "Claim references unknown member")
                    .with_detail("id", claim.member_id.to_string()),
            );
        }
        tables.claims.insert(claim.id, claim.clone());
        Ok(())
    }

    async fn update(&self, claim: &Claim) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        match tables.claims.get_mut(&claim.id) {
            Some(stored) => {
                *stored = claim.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::ClaimNotFound, "Claim not found")
                .with_detail("id", claim.id.to_string())),
        }
    }

    async fn find_by_id(&self, id: &ClaimId) -> Result<Option<Claim>, DomainError> {
        Ok(self.lock()?.claims.get(id).cloned())
    }

    async fn list_by_member(&self, member_id: &MemberId) -> Result<Vec<Claim>, DomainError> {
        let tables = self.lock()?;
        let mut claims: Vec<Claim> = tables
            .claims
            .values()
            .filter(|c| &c.member_id == member_id)
            .cloned()
            .collect();
        claims.sort_by(|a, b| b.care_start.cmp(&a.care_start));
        Ok(claims)
    }
}
