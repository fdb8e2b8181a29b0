//! Contribution repository port (write side).
//!
//! `commit_with_member` is the single write path for entitlement changes:
//! it persists a contribution and the owning member's entitlement status
//! atomically, guarded by a version compare-and-swap so that at most one
//! concurrent update per contribution commits.

use async_trait::async_trait;

use crate::domain::contribution::Contribution;
use crate::domain::foundation::{ContributionId, DomainError, MemberId};
use crate::domain::member::Member;

/// Repository port for Contribution aggregate persistence.
#[async_trait]
pub trait ContributionRepository: Send + Sync {
    /// Find a contribution by ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ContributionId) -> Result<Option<Contribution>, DomainError>;

    /// Find the contribution record owned by a member.
    async fn find_by_member(&self, member_id: &MemberId)
        -> Result<Option<Contribution>, DomainError>;

    /// Atomically persist `contribution` and `member.entitlement_status`.
    ///
    /// The stored contribution must still be at
    /// `contribution.expected_stored_version()`; otherwise nothing is written.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if the stored version moved
    /// - `ContributionNotFound` / `MemberNotFound` if a row no longer exists
    /// - `DatabaseError` / `Timeout` on persistence failure (rolled back)
    async fn commit_with_member(
        &self,
        contribution: &Contribution,
        member: &Member,
    ) -> Result<(), DomainError>;
}
