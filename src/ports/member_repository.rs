//! Member repository port (write side).
//!
//! Registration writes the member and its single contribution record in one
//! atomic step. After registration a member's entitlement status is only
//! written through `ContributionRepository::commit_with_member`.

use async_trait::async_trait;

use crate::domain::contribution::Contribution;
use crate::domain::foundation::{DomainError, MemberId, MemberNumber, NationalId};
use crate::domain::member::Member;

/// Repository port for Member aggregate persistence.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist a new member together with its opening contribution.
    ///
    /// Both rows are written or neither is.
    ///
    /// # Errors
    ///
    /// - `MemberExists` if the national ID or member number is taken
    /// - `DatabaseError` on persistence failure
    async fn register(&self, member: &Member, contribution: &Contribution)
        -> Result<(), DomainError>;

    /// Overwrite the stored demographics of an existing member.
    ///
    /// Writes the profile columns and `updated_at` only. The stored
    /// entitlement status is never changed here.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    /// - `MemberExists` if the new national ID belongs to another member
    /// - `DatabaseError` on persistence failure
    async fn update_profile(&self, member: &Member) -> Result<(), DomainError>;

    /// Find a member by ID, reading the latest committed state.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Find a member by national ID.
    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<Member>, DomainError>;

    /// Allocate the next member number from a monotonically increasing
    /// sequence. Numbers are never reused, even if registration fails.
    async fn next_member_number(&self) -> Result<MemberNumber, DomainError>;
}
