//! Claim repository port.

use async_trait::async_trait;

use crate::domain::claim::Claim;
use crate::domain::foundation::{ClaimId, DomainError, MemberId};

/// Repository port for Claim aggregate persistence.
#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Save a new claim.
    async fn save(&self, claim: &Claim) -> Result<(), DomainError>;

    /// Update an existing claim.
    ///
    /// # Errors
    ///
    /// - `ClaimNotFound` if the claim doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, claim: &Claim) -> Result<(), DomainError>;

    /// Find a claim by ID.
    async fn find_by_id(&self, id: &ClaimId) -> Result<Option<Claim>, DomainError>;

    /// List a member's claims, most recent care first.
    async fn list_by_member(&self, member_id: &MemberId) -> Result<Vec<Claim>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ClaimRepository) {}
}
