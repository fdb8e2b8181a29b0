//! Claim reader port (read side / CQRS queries).
//!
//! Joined views backing the claim list screen.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::claim::ClaimStatus;
use crate::domain::foundation::{
    ClaimId, DomainError, MemberId, MemberNumber, NationalId, Timestamp,
};

use super::member_reader::contains_ignore_case;

/// Reader port for claim queries.
#[async_trait]
pub trait ClaimReader: Send + Sync {
    /// Search claims. An empty filter returns every claim.
    ///
    /// Results are ordered by most recent care first.
    async fn search(&self, filter: &ClaimFilter) -> Result<Vec<ClaimView>, DomainError>;
}

/// Search criteria. All set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimFilter {
    pub national_id: Option<NationalId>,
    /// Case-insensitive substring of the member's last name.
    pub last_name_contains: Option<String>,
    /// Case-insensitive substring of the member's first name.
    pub first_name_contains: Option<String>,
    pub member_number: Option<MemberNumber>,
    /// Case-insensitive substring of the receipt number.
    pub receipt_number_contains: Option<String>,
    pub status: Option<ClaimStatus>,
}

/// Claim joined with the owning member's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimView {
    pub claim_id: ClaimId,
    pub member_id: MemberId,
    pub member_number: MemberNumber,
    pub national_id: NationalId,
    pub last_name: String,
    pub first_name: String,
    pub receipt_number: String,
    pub status: ClaimStatus,
    pub amount_cents: i64,
    pub beneficiary: String,
    pub care_start: NaiveDate,
    pub care_end: NaiveDate,
    pub updated_at: Timestamp,
}

impl ClaimView {
    /// True if this view satisfies every criterion in `filter`.
    pub fn matches(&self, filter: &ClaimFilter) -> bool {
        filter.national_id.as_ref().map_or(true, |id| &self.national_id == id)
            && contains_ignore_case(&self.last_name, filter.last_name_contains.as_deref())
            && contains_ignore_case(&self.first_name, filter.first_name_contains.as_deref())
            && filter
                .member_number
                .as_ref()
                .map_or(true, |n| &self.member_number == n)
            && contains_ignore_case(
                &self.receipt_number,
                filter.receipt_number_contains.as_deref(),
            )
            && filter.status.map_or(true, |s| self.status == s)
    }
}
