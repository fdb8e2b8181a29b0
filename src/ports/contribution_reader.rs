//! Contribution reader port (read side / CQRS queries).
//!
//! Joined views backing the contribution list screen.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entitlement::{Decision, EntitlementStatus};
use crate::domain::foundation::{
    ContributionId, DomainError, MemberId, MemberNumber, NationalId, Timestamp,
};

/// Reader port for contribution queries.
#[async_trait]
pub trait ContributionReader: Send + Sync {
    /// Search contributions. An empty filter returns every record.
    ///
    /// Results are ordered by member number.
    async fn search(&self, filter: &ContributionFilter)
        -> Result<Vec<ContributionView>, DomainError>;

    /// Get the joined view of a single contribution.
    async fn get(&self, id: &ContributionId) -> Result<Option<ContributionView>, DomainError>;
}

/// Search criteria. All set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionFilter {
    /// Case-insensitive substring of the member's national ID.
    pub national_id_contains: Option<String>,
    pub member_number: Option<MemberNumber>,
    pub decision: Option<Decision>,
}

impl ContributionFilter {
    pub fn is_empty(&self) -> bool {
        self.national_id_contains.is_none() && self.member_number.is_none() && self.decision.is_none()
    }
}

/// Contribution joined with the owning member's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionView {
    pub contribution_id: ContributionId,
    pub member_id: MemberId,
    pub member_number: MemberNumber,
    pub national_id: NationalId,
    pub last_name: String,
    pub first_name: String,
    pub bank_account: String,
    pub hire_date: Option<NaiveDate>,
    pub decision: Decision,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub entitlement_status: EntitlementStatus,
    pub updated_at: Timestamp,
}

impl ContributionView {
    /// True if this view satisfies every criterion in `filter`.
    pub fn matches(&self, filter: &ContributionFilter) -> bool {
        if let Some(needle) = &filter.national_id_contains {
            if !self.national_id.contains_ignore_case(needle) {
                return false;
            }
        }
        if let Some(number) = &filter.member_number {
            if &self.member_number != number {
                return false;
            }
        }
        if let Some(decision) = filter.decision {
            if self.decision != decision {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ContributionView {
        ContributionView {
            contribution_id: ContributionId::new(),
            member_id: MemberId::new(),
            member_number: MemberNumber::from_sequence(12).unwrap(),
            national_id: NationalId::new("BK778899").unwrap(),
            last_name: "Bennani".to_string(),
            first_name: "Youssef".to_string(),
            bank_account: "007780000123456789012345".to_string(),
            hire_date: None,
            decision: Decision::Yes,
            period_start: NaiveDate::from_ymd_opt(2024, 1, 10),
            period_end: None,
            entitlement_status: EntitlementStatus::Entitled,
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(ContributionFilter::default().is_empty());
        assert!(view().matches(&ContributionFilter::default()));
    }

    #[test]
    fn national_id_filter_is_case_insensitive_substring() {
        let filter = ContributionFilter {
            national_id_contains: Some("k77".to_string()),
            ..Default::default()
        };
        assert!(view().matches(&filter));
    }

    #[test]
    fn all_criteria_must_match() {
        let filter = ContributionFilter {
            member_number: Some(MemberNumber::from_sequence(12).unwrap()),
            decision: Some(Decision::No),
            ..Default::default()
        };
        assert!(!view().matches(&filter));
    }
}
