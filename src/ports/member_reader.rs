//! Member reader port (read side / CQRS queries).
//!
//! Backs the member list screen filters.

use async_trait::async_trait;

use crate::domain::entitlement::EntitlementStatus;
use crate::domain::foundation::{DomainError, MemberNumber, NationalId};
use crate::domain::member::{EmploymentStatus, Member};

/// Reader port for member queries.
#[async_trait]
pub trait MemberReader: Send + Sync {
    /// Search members. An empty filter returns every member.
    ///
    /// Results are ordered by member number.
    async fn search(&self, filter: &MemberFilter) -> Result<Vec<Member>, DomainError>;
}

/// Search criteria. All set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    /// Case-insensitive substring of the last name.
    pub last_name_contains: Option<String>,
    /// Case-insensitive substring of the first name.
    pub first_name_contains: Option<String>,
    pub national_id: Option<NationalId>,
    pub member_number: Option<MemberNumber>,
    pub employment_status: Option<EmploymentStatus>,
    pub entitlement_status: Option<EntitlementStatus>,
}

impl MemberFilter {
    /// True if `member` satisfies every criterion.
    pub fn matches(&self, member: &Member) -> bool {
        let p = &member.profile;
        contains_ignore_case(&p.last_name, self.last_name_contains.as_deref())
            && contains_ignore_case(&p.first_name, self.first_name_contains.as_deref())
            && self.national_id.as_ref().map_or(true, |id| &p.national_id == id)
            && self
                .member_number
                .as_ref()
                .map_or(true, |n| &member.member_number == n)
            && self
                .employment_status
                .map_or(true, |s| p.employment_status == s)
            && self
                .entitlement_status
                .map_or(true, |s| member.entitlement_status() == s)
    }
}

/// Case-insensitive substring test. A missing needle always matches.
pub(crate) fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::test_support::member_with_status;

    #[test]
    fn empty_filter_matches_everything() {
        let member = member_with_status(EntitlementStatus::Entitled);
        assert!(MemberFilter::default().matches(&member));
    }

    #[test]
    fn name_filters_are_case_insensitive_substrings() {
        let member = member_with_status(EntitlementStatus::Entitled);
        let filter = MemberFilter {
            last_name_contains: Some("LAOU".to_string()),
            first_name_contains: Some("sam".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&member));
    }

    #[test]
    fn entitlement_filter_is_exact() {
        let member = member_with_status(EntitlementStatus::NotEntitled);
        let filter = MemberFilter {
            entitlement_status: Some(EntitlementStatus::Entitled),
            ..Default::default()
        };
        assert!(!filter.matches(&member));
    }
}
