//! SearchMembersHandler - Query handler for the member list.

use std::sync::Arc;

use tracing::debug;

use crate::application::handlers::non_blank;
use crate::domain::entitlement::{EntitlementError, EntitlementStatus};
use crate::domain::foundation::{MemberNumber, NationalId};
use crate::domain::member::{EmploymentStatus, Member};
use crate::ports::{MemberFilter, MemberReader};

/// Query mirroring the member list filters. Blank strings are ignored.
#[derive(Debug, Clone, Default)]
pub struct SearchMembersQuery {
    /// Case-insensitive substring of the last name.
    pub last_name: Option<String>,
    /// Case-insensitive substring of the first name.
    pub first_name: Option<String>,
    pub national_id: Option<String>,
    pub member_number: Option<String>,
    pub employment_status: Option<String>,
    pub entitlement_status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SearchMembersResult {
    pub members: Vec<Member>,
}

/// Handler for member searches.
pub struct SearchMembersHandler {
    reader: Arc<dyn MemberReader>,
}

impl SearchMembersHandler {
    pub fn new(reader: Arc<dyn MemberReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: SearchMembersQuery,
    ) -> Result<SearchMembersResult, EntitlementError> {
        let Some(filter) = build_filter(&query)? else {
            debug!(
                national_id = ?query.national_id,
                member_number = ?query.member_number,
                "identifier cannot match any member, returning none"
            );
            return Ok(SearchMembersResult {
                members: Vec::new(),
            });
        };

        let members = self.reader.search(&filter).await?;
        debug!(results = members.len(), "member search");
        Ok(SearchMembersResult { members })
    }
}

/// Returns `None` when an identifier is malformed and so matches nobody.
fn build_filter(query: &SearchMembersQuery) -> Result<Option<MemberFilter>, EntitlementError> {
    let national_id = match non_blank(&query.national_id) {
        Some(raw) => match NationalId::new(raw) {
            Ok(id) => Some(id),
            Err(_) => return Ok(None),
        },
        None => None,
    };
    let member_number = match non_blank(&query.member_number) {
        Some(raw) => match MemberNumber::parse(raw) {
            Ok(number) => Some(number),
            Err(_) => return Ok(None),
        },
        None => None,
    };

    let employment_status = non_blank(&query.employment_status)
        .map(EmploymentStatus::parse)
        .transpose()?;
    let entitlement_status = non_blank(&query.entitlement_status)
        .map(str::parse::<EntitlementStatus>)
        .transpose()?;

    Ok(Some(MemberFilter {
        last_name_contains: non_blank(&query.last_name).map(str::to_string),
        first_name_contains: non_blank(&query.first_name).map(str::to_string),
        national_id,
        member_number,
        employment_status,
        entitlement_status,
    }))
}
