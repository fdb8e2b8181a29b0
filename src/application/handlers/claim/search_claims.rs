//! SearchClaimsHandler - Query handler for the claim list.

use std::sync::Arc;

use tracing::debug;

use crate::application::handlers::non_blank;
use crate::domain::claim::ClaimStatus;
use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::{MemberNumber, NationalId};
use crate::ports::{ClaimFilter, ClaimReader, ClaimView};

/// Query mirroring the claim list filters. Blank strings are ignored.
#[derive(Debug, Clone, Default)]
pub struct SearchClaimsQuery {
    /// Exact national ID of the member.
    pub national_id: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub member_number: Option<String>,
    /// Case-insensitive substring of the receipt number.
    pub receipt_number: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SearchClaimsResult {
    pub items: Vec<ClaimView>,
}

/// Handler for claim searches.
pub struct SearchClaimsHandler {
    reader: Arc<dyn ClaimReader>,
}

impl SearchClaimsHandler {
    pub fn new(reader: Arc<dyn ClaimReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: SearchClaimsQuery,
    ) -> Result<SearchClaimsResult, EntitlementError> {
        let Some(filter) = build_filter(&query)? else {
            debug!(
                national_id = ?query.national_id,
                member_number = ?query.member_number,
                "identifier cannot match any claim, returning none"
            );
            return Ok(SearchClaimsResult { items: Vec::new() });
        };

        let items = self.reader.search(&filter).await?;
        debug!(results = items.len(), "claim search");
        Ok(SearchClaimsResult { items })
    }
}

fn build_filter(query: &SearchClaimsQuery) -> Result<Option<ClaimFilter>, EntitlementError> {
    let national_id = match non_blank(&query.national_id).map(NationalId::new) {
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => return Ok(None),
        None => None,
    };
    let member_number = match non_blank(&query.member_number).map(MemberNumber::parse) {
        Some(Ok(number)) => Some(number),
        Some(Err(_)) => return Ok(None),
        None => None,
    };
    let status = non_blank(&query.status).map(ClaimStatus::parse).transpose()?;

    Ok(Some(ClaimFilter {
        national_id,
        last_name_contains: non_blank(&query.last_name).map(str::to_string),
        first_name_contains: non_blank(&query.first_name).map(str::to_string),
        member_number,
        receipt_number_contains: non_blank(&query.receipt_number).map(str::to_string),
        status,
    }))
}
