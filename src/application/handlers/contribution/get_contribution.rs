//! GetContributionHandler - Query handler for a single contribution row.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::ContributionId;
use crate::ports::{Clock, ContributionReader};

use super::ContributionListItem;

#[derive(Debug, Clone)]
pub struct GetContributionQuery {
    pub contribution_id: ContributionId,
}

/// Handler for the contribution edit screen, which needs the joined row and
/// whether the decision can be changed today.
pub struct GetContributionHandler {
    reader: Arc<dyn ContributionReader>,
    clock: Arc<dyn Clock>,
}

impl GetContributionHandler {
    pub fn new(reader: Arc<dyn ContributionReader>, clock: Arc<dyn Clock>) -> Self {
        Self { reader, clock }
    }

    pub async fn handle(
        &self,
        query: GetContributionQuery,
    ) -> Result<ContributionListItem, EntitlementError> {
        let view = self
            .reader
            .get(&query.contribution_id)
            .await?
            .ok_or_else(|| EntitlementError::contribution_not_found(query.contribution_id))?;

        debug!(contribution_id = %view.contribution_id, "contribution lookup");
        Ok(ContributionListItem::annotate(view, self.clock.today()))
    }
}
