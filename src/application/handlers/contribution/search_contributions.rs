//! SearchContributionsHandler - Query handler for the contribution list.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::application::handlers::non_blank;
use crate::domain::entitlement::{lock_policy, Decision, EntitlementError, LockState};
use crate::domain::foundation::MemberNumber;
use crate::ports::{Clock, ContributionFilter, ContributionReader, ContributionView};

/// Query mirroring the list screen filters. Blank strings are ignored.
#[derive(Debug, Clone, Default)]
pub struct SearchContributionsQuery {
    /// Case-insensitive substring of the national ID.
    pub national_id: Option<String>,
    /// Exact member number as typed by the operator.
    pub member_number: Option<String>,
    /// Exact decision, yes or no.
    pub decision: Option<String>,
}

/// One row of the contribution list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionListItem {
    #[serde(flatten)]
    pub view: ContributionView,
    /// Whether the decision can be edited today.
    pub can_modify: bool,
    /// First editable date while locked.
    pub unlocks_on: Option<NaiveDate>,
}

impl ContributionListItem {
    /// Annotates `view` with its lock state on `today`.
    pub fn annotate(view: ContributionView, today: NaiveDate) -> Self {
        let lock = lock_policy::evaluate(view.period_start, today);
        Self {
            can_modify: lock.is_unlocked(),
            unlocks_on: match lock {
                LockState::Locked { unlocks_on, .. } => Some(unlocks_on),
                LockState::Unlocked => None,
            },
            view,
        }
    }
}

/// Result of a contribution search.
#[derive(Debug, Clone)]
pub struct SearchContributionsResult {
    pub items: Vec<ContributionListItem>,
}

/// Handler for contribution searches.
pub struct SearchContributionsHandler {
    reader: Arc<dyn ContributionReader>,
    clock: Arc<dyn Clock>,
}

impl SearchContributionsHandler {
    pub fn new(reader: Arc<dyn ContributionReader>, clock: Arc<dyn Clock>) -> Self {
        Self { reader, clock }
    }

    pub async fn handle(
        &self,
        query: SearchContributionsQuery,
    ) -> Result<SearchContributionsResult, EntitlementError> {
        let Some(filter) = build_filter(&query)? else {
            debug!(
                member_number = ?query.member_number,
                "unparseable member number, returning no contributions"
            );
            return Ok(SearchContributionsResult { items: Vec::new() });
        };

        let views = self.reader.search(&filter).await?;
        debug!(results = views.len(), "contribution search");

        let today = self.clock.today();
        let items = views
            .into_iter()
            .map(|view| ContributionListItem::annotate(view, today))
            .collect();

        Ok(SearchContributionsResult { items })
    }
}

/// Returns `None` when the member number cannot match any member.
fn build_filter(
    query: &SearchContributionsQuery,
) -> Result<Option<ContributionFilter>, EntitlementError> {
    let member_number = match non_blank(&query.member_number) {
        Some(raw) => match MemberNumber::parse(raw) {
            Ok(number) => Some(number),
            Err(_) => return Ok(None),
        },
        None => None,
    };

    let decision = non_blank(&query.decision).map(Decision::parse).transpose()?;

    Ok(Some(ContributionFilter {
        national_id_contains: non_blank(&query.national_id).map(str::to_string),
        member_number,
        decision,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{date, Fixture};

    fn handler(fx: &Fixture) -> SearchContributionsHandler {
        SearchContributionsHandler::new(fx.store.clone(), fx.clock.clone())
    }

    async fn seeded() -> Fixture {
        let fx = Fixture::on(date(2024, 1, 25));
        fx.seed("BE100200", Decision::Yes, date(2024, 1, 10)).await;
        fx.seed("BK555", Decision::No, date(2023, 3, 1)).await;
        fx.seed("C9001", Decision::Yes, date(2023, 11, 2)).await;
        fx
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Filter Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn empty_query_lists_everything_by_member_number() {
        let fx = seeded().await;

        let result = handler(&fx)
            .handle(SearchContributionsQuery::default())
            .await
            .unwrap();

        let numbers: Vec<_> = result
            .items
            .iter()
            .map(|i| i.view.member_number.as_str().to_string())
            .collect();
        assert_eq!(numbers, vec!["000001", "000002", "000003"]);
    }

    #[tokio::test]
    async fn national_id_filter_is_case_insensitive_substring() {
        let fx = seeded().await;

        let result = handler(&fx)
            .handle(SearchContributionsQuery {
                national_id: Some("b".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.items.len(), 2);
    }

    #[tokio::test]
    async fn decision_filter_accepts_french_values() {
        let fx = seeded().await;

        let result = handler(&fx)
            .handle(SearchContributionsQuery {
                decision: Some("non".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].view.national_id.as_str(), "BK555");
    }

    #[tokio::test]
    async fn member_number_filter_matches_exactly() {
        let fx = seeded().await;

        let result = handler(&fx)
            .handle(SearchContributionsQuery {
                member_number: Some("000003".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].view.national_id.as_str(), "C9001");
    }

    #[tokio::test]
    async fn unparseable_member_number_returns_empty() {
        let fx = seeded().await;

        let result = handler(&fx)
            .handle(SearchContributionsQuery {
                member_number: Some("abc".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn blank_filters_are_ignored() {
        let fx = seeded().await;

        let result = handler(&fx)
            .handle(SearchContributionsQuery {
                national_id: Some("  ".to_string()),
                member_number: Some(String::new()),
                decision: Some(" ".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.items.len(), 3);
    }

    #[tokio::test]
    async fn unknown_decision_is_rejected() {
        let fx = seeded().await;

        let err = handler(&fx)
            .handle(SearchContributionsQuery {
                decision: Some("maybe".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EntitlementError::InvalidDecision(_)));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Lock Annotation Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn items_carry_lock_state_for_today() {
        let fx = seeded().await;

        let result = handler(&fx)
            .handle(SearchContributionsQuery::default())
            .await
            .unwrap();

        let recent = &result.items[0];
        assert!(!recent.can_modify);
        assert_eq!(recent.unlocks_on, Some(date(2024, 2, 10)));

        let no_period = &result.items[1];
        assert!(no_period.can_modify);
        assert_eq!(no_period.unlocks_on, None);

        let old = &result.items[2];
        assert!(old.can_modify);
    }

    #[tokio::test]
    async fn fails_when_reader_unavailable() {
        let fx = seeded().await;
        fx.store.set_unavailable(true);

        let err = handler(&fx)
            .handle(SearchContributionsQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, EntitlementError::RepositoryUnavailable(_)));
    }
}
