//! PostgreSQL implementation of ContributionReader.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entitlement::Decision;
use crate::domain::foundation::{
    ContributionId, DomainError, MemberId, MemberNumber, NationalId, Timestamp,
};
use crate::ports::{ContributionFilter, ContributionReader, ContributionView};

use super::{corrupt_row, db_error, like_pattern};

/// PostgreSQL implementation of the ContributionReader port.
pub struct PostgresContributionReader {
    pool: PgPool,
}

impl PostgresContributionReader {
    /// Creates a new PostgresContributionReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const VIEW_SELECT: &str = r#"
    SELECT c.id AS contribution_id, m.id AS member_id, m.member_number, m.national_id,
           m.last_name, m.first_name, m.bank_account, m.hire_date,
           c.decision, c.period_start, c.period_end, m.entitlement_status, c.updated_at
    FROM contributions c
    JOIN members m ON m.id = c.member_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct ViewRow {
    contribution_id: Uuid,
    member_id: Uuid,
    member_number: String,
    national_id: String,
    last_name: String,
    first_name: String,
    bank_account: String,
    hire_date: Option<NaiveDate>,
    decision: String,
    period_start: Option<NaiveDate>,
    period_end: Option<NaiveDate>,
    entitlement_status: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ViewRow> for ContributionView {
    type Error = DomainError;

    fn try_from(row: ViewRow) -> Result<Self, Self::Error> {
        let invalid = |e| corrupt_row("contribution view", e);
        let unparsable = |e: crate::domain::entitlement::EntitlementError| {
            DomainError::database(format!("Invalid contribution view row: {}", e))
        };
        Ok(ContributionView {
            contribution_id: ContributionId::from_uuid(row.contribution_id),
            member_id: MemberId::from_uuid(row.member_id),
            member_number: MemberNumber::parse(&row.member_number).map_err(invalid)?,
            national_id: NationalId::new(row.national_id).map_err(invalid)?,
            last_name: row.last_name,
            first_name: row.first_name,
            bank_account: row.bank_account,
            hire_date: row.hire_date,
            decision: Decision::parse(&row.decision).map_err(unparsable)?,
            period_start: row.period_start,
            period_end: row.period_end,
            entitlement_status: row.entitlement_status.parse().map_err(unparsable)?,
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl ContributionReader for PostgresContributionReader {
    async fn search(
        &self,
        filter: &ContributionFilter,
    ) -> Result<Vec<ContributionView>, DomainError> {
        let rows: Vec<ViewRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE ($1::text IS NULL OR m.national_id ILIKE $1)
              AND ($2::text IS NULL OR m.member_number = $2)
              AND ($3::text IS NULL OR c.decision = $3)
            ORDER BY m.member_number
            "#,
            VIEW_SELECT
        ))
        .bind(filter.national_id_contains.as_deref().map(like_pattern))
        .bind(filter.member_number.as_ref().map(|n| n.as_str().to_string()))
        .bind(filter.decision.map(|d| d.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search contributions", e))?;

        rows.into_iter().map(ContributionView::try_from).collect()
    }

    async fn get(&self, id: &ContributionId) -> Result<Option<ContributionView>, DomainError> {
        let row: Option<ViewRow> = sqlx::query_as(&format!("{} WHERE c.id = $1", VIEW_SELECT))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load contribution", e))?;

        row.map(ContributionView::try_from).transpose()
    }
}
