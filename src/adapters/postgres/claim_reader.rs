//! PostgreSQL implementation of ClaimReader.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::claim::ClaimStatus;
use crate::domain::foundation::{
    ClaimId, DomainError, MemberId, MemberNumber, NationalId, Timestamp,
};
use crate::ports::{ClaimFilter, ClaimReader, ClaimView};

use super::{corrupt_row, db_error, like_pattern};

/// PostgreSQL implementation of the ClaimReader port.
pub struct PostgresClaimReader {
    pool: PgPool,
}

impl PostgresClaimReader {
    /// Creates a new PostgresClaimReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClaimViewRow {
    claim_id: Uuid,
    member_id: Uuid,
    member_number: String,
    national_id: String,
    last_name: String,
    first_name: String,
    receipt_number: String,
    status: String,
    amount_cents: i64,
    beneficiary: String,
    care_start: NaiveDate,
    care_end: NaiveDate,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClaimViewRow> for ClaimView {
    type Error = DomainError;

    fn try_from(row: ClaimViewRow) -> Result<Self, Self::Error> {
        let invalid = |e| corrupt_row("claim view", e);
        Ok(ClaimView {
            claim_id: ClaimId::from_uuid(row.claim_id),
            member_id: MemberId::from_uuid(row.member_id),
            member_number: MemberNumber::parse(&row.member_number).map_err(invalid)?,
            national_id: NationalId::new(row.national_id).map_err(invalid)?,
            last_name: row.last_name,
            first_name: row.first_name,
            receipt_number: row.receipt_number,
            status: ClaimStatus::parse(&row.status).map_err(invalid)?,
            amount_cents: row.amount_cents,
            beneficiary: row.beneficiary,
            care_start: row.care_start,
            care_end: row.care_end,
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl ClaimReader for PostgresClaimReader {
    async fn search(&self, filter: &ClaimFilter) -> Result<Vec<ClaimView>, DomainError> {
        let rows: Vec<ClaimViewRow> = sqlx::query_as(
            r#"
            SELECT cl.id AS claim_id, m.id AS member_id, m.member_number, m.national_id,
                   m.last_name, m.first_name, cl.receipt_number, cl.status, cl.amount_cents,
                   cl.beneficiary, cl.care_start, cl.care_end, cl.updated_at
            FROM claims cl
            JOIN members m ON m.id = cl.member_id
            WHERE ($1::text IS NULL OR m.national_id = $1)
              AND ($2::text IS NULL OR m.last_name ILIKE $2)
              AND ($3::text IS NULL OR m.first_name ILIKE $3)
              AND ($4::text IS NULL OR m.member_number = $4)
              AND ($5::text IS NULL OR cl.receipt_number ILIKE $5)
              AND ($6::text IS NULL OR cl.status = $6)
            ORDER BY cl.care_start DESC, cl.receipt_number
            "#,
        )
        .bind(filter.national_id.as_ref().map(|id| id.as_str().to_string()))
        .bind(filter.last_name_contains.as_deref().map(like_pattern))
        .bind(filter.first_name_contains.as_deref().map(like_pattern))
        .bind(filter.member_number.as_ref().map(|n| n.as_str().to_string()))
        .bind(filter.receipt_number_contains.as_deref().map(like_pattern))
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search claims", e))?;

        rows.into_iter().map(ClaimView::try_from).collect()
    }
}
