//! PostgreSQL implementation of ClaimRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::claim::{Claim, ClaimStatus};
use crate::domain::foundation::{ClaimId, DomainError, ErrorCode, MemberId, Timestamp};
use crate::ports::ClaimRepository;

use super::{corrupt_row, db_error};

/// PostgreSQL implementation of the ClaimRepository port.
pub struct PostgresClaimRepository {
    pool: PgPool,
}

impl PostgresClaimRepository {
    /// Creates a new PostgresClaimRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClaimRow {
    id: Uuid,
    member_id: Uuid,
    receipt_number: String,
    status: String,
    amount_cents: i64,
    beneficiary: String,
    care_start: NaiveDate,
    care_end: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClaimRow> for Claim {
    type Error = DomainError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        Ok(Claim {
            id: ClaimId::from_uuid(row.id),
            member_id: MemberId::from_uuid(row.member_id),
            receipt_number: row.receipt_number,
            status: ClaimStatus::parse(&row.status).map_err(|e| corrupt_row("claims", e))?,
            amount_cents: row.amount_cents,
            beneficiary: row.beneficiary,
            care_start: row.care_start,
            care_end: row.care_end,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl ClaimRepository for PostgresClaimRepository {
    async fn save(&self, claim: &Claim) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO claims (
                id, member_id, receipt_number, status, amount_cents, beneficiary,
                care_start, care_end, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(claim.id.as_uuid())
        .bind(claim.member_id.as_uuid())
        .bind(&claim.receipt_number)
        .bind(claim.status.as_str())
        .bind(claim.amount_cents)
        .bind(&claim.beneficiary)
        .bind(claim.care_start)
        .bind(claim.care_end)
        .bind(claim.created_at.as_datetime())
        .bind(claim.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save claim", e))?;

        Ok(())
    }

    async fn update(&self, claim: &Claim) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE claims SET
                receipt_number = $2,
                status = $3,
                amount_cents = $4,
                beneficiary = $5,
                care_start = $6,
                care_end = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(claim.id.as_uuid())
        .bind(&claim.receipt_number)
        .bind(claim.status.as_str())
        .bind(claim.amount_cents)
        .bind(&claim.beneficiary)
        .bind(claim.care_start)
        .bind(claim.care_end)
        .bind(claim.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update claim", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ClaimNotFound, "Claim not found")
                .with_detail("id", claim.id.to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ClaimId) -> Result<Option<Claim>, DomainError> {
        let row: Option<ClaimRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, receipt_number, status, amount_cents, beneficiary,
                   care_start, care_end, created_at, updated_at
            FROM claims
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find claim", e))?;

        row.map(Claim::try_from).transpose()
    }

    async fn list_by_member(&self, member_id: &MemberId) -> Result<Vec<Claim>, DomainError> {
        let rows: Vec<ClaimRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, receipt_number, status, amount_cents, beneficiary,
                   care_start, care_end, created_at, updated_at
            FROM claims
            WHERE member_id = $1
            ORDER BY care_start DESC
            "#,
        )
        .bind(member_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list claims", e))?;

        rows.into_iter().map(Claim::try_from).collect()
    }
}
