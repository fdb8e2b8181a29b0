//! PostgreSQL implementation of ContributionRepository.
//!
//! `commit_with_member` runs in one transaction: a version-guarded
//! contribution update, then the member's entitlement columns. Returning
//! early drops the transaction, which rolls it back.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::contribution::Contribution;
use crate::domain::entitlement::Decision;
use crate::domain::foundation::{ContributionId, DomainError, ErrorCode, MemberId, Timestamp};
use crate::domain::member::Member;
use crate::ports::ContributionRepository;

use super::{corrupt_row, db_error};

/// PostgreSQL implementation of the ContributionRepository port.
pub struct PostgresContributionRepository {
    pool: PgPool,
}

impl PostgresContributionRepository {
    /// Creates a new PostgresContributionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a contribution.
#[derive(Debug, sqlx::FromRow)]
struct ContributionRow {
    id: Uuid,
    member_id: Uuid,
    decision: String,
    period_start: Option<NaiveDate>,
    period_end: Option<NaiveDate>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContributionRow> for Contribution {
    type Error = DomainError;

    fn try_from(row: ContributionRow) -> Result<Self, Self::Error> {
        let decision = Decision::parse(&row.decision)
            .map_err(|e| DomainError::database(format!("Invalid contributions row: {}", e)))?;
        let version = u64::try_from(row.version).map_err(|_| {
            DomainError::database(format!("Invalid contributions row: version {}", row.version))
        })?;

        Contribution::restore(
            ContributionId::from_uuid(row.id),
            MemberId::from_uuid(row.member_id),
            decision,
            row.period_start,
            row.period_end,
            version,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        )
        .map_err(|e| corrupt_row("contributions", e))
    }
}

#[async_trait]
impl ContributionRepository for PostgresContributionRepository {
    async fn find_by_id(&self, id: &ContributionId) -> Result<Option<Contribution>, DomainError> {
        let row: Option<ContributionRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, decision, period_start, period_end, version, created_at, updated_at
            FROM contributions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find contribution", e))?;

        row.map(Contribution::try_from).transpose()
    }

    async fn find_by_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<Contribution>, DomainError> {
        let row: Option<ContributionRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, decision, period_start, period_end, version, created_at, updated_at
            FROM contributions
            WHERE member_id = $1
            "#,
        )
        .bind(member_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find contribution", e))?;

        row.map(Contribution::try_from).transpose()
    }

    async fn commit_with_member(
        &self,
        contribution: &Contribution,
        member: &Member,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let result = sqlx::query(
            r#"
            UPDATE contributions SET
                decision = $2,
                period_start = $3,
                period_end = $4,
                version = $5,
                updated_at = $6
            WHERE id = $1 AND version = $7 AND member_id = $8
            "#,
        )
        .bind(contribution.id.as_uuid())
        .bind(contribution.decision.as_str())
        .bind(contribution.period_start)
        .bind(contribution.period_end)
        .bind(contribution.version as i64)
        .bind(contribution.updated_at.as_datetime())
        .bind(contribution.expected_stored_version() as i64)
        .bind(member.id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update contribution", e))?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM contributions WHERE id = $1)",
            )
            .bind(contribution.id.as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to check contribution", e))?;

            return Err(if exists {
                DomainError::conflict(format!(
                    "Contribution {} changed since it was read (expected version {})",
                    contribution.id,
                    contribution.expected_stored_version()
                ))
            } else {
                DomainError::new(ErrorCode::ContributionNotFound, "Contribution no longer exists")
                    .with_detail("id", contribution.id.to_string())
            });
        }

        let result = sqlx::query(
            r#"
            UPDATE members SET
                entitlement_status = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(member.entitlement_status().as_str())
        .bind(member.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update member entitlement", e))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::MemberNotFound, "Member no longer exists")
                    .with_detail("id", member.id.to_string()),
            );
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }
}
