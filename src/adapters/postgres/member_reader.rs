//! PostgreSQL implementation of MemberReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::member::Member;
use crate::ports::{MemberFilter, MemberReader};

use super::member_repository::{MemberRow, MEMBER_COLUMNS};
use super::{db_error, like_pattern};

/// PostgreSQL implementation of the MemberReader port.
pub struct PostgresMemberReader {
    pool: PgPool,
}

impl PostgresMemberReader {
    /// Creates a new PostgresMemberReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberReader for PostgresMemberReader {
    async fn search(&self, filter: &MemberFilter) -> Result<Vec<Member>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM members
            WHERE ($1::text IS NULL OR last_name ILIKE $1)
              AND ($2::text IS NULL OR first_name ILIKE $2)
              AND ($3::text IS NULL OR national_id = $3)
              AND ($4::text IS NULL OR member_number = $4)
              AND ($5::text IS NULL OR employment_status = $5)
              AND ($6::text IS NULL OR entitlement_status = $6)
            ORDER BY member_number
            "#,
            MEMBER_COLUMNS
        ))
        .bind(filter.last_name_contains.as_deref().map(like_pattern))
        .bind(filter.first_name_contains.as_deref().map(like_pattern))
        .bind(filter.national_id.as_ref().map(|id| id.as_str().to_string()))
        .bind(filter.member_number.as_ref().map(|n| n.as_str().to_string()))
        .bind(filter.employment_status.map(|s| s.as_str()))
        .bind(filter.entitlement_status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search members", e))?;

        rows.into_iter().map(Member::try_from).collect()
    }
}
