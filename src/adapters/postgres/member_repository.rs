//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::contribution::Contribution;
use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, MemberNumber, NationalId, Timestamp,
};
use crate::domain::member::{
    BankAccount, EmploymentStatus, Member, MemberProfile, Organization, PhoneNumber, Sex,
};
use crate::ports::MemberRepository;

use super::{corrupt_row, db_error, is_unique_violation};

/// PostgreSQL implementation of the MemberRepository port.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new PostgresMemberRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) const MEMBER_COLUMNS: &str = r#"
    id, member_number, national_id, last_name, first_name, birth_date, sex,
    hire_date, employment_status, phone, bank_account, city, address,
    salary_cents, employer, contribution_section, entitlement_status,
    created_at, updated_at
"#;

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct MemberRow {
    id: Uuid,
    member_number: String,
    national_id: String,
    last_name: String,
    first_name: String,
    birth_date: NaiveDate,
    sex: String,
    hire_date: Option<NaiveDate>,
    employment_status: String,
    phone: String,
    bank_account: String,
    city: String,
    address: String,
    salary_cents: i64,
    employer: String,
    contribution_section: String,
    entitlement_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let invalid = |e| corrupt_row("members", e);
        let profile = MemberProfile {
            national_id: NationalId::new(row.national_id).map_err(invalid)?,
            last_name: row.last_name,
            first_name: row.first_name,
            birth_date: row.birth_date,
            sex: Sex::parse(&row.sex).map_err(invalid)?,
            hire_date: row.hire_date,
            employment_status: EmploymentStatus::parse(&row.employment_status).map_err(invalid)?,
            phone: PhoneNumber::new(row.phone).map_err(invalid)?,
            bank_account: BankAccount::new(row.bank_account).map_err(invalid)?,
            city: row.city,
            address: row.address,
            salary_cents: row.salary_cents,
            employer: Organization::parse(&row.employer).map_err(invalid)?,
            contribution_section: Organization::parse(&row.contribution_section)
                .map_err(invalid)?,
        };
        let entitlement_status = row
            .entitlement_status
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid members row: {}", e)))?;

        Ok(Member::restore(
            MemberId::from_uuid(row.id),
            MemberNumber::parse(&row.member_number).map_err(invalid)?,
            profile,
            entitlement_status,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn register(
        &self,
        member: &Member,
        contribution: &Contribution,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let p = &member.profile;
        sqlx::query(
            r#"
            INSERT INTO members (
                id, member_number, national_id, last_name, first_name, birth_date, sex,
                hire_date, employment_status, phone, bank_account, city, address,
                salary_cents, employer, contribution_section, entitlement_status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(member.member_number.as_str())
        .bind(p.national_id.as_str())
        .bind(&p.last_name)
        .bind(&p.first_name)
        .bind(p.birth_date)
        .bind(p.sex.as_str())
        .bind(p.hire_date)
        .bind(p.employment_status.as_str())
        .bind(p.phone.as_str())
        .bind(p.bank_account.as_str())
        .bind(&p.city)
        .bind(&p.address)
        .bind(p.salary_cents)
        .bind(p.employer.as_str())
        .bind(p.contribution_section.as_str())
        .bind(member.entitlement_status().as_str())
        .bind(member.created_at.as_datetime())
        .bind(member.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "members_national_id_key")
                || is_unique_violation(&e, "members_member_number_key")
            {
                return DomainError::new(
                    ErrorCode::MemberExists,
                    format!("Member {} already registered", p.national_id),
                )
                .with_detail("national_id", p.national_id.as_str());
            }
            db_error("Failed to insert member", e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO contributions (
                id, member_id, decision, period_start, period_end, version, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(contribution.id.as_uuid())
        .bind(contribution.member_id.as_uuid())
        .bind(contribution.decision.as_str())
        .bind(contribution.period_start)
        .bind(contribution.period_end)
        .bind(contribution.version as i64)
        .bind(contribution.created_at.as_datetime())
        .bind(contribution.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert contribution", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn update_profile(&self, member: &Member) -> Result<(), DomainError> {
        let p = &member.profile;
        let result = sqlx::query(
            r#"
            UPDATE members SET
                national_id = $2,
                last_name = $3,
                first_name = $4,
                birth_date = $5,
                sex = $6,
                hire_date = $7,
                employment_status = $8,
                phone = $9,
                bank_account = $10,
                city = $11,
                address = $12,
                salary_cents = $13,
                employer = $14,
                contribution_section = $15,
                updated_at = $16
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(p.national_id.as_str())
        .bind(&p.last_name)
        .bind(&p.first_name)
        .bind(p.birth_date)
        .bind(p.sex.as_str())
        .bind(p.hire_date)
        .bind(p.employment_status.as_str())
        .bind(p.phone.as_str())
        .bind(p.bank_account.as_str())
        .bind(&p.city)
        .bind(&p.address)
        .bind(p.salary_cents)
        .bind(p.employer.as_str())
        .bind(p.contribution_section.as_str())
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "members_national_id_key") {
                return DomainError::new(
                    ErrorCode::MemberExists,
                    format!("Member {} already registered", p.national_id),
                )
                .with_detail("national_id", p.national_id.as_str());
            }
            db_error("Failed to update member profile", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found")
                .with_detail("id", member.id.to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM members WHERE id = $1",
            MEMBER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find member", e))?;

        row.map(Member::try_from).transpose()
    }

    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM members WHERE national_id = $1",
            MEMBER_COLUMNS
        ))
        .bind(national_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find member", e))?;

        row.map(Member::try_from).transpose()
    }

    async fn next_member_number(&self) -> Result<MemberNumber, DomainError> {
        let next: i64 = sqlx::query_scalar("SELECT nextval('member_number_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to allocate member number", e))?;

        let sequence = u32::try_from(next).map_err(|_| {
            DomainError::database(format!("member number sequence out of range: {}", next))
        })?;
        Ok(MemberNumber::from_sequence(sequence)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlement::EntitlementStatus;

    fn row() -> MemberRow {
        MemberRow {
            id: Uuid::new_v4(),
            member_number: "000042".to_string(),
            national_id: "AB123456".to_string(),
            last_name: "Alaoui".to_string(),
            first_name: "Samira".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1980, 4, 12).unwrap(),
            sex: "female".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2005, 9, 1),
            employment_status: "active".to_string(),
            phone: "+212661234567".to_string(),
            bank_account: "007780000123456789012345".to_string(),
            city: "Casablanca".to_string(),
            address: "12 Rue des Ports".to_string(),
            salary_cents: 1_250_000,
            employer: "marsa_maroc".to_string(),
            contribution_section: "anp".to_string(),
            entitlement_status: "entitled".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assert_corrupt(row: MemberRow, needle: &str) {
        let err = Member::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains(needle), "{}", err.message);
    }

    #[test]
    fn valid_row_converts_to_member() {
        let member = Member::try_from(row()).unwrap();

        assert_eq!(member.member_number.as_str(), "000042");
        assert_eq!(member.profile.sex, Sex::Female);
        assert_eq!(member.profile.employer, Organization::MarsaMaroc);
        assert_eq!(member.profile.contribution_section, Organization::Anp);
        assert_eq!(member.entitlement_status(), EntitlementStatus::Entitled);
    }

    #[test]
    fn unknown_sex_is_rejected() {
        let mut row = row();
        row.sex = "x".to_string();
        assert_corrupt(row, "sex");
    }

    #[test]
    fn unknown_employment_status_is_rejected() {
        let mut row = row();
        row.employment_status = "on_leave".to_string();
        assert_corrupt(row, "employment_status");
    }

    #[test]
    fn unknown_organization_is_rejected() {
        let mut row = row();
        row.employer = "acme".to_string();
        assert_corrupt(row, "organization");
    }

    #[test]
    fn unknown_entitlement_status_is_rejected() {
        let mut row = row();
        row.entitlement_status = "pending".to_string();
        assert_corrupt(row, "pending");
    }

    #[test]
    fn malformed_bank_account_is_rejected() {
        let mut row = row();
        row.bank_account = "12345".to_string();
        assert_corrupt(row, "bank_account");
    }
}
