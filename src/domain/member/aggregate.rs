//! Member aggregate entity.
//!
//! A Member (adherent) is identified by a unique national ID and a unique
//! six-digit member number. It carries a denormalized entitlement status
//! that is only ever written from a [`DerivedEntitlement`], either at
//! registration or by the contribution update transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entitlement::{DerivedEntitlement, EntitlementStatus};
use crate::domain::foundation::{MemberId, MemberNumber, NationalId, Timestamp, ValidationError};

use super::{BankAccount, EmploymentStatus, Organization, PhoneNumber, Sex};

/// Identity, demographics and affiliation of a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub national_id: NationalId,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub hire_date: Option<NaiveDate>,
    pub employment_status: EmploymentStatus,
    pub phone: PhoneNumber,
    pub bank_account: BankAccount,
    pub city: String,
    pub address: String,

    /// Monthly salary in cents.
    pub salary_cents: i64,

    pub employer: Organization,
    pub contribution_section: Organization,
}

impl MemberProfile {
    /// Checks the rules that typed fields cannot express on their own.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::empty_field("last_name"));
        }
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::empty_field("first_name"));
        }
        if self.salary_cents < 0 {
            return Err(ValidationError::invalid_format(
                "salary_cents",
                "salary cannot be negative",
            ));
        }
        if let Some(hired) = self.hire_date {
            if hired < self.birth_date {
                return Err(ValidationError::invalid_format(
                    "hire_date",
                    "hire date precedes birth date",
                ));
            }
        }
        Ok(())
    }
}

/// Member aggregate.
///
/// # Invariants
///
/// - `id`, `member_number` and `profile.national_id` are each unique
/// - `entitlement_status` equals the entitlement derived from the member's
///   current contribution; it has no public setter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub member_number: MemberNumber,
    pub profile: MemberProfile,
    entitlement_status: EntitlementStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Member {
    /// Registers a new member with the entitlement derived from their
    /// initial contribution decision.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the profile is invalid.
    pub fn register(
        id: MemberId,
        member_number: MemberNumber,
        profile: MemberProfile,
        entitlement: &DerivedEntitlement,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        profile.validate()?;
        Ok(Self {
            id,
            member_number,
            profile,
            entitlement_status: entitlement.entitlement_status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a member from persisted state.
    pub fn restore(
        id: MemberId,
        member_number: MemberNumber,
        profile: MemberProfile,
        entitlement_status: EntitlementStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            member_number,
            profile,
            entitlement_status,
            created_at,
            updated_at,
        }
    }

    pub fn entitlement_status(&self) -> EntitlementStatus {
        self.entitlement_status
    }

    pub fn is_entitled(&self) -> bool {
        self.entitlement_status.is_entitled()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
    }

    /// Replaces the member's demographics.
    ///
    /// The entitlement status is left untouched: it only follows the
    /// contribution record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the new profile is invalid.
    pub fn update_profile(
        &mut self,
        profile: MemberProfile,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        profile.validate()?;
        self.profile = profile;
        self.updated_at = now;
        Ok(())
    }

    /// Writes the derived entitlement onto the member.
    ///
    /// Only the contribution update transaction calls this, in the same
    /// commit that writes the contribution.
    pub(crate) fn apply_entitlement(&mut self, entitlement: &DerivedEntitlement, now: Timestamp) {
        self.entitlement_status = entitlement.entitlement_status;
        self.updated_at = now;
    }
}
