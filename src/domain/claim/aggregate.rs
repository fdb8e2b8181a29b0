//! Claim aggregate entity.
//!
//! A Claim (soin) is a healthcare reimbursement file. It may only be created
//! for an entitled member; once created it is never revoked because the
//! member's entitlement later lapses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClaimId, MemberId, StateMachine, Timestamp, ValidationError};

use super::ClaimStatus;

/// Default beneficiary label when none is given.
pub const DEFAULT_BENEFICIARY: &str = "member";

const RECEIPT_NUMBER_MAX_LEN: usize = 50;
const BENEFICIARY_MAX_LEN: usize = 100;

/// Input for a new claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDetails {
    pub receipt_number: String,

    /// Amount claimed, in cents.
    pub amount_cents: i64,

    /// Who received the care. Defaults to [`DEFAULT_BENEFICIARY`].
    pub beneficiary: Option<String>,

    pub care_start: NaiveDate,
    pub care_end: NaiveDate,
    pub status: Option<ClaimStatus>,
}

impl ClaimDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let receipt = self.receipt_number.trim();
        if receipt.is_empty() {
            return Err(ValidationError::empty_field("receipt_number"));
        }
        if receipt.chars().count() > RECEIPT_NUMBER_MAX_LEN {
            return Err(ValidationError::invalid_format(
                "receipt_number",
                format!("at most {} characters", RECEIPT_NUMBER_MAX_LEN),
            ));
        }
        if self.amount_cents <= 0 {
            return Err(ValidationError::invalid_format(
                "amount_cents",
                "amount must be positive",
            ));
        }
        if let Some(beneficiary) = &self.beneficiary {
            if beneficiary.chars().count() > BENEFICIARY_MAX_LEN {
                return Err(ValidationError::invalid_format(
                    "beneficiary",
                    format!("at most {} characters", BENEFICIARY_MAX_LEN),
                ));
            }
        }
        if self.care_end < self.care_start {
            return Err(ValidationError::invalid_format(
                "care_end",
                "care end precedes care start",
            ));
        }
        Ok(())
    }
}

/// Claim aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub member_id: MemberId,
    pub receipt_number: String,
    pub status: ClaimStatus,
    pub amount_cents: i64,
    pub beneficiary: String,
    pub care_start: NaiveDate,
    pub care_end: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Claim {
    /// Files a new claim. The caller has already passed the eligibility gate.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the details are invalid.
    pub fn file(
        id: ClaimId,
        member_id: MemberId,
        details: ClaimDetails,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        details.validate()?;
        let beneficiary = normalize_beneficiary(details.beneficiary);

        Ok(Self {
            id,
            member_id,
            receipt_number: details.receipt_number.trim().to_string(),
            status: details.status.unwrap_or_default(),
            amount_cents: details.amount_cents,
            beneficiary,
            care_start: details.care_start,
            care_end: details.care_end,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rewrites the receipt, amount, beneficiary and care period.
    ///
    /// A `status` in `details` that differs from the current one goes
    /// through the same transition rules as [`Claim::change_status`].
    /// Nothing changes if either check fails.
    pub fn update_details(
        &mut self,
        details: ClaimDetails,
        now: Timestamp,
    ) -> Result<(), ValidationError> {
        details.validate()?;
        let status = match details.status {
            Some(target) if target != self.status => self.status.transition_to(target)?,
            _ => self.status,
        };

        self.receipt_number = details.receipt_number.trim().to_string();
        self.amount_cents = details.amount_cents;
        self.beneficiary = normalize_beneficiary(details.beneficiary);
        self.care_start = details.care_start;
        self.care_end = details.care_end;
        self.status = status;
        self.updated_at = now;
        Ok(())
    }

    /// Moves the claim to `target`, returning the previous status.
    pub fn change_status(
        &mut self,
        target: ClaimStatus,
        now: Timestamp,
    ) -> Result<ClaimStatus, ValidationError> {
        let previous = self.status;
        self.status = previous.transition_to(target)?;
        self.updated_at = now;
        Ok(previous)
    }
}

fn normalize_beneficiary(raw: Option<String>) -> String {
    raw.map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| DEFAULT_BENEFICIARY.to_string())
}
