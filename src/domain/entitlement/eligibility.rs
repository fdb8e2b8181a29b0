//! Claim eligibility gate.
//!
//! Claim creation must consult this gate against a freshly read Member,
//! immediately before the claim is written.

use serde::{Deserialize, Serialize};

use crate::domain::member::Member;

/// Returns true iff the member may file a new claim.
pub fn can_file_claim(member: &Member) -> bool {
    member.entitlement_status().is_entitled()
}

/// Outcome of the gate, with a reason when denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimEligibility {
    Eligible,
    Denied(ClaimDenialReason),
}

impl ClaimEligibility {
    /// Evaluates the gate for `member`.
    pub fn evaluate(member: &Member) -> Self {
        if can_file_claim(member) {
            ClaimEligibility::Eligible
        } else {
            ClaimEligibility::Denied(ClaimDenialReason::NotEntitled)
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, ClaimEligibility::Eligible)
    }

    pub fn denial_reason(&self) -> Option<&ClaimDenialReason> {
        match self {
            ClaimEligibility::Eligible => None,
            ClaimEligibility::Denied(reason) => Some(reason),
        }
    }
}

/// Why a claim was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaimDenialReason {
    /// The member's current contribution decision is "no".
    NotEntitled,
}

impl ClaimDenialReason {
    /// Get a user-facing message for the denial reason.
    pub fn user_message(&self) -> String {
        match self {
            ClaimDenialReason::NotEntitled => {
                "This member is not entitled: claims cannot be added until contributions resume."
                    .to_string()
            }
        }
    }
}

impl std::fmt::Display for ClaimDenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}
