//! Claim review status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Review status of a claim file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Receipt recorded, awaiting or under reimbursement.
    #[default]
    Received,
    /// Claim refused on review.
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Received => "received",
            ClaimStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "received" => Ok(ClaimStatus::Received),
            "rejected" => Ok(ClaimStatus::Rejected),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown claim status '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for ClaimStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ClaimStatus::*;
        // Rejected -> Received is a re-review.
        matches!((self, target), (Received, Rejected) | (Rejected, Received))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ClaimStatus::Received => vec![ClaimStatus::Rejected],
            ClaimStatus::Rejected => vec![ClaimStatus::Received],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn received_and_rejected_toggle() {
        assert!(ClaimStatus::Received.can_transition_to(&ClaimStatus::Rejected));
        assert!(ClaimStatus::Rejected.can_transition_to(&ClaimStatus::Received));
    }

    #[test]
    fn same_status_is_not_a_transition() {
        assert!(ClaimStatus::Received
            .transition_to(ClaimStatus::Received)
            .is_err());
    }

    #[test]
    fn no_status_is_terminal() {
        assert!(!ClaimStatus::Received.is_terminal());
        assert!(!ClaimStatus::Rejected.is_terminal());
    }

    #[test]
    fn default_is_received() {
        assert_eq!(ClaimStatus::default(), ClaimStatus::Received);
    }
}
