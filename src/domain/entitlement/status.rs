//! Contribution decision and entitlement status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::EntitlementError;

/// A member's contribution (cotisation) decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The member contributes; coverage is open-ended from the decision date.
    Yes,
    /// The member does not contribute; no coverage period is recorded.
    No,
}

impl Decision {
    /// Parses a decision supplied by a caller.
    ///
    /// Accepts `yes`/`no` and the French `oui`/`non` used by existing
    /// clients, case-insensitively.
    ///
    /// # Errors
    ///
    /// `InvalidDecision` for anything else.
    pub fn parse(raw: &str) -> Result<Self, EntitlementError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "oui" => Ok(Decision::Yes),
            "no" | "non" => Ok(Decision::No),
            _ => Err(EntitlementError::invalid_decision(raw)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Yes => "yes",
            Decision::No => "no",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decision::parse(s)
    }
}

/// Whether a member may currently file reimbursable claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementStatus {
    Entitled,
    NotEntitled,
}

impl EntitlementStatus {
    pub fn is_entitled(&self) -> bool {
        matches!(self, EntitlementStatus::Entitled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntitlementStatus::Entitled => "entitled",
            EntitlementStatus::NotEntitled => "not_entitled",
        }
    }
}

impl From<Decision> for EntitlementStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Yes => EntitlementStatus::Entitled,
            Decision::No => EntitlementStatus::NotEntitled,
        }
    }
}

impl fmt::Display for EntitlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntitlementStatus {
    type Err = EntitlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entitled" => Ok(EntitlementStatus::Entitled),
            "not_entitled" => Ok(EntitlementStatus::NotEntitled),
            other => Err(EntitlementError::validation(
                "entitlement_status",
                format!("unknown entitlement status '{}'", other),
            )),
        }
    }
}
