//! Entitlement derivation.
//!
//! The single authoritative mapping from a contribution decision to the
//! member's entitlement and the contribution's coverage period. Both the
//! contribution record and the member's denormalized status are written
//! from one `DerivedEntitlement`, never set independently.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Decision, EntitlementStatus};

/// Entitlement fields computed from a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedEntitlement {
    pub entitlement_status: EntitlementStatus,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

/// Derives entitlement for `decision` taking effect on `today`.
///
/// - `Yes`: entitled, period starts `today`, open-ended.
/// - `No`: not entitled, no period recorded.
pub fn derive(decision: Decision, today: NaiveDate) -> DerivedEntitlement {
    match decision {
        Decision::Yes => DerivedEntitlement {
            entitlement_status: EntitlementStatus::Entitled,
            period_start: Some(today),
            period_end: None,
        },
        Decision::No => DerivedEntitlement {
            entitlement_status: EntitlementStatus::NotEntitled,
            period_start: None,
            period_end: None,
        },
    }
}
