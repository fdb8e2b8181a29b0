//! Entitlement domain module.
//!
//! Rules deciding whether a member may file claims, derived from their
//! contribution decision.
//!
//! # Module Structure
//!
//! - `status` - `Decision` and `EntitlementStatus`
//! - `derivation` - decision to entitlement mapping
//! - `lock_policy` - 30-day modification lock
//! - `eligibility` - claim eligibility gate
//! - `errors` - `EntitlementError` taxonomy
//! - `events` - entitlement lifecycle events

mod derivation;
mod eligibility;
mod errors;
mod events;
pub mod lock_policy;
mod status;

pub use derivation::{derive, DerivedEntitlement};
pub use eligibility::{can_file_claim, ClaimDenialReason, ClaimEligibility};
pub use errors::EntitlementError;
pub use events::ContributionUpdated;
pub use lock_policy::{can_modify, LockState, LOCK_WINDOW_DAYS};
pub use status::{Decision, EntitlementStatus};
