//! Claim domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Claim aggregate and filing input
//! - `status` - ClaimStatus state machine
//! - `events` - Claim lifecycle events

mod aggregate;
mod events;
mod status;

pub use aggregate::{Claim, ClaimDetails, DEFAULT_BENEFICIARY};
pub use events::{ClaimDetailsUpdated, ClaimFiled, ClaimStatusChanged};
pub use status::ClaimStatus;
