//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `entitlement` - Derivation, lock policy and claim eligibility rules
//! - `member` - Member aggregate and demographics
//! - `contribution` - Contribution aggregate
//! - `claim` - Claim aggregate and review status

pub mod claim;
pub mod contribution;
pub mod entitlement;
pub mod foundation;
pub mod member;
