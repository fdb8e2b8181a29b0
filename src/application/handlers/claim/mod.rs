//! Claim handlers.
//!
//! ## Commands
//! - Filing a claim through the eligibility gate
//! - Moving a claim between received and rejected
//! - Correcting a filed claim's details
//!
//! ## Queries
//! - Checking whether a member may file a claim
//! - Searching the claim list

mod check_claim_eligibility;
mod file_claim;
mod search_claims;
mod update_claim_details;
mod update_claim_status;

// Commands
pub use file_claim::{FileClaimCommand, FileClaimHandler, FileClaimResult};
pub use update_claim_details::{
    UpdateClaimDetailsCommand, UpdateClaimDetailsHandler, UpdateClaimDetailsResult,
};
pub use update_claim_status::{
    UpdateClaimStatusCommand, UpdateClaimStatusHandler, UpdateClaimStatusResult,
};

// Queries
pub use check_claim_eligibility::{
    CheckClaimEligibilityHandler, CheckClaimEligibilityQuery, CheckClaimEligibilityResult,
};
pub use search_claims::{SearchClaimsHandler, SearchClaimsQuery, SearchClaimsResult};
