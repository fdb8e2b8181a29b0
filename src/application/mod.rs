//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Claim handlers
    CheckClaimEligibilityHandler, CheckClaimEligibilityQuery, CheckClaimEligibilityResult,
    FileClaimCommand, FileClaimHandler, FileClaimResult,
    SearchClaimsHandler, SearchClaimsQuery, SearchClaimsResult,
    UpdateClaimDetailsCommand, UpdateClaimDetailsHandler, UpdateClaimDetailsResult,
    UpdateClaimStatusCommand, UpdateClaimStatusHandler, UpdateClaimStatusResult,
    // Contribution handlers
    ContributionListItem, GetContributionHandler, GetContributionQuery,
    SearchContributionsHandler, SearchContributionsQuery, SearchContributionsResult,
    UpdateContributionCommand, UpdateContributionHandler, UpdateContributionResult,
    // Member handlers
    GetMemberHandler, GetMemberQuery, GetMemberResult,
    RegisterMemberCommand, RegisterMemberHandler, RegisterMemberResult,
    SearchMembersHandler, SearchMembersQuery, SearchMembersResult,
    UpdateMemberProfileCommand, UpdateMemberProfileHandler, UpdateMemberProfileResult,
};
