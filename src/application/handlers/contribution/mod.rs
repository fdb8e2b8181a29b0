//! Contribution handlers.
//!
//! ## Commands
//! - Updating a contribution decision (the atomic contribution + entitlement commit)
//!
//! ## Queries
//! - Searching the contribution list
//! - Looking up one contribution with its lock state

mod get_contribution;
mod search_contributions;
mod update_contribution;

// Commands
pub use update_contribution::{
    UpdateContributionCommand, UpdateContributionHandler, UpdateContributionResult,
};

// Queries
pub use get_contribution::{GetContributionHandler, GetContributionQuery};
pub use search_contributions::{
    ContributionListItem, SearchContributionsHandler, SearchContributionsQuery,
    SearchContributionsResult,
};
