//! Member handlers.
//!
//! ## Commands
//! - Registering a member together with their first contribution
//! - Editing a member's profile (never their entitlement)
//!
//! ## Queries
//! - Member detail with contribution and claims
//! - Searching the member list

mod get_member;
mod register_member;
mod search_members;
mod update_member_profile;

// Commands
pub use register_member::{RegisterMemberCommand, RegisterMemberHandler, RegisterMemberResult};
pub use update_member_profile::{
    UpdateMemberProfileCommand, UpdateMemberProfileHandler, UpdateMemberProfileResult,
};

// Queries
pub use get_member::{GetMemberHandler, GetMemberQuery, GetMemberResult};
pub use search_members::{SearchMembersHandler, SearchMembersQuery, SearchMembersResult};
