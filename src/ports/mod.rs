//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `MemberRepository` - Member registration and lookup
//! - `ContributionRepository` - Contribution lookup and the atomic
//!   contribution + entitlement commit
//! - `ContributionReader` - Joined contribution views for search
//! - `ClaimRepository` - Claim persistence
//! - `MemberReader` - Member list filters
//! - `ClaimReader` - Joined claim views for search
//!
//! ## Runtime Ports
//!
//! - `Clock` - Injected current time
//! - `EventPublisher` - Post-commit domain event publishing

mod claim_reader;
mod claim_repository;
mod clock;
mod contribution_reader;
mod contribution_repository;
mod event_publisher;
mod member_reader;
mod member_repository;

pub use claim_reader::{ClaimFilter, ClaimReader, ClaimView};
pub use claim_repository::ClaimRepository;
pub use clock::Clock;
pub use contribution_reader::{ContributionFilter, ContributionReader, ContributionView};
pub use contribution_repository::ContributionRepository;
pub use event_publisher::EventPublisher;
pub use member_reader::{MemberFilter, MemberReader};
pub use member_repository::MemberRepository;
