//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, time values, error types, the state machine trait
//! and event plumbing that form the vocabulary of the entitlement domain.

mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{ClaimId, ContributionId, MemberId, MemberNumber, NationalId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
