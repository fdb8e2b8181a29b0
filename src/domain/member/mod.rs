//! Member domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Member aggregate and its profile
//! - `values` - Demographic and affiliation value types
//! - `events` - Member lifecycle events

mod aggregate;
mod events;
mod values;

pub use aggregate::{Member, MemberProfile};
pub use events::{MemberProfileUpdated, MemberRegistered};
pub use values::{BankAccount, EmploymentStatus, Organization, PhoneNumber, Sex};

#[cfg(test)]
pub(crate) use aggregate::test_support;
