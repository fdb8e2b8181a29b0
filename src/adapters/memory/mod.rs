//! In-process repository adapter.

mod store;

pub use store::InMemoryEntitlementStore;
