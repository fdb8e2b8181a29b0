//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and fixed clocks
//! - `events` - In-memory event bus
//! - `memory` - In-process repository store
//! - `postgres` - PostgreSQL repositories (sqlx)

pub mod clock;
pub mod events;
pub mod memory;
pub mod postgres;

pub use clock::{FixedClock, SystemClock};
pub use events::InMemoryEventBus;
pub use memory::InMemoryEntitlementStore;
