//! Clock port.
//!
//! Handlers read the current instant and date only through this port so
//! that lock-window and derivation behavior is deterministic under test.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;

    /// Current calendar date (UTC).
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
